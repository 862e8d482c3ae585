//! Generic resource client
//!
//! Every admin collection (videos, contact submissions, bot registrations,
//! customer comments) follows the same list/get/create/update/delete
//! contract. A type describes its collection by implementing [`Resource`];
//! [`ResourceClient`] does the rest.

use std::marker::PhantomData;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::api::client::ApiClient;
use crate::api::envelope::Acknowledgement;
use crate::api::payload::RequestBody;
use crate::utils::errors::Result;

/// A backend REST collection
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-readable singular name, used in messages
    const NAME: &'static str;
    /// Collection path, e.g. `/api/website-videos`
    const PATH: &'static str;
    /// Envelope keys holding a list payload, tried in order
    const LIST_KEYS: &'static [&'static str] = &["data"];
    /// Envelope keys holding a single item, tried in order
    const ITEM_KEYS: &'static [&'static str] = &["data"];

    fn id(&self) -> i64;

    /// Stringified scalar fields used for free-text search. Top-level
    /// strings, numbers and booleans count (`false` included); nulls,
    /// arrays and nested objects are skipped.
    fn search_fields(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(_, value)| match value {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// CRUD client for one resource type
#[derive(Clone, Debug)]
pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        self.api
            .get(R::PATH)
            .await?
            .into_outcome(R::LIST_KEYS)?
            .into_result(&format!("Failed to load {}s", R::NAME))
    }

    pub async fn get(&self, id: i64) -> Result<R> {
        self.api
            .get(&R::item_path(id))
            .await?
            .into_outcome(R::ITEM_KEYS)?
            .into_result(&format!("Failed to load {}", R::NAME))
    }

    pub async fn create(&self, body: RequestBody) -> Result<R> {
        self.api
            .post(R::PATH, body)
            .await?
            .into_outcome(R::ITEM_KEYS)?
            .into_result(&format!("Failed to create {}", R::NAME))
    }

    pub async fn update(&self, id: i64, body: RequestBody) -> Result<R> {
        self.api
            .put(&R::item_path(id), body)
            .await?
            .into_outcome(R::ITEM_KEYS)?
            .into_result(&format!("Failed to update {}", R::NAME))
    }

    /// Update where the backend may answer without echoing the record
    pub async fn update_ack(&self, id: i64, body: RequestBody) -> Result<Acknowledgement> {
        self.api
            .put(&R::item_path(id), body)
            .await?
            .into_acknowledgement()
            .into_result(&format!("Failed to update {}", R::NAME))
    }

    pub async fn remove(&self, id: i64) -> Result<Acknowledgement> {
        self.api
            .delete(&R::item_path(id))
            .await?
            .into_acknowledgement()
            .into_result(&format!("Failed to delete {}", R::NAME))
    }

    /// GET a sub-resource of one item, e.g. `/{id}/urls`
    pub async fn get_nested<T: DeserializeOwned>(&self, id: i64, suffix: &str, keys: &[&str]) -> Result<T> {
        self.api
            .get(&format!("{}/{}", R::item_path(id), suffix))
            .await?
            .into_outcome(keys)?
            .into_result(&format!("Failed to load {} {}", R::NAME, suffix))
    }

    /// POST an action on one item, e.g. `/{id}/send-message`
    pub async fn post_action(&self, id: i64, action: &str, body: RequestBody) -> Result<Acknowledgement> {
        self.api
            .post(&format!("{}/{}", R::item_path(id), action), body)
            .await?
            .into_acknowledgement()
            .into_result(&format!("Failed to {} {}", action.replace('-', " "), R::NAME))
    }

    /// POST to a collection-level action, e.g. `/bulk-approve`
    pub async fn post_collection_action(&self, action: &str, body: RequestBody) -> Result<Acknowledgement> {
        self.api
            .post(&format!("{}/{}", R::PATH, action), body)
            .await?
            .into_acknowledgement()
            .into_result(&format!("Failed to {} {}s", action.replace('-', " "), R::NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Note {
        id: i64,
        title: String,
        pinned: bool,
        author: Option<String>,
        tags: Vec<String>,
    }

    impl Resource for Note {
        const NAME: &'static str = "note";
        const PATH: &'static str = "/api/notes";

        fn id(&self) -> i64 {
            self.id
        }
    }

    #[test]
    fn test_default_search_fields_stringify_scalars_only() {
        let note = Note {
            id: 42,
            title: "Quarterly".to_string(),
            pinned: true,
            author: None,
            tags: vec!["hidden".to_string()],
        };

        let mut fields = note.search_fields();
        fields.sort();
        assert_eq!(fields, vec!["42", "Quarterly", "true"]);
    }

    #[test]
    fn test_search_fields_skip_nested_objects_and_keep_false() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct Thread {
            id: i64,
            archived: bool,
            conversation_data: serde_json::Value,
        }

        impl Resource for Thread {
            const NAME: &'static str = "thread";
            const PATH: &'static str = "/api/threads";

            fn id(&self) -> i64 {
                self.id
            }
        }

        let thread = Thread {
            id: 3,
            archived: false,
            conversation_data: serde_json::json!({"step": "nested-only"}),
        };

        let mut fields = thread.search_fields();
        fields.sort();
        assert_eq!(fields, vec!["3", "false"]);
    }

    #[test]
    fn test_item_path() {
        assert_eq!(Note::item_path(7), "/api/notes/7");
    }
}
