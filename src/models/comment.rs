//! Customer comment (testimonial) model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::api::Resource;
use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerComment {
    pub id: i64,
    #[serde(deserialize_with = "de::flexible_i64")]
    pub star_count: i64,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub comment_text: String,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub commenter_name: String,
    #[serde(default)]
    pub commenter_job: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CustomerComment {
    /// Star rating clamped to 1..=5, rendered as a bar
    pub fn stars(&self) -> String {
        let filled = self.star_count.clamp(1, 5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Resource for CustomerComment {
    const NAME: &'static str = "comment";
    const PATH: &'static str = "/api/customer-comments";

    fn id(&self) -> i64 {
        self.id
    }
}
