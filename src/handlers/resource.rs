//! Generic resource management screen
//!
//! Mount, fetch, render rows, confirm, mutate, then patch the local
//! collection and notify. Concrete screens wrap a [`ResourceScreen`] and
//! add their own filters and actions.

use tracing::{debug, info};
use crate::api::{Acknowledgement, ApiClient, Resource, ResourceClient};
use crate::state::{ListView, ViewScope};
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::{log_admin_action, log_api_error};
use super::ScreenContext;

pub struct ResourceScreen<R: Resource> {
    client: ResourceClient<R>,
    list: ListView<R>,
    scope: ViewScope,
    ctx: ScreenContext,
}

impl<R: Resource> ResourceScreen<R> {
    /// Create the screen with a fresh view scope; nothing is fetched yet
    pub fn new(ctx: &ScreenContext) -> Self {
        let scope = ViewScope::new();
        let client = ResourceClient::new(scope.bind(&ctx.services.api));
        Self {
            client,
            list: ListView::new(),
            scope,
            ctx: ctx.clone(),
        }
    }

    /// Client bound to this screen's scope
    pub fn api(&self) -> &ApiClient {
        self.client.api()
    }

    pub fn ctx(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn list(&self) -> &ListView<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<R> {
        &mut self.list
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Replace the collection from the backend
    pub async fn refresh(&mut self) -> Result<usize> {
        match self.client.list().await {
            Ok(items) => {
                let count = items.len();
                self.list.replace_all(items);
                debug!(resource = R::NAME, count = count, "Collection loaded");
                Ok(count)
            }
            Err(e) => Err(self.report(e, "list")),
        }
    }

    /// Confirm, delete on the backend and drop exactly that row.
    /// Returns `false` when the user declined.
    pub async fn delete(&mut self, id: i64, prompt: &str) -> Result<bool> {
        if self.list.get(id).is_none() {
            return Err(AdminError::NotFound {
                resource: R::NAME.to_string(),
                id,
            });
        }
        if !self.ctx.confirm(prompt) {
            debug!(resource = R::NAME, id = id, "Delete declined");
            return Ok(false);
        }

        match self.client.remove(id).await {
            Ok(ack) => {
                self.list.remove(id);
                info!(resource = R::NAME, id = id, "Row deleted");
                log_admin_action(None, &format!("delete_{}", R::NAME.replace(' ', "_")), Some(&id.to_string()), None);
                self.ctx.notifier.success(ack.message_or(&format!("{} deleted successfully", capitalize(R::NAME))));
                Ok(true)
            }
            Err(e) => Err(self.report(e, "delete")),
        }
    }

    /// Patch a row with the record returned by a successful update
    pub fn apply_update(&mut self, item: R, message: &str) {
        self.list.upsert(item);
        self.ctx.notifier.success(message);
    }

    pub fn acknowledge(&self, ack: &Acknowledgement, fallback: &str) {
        self.ctx.notifier.success(ack.message_or(fallback));
    }

    /// Log and surface a failure, handing the error back for propagation
    pub fn report(&self, error: AdminError, action: &str) -> AdminError {
        if !matches!(error, AdminError::Cancelled) {
            log_api_error(R::NAME, &error, Some(action));
        }
        self.ctx.notifier.error(&error);
        error
    }

    /// Cancel whatever is still in flight
    pub fn close(&self) {
        self.scope.close();
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
