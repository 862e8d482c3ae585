//! Contact submission service

use crate::api::{Acknowledgement, ApiClient, RequestBody, ResourceClient};
use crate::models::{ContactReply, ContactSubmission, UpdateContactRequest};
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::log_admin_action;

#[derive(Clone, Debug)]
pub struct ContactService {
    submissions: ResourceClient<ContactSubmission>,
}

impl ContactService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            submissions: ResourceClient::new(api),
        }
    }

    pub async fn update(&self, id: i64, request: &UpdateContactRequest) -> Result<ContactSubmission> {
        let updated = self.submissions.update(id, RequestBody::json(request)?).await?;
        log_admin_action(None, "update_contact", Some(&id.to_string()), None);
        Ok(updated)
    }

    /// Email a reply to the submitter
    pub async fn reply(&self, id: i64, reply: &ContactReply) -> Result<Acknowledgement> {
        if reply.subject.trim().is_empty() || reply.message.trim().is_empty() {
            return Err(AdminError::InvalidInput("Subject and message are required".to_string()));
        }
        let ack = self
            .submissions
            .post_action(id, "send-message", RequestBody::json(reply)?)
            .await?;
        log_admin_action(None, "reply_contact", Some(&id.to_string()), Some(&reply.subject));
        Ok(ack)
    }
}
