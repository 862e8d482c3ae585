//! Public site service
//!
//! Endpoints reachable without signing in: testimonials and the two
//! contact forms.

use tracing::info;
use crate::api::{Acknowledgement, ApiClient, ApiOutcome, RequestBody, Resource};
use crate::models::{ContactSubmission, CustomerComment, PublicContactRequest};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::is_plausible_email;

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Clone, Debug)]
pub struct PublicService {
    api: ApiClient,
}

impl PublicService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Testimonials shown on the landing page; an unsuccessful answer
    /// yields an empty list
    pub async fn testimonials(&self) -> Result<Vec<CustomerComment>> {
        let outcome = self
            .api
            .get(CustomerComment::PATH)
            .await?
            .into_outcome::<Vec<CustomerComment>>(CustomerComment::LIST_KEYS)?;
        Ok(match outcome {
            ApiOutcome::Ok(comments) => comments,
            _ => Vec::new(),
        })
    }

    /// Landing page contact form
    pub async fn submit_contact(&self, request: &PublicContactRequest) -> Result<Acknowledgement> {
        validate_contact(request)?;
        let ack = self
            .api
            .post(CONTACT_PATH, RequestBody::json(request)?)
            .await?
            .into_acknowledgement()
            .into_result("Failed to send message")?;
        info!(email = %request.email, "Contact request sent");
        Ok(ack)
    }

    /// Contact page form, stored as a contact submission
    pub async fn submit_contact_submission(&self, request: &PublicContactRequest) -> Result<Acknowledgement> {
        validate_contact(request)?;
        let ack = self
            .api
            .post(ContactSubmission::PATH, RequestBody::json(request)?)
            .await?
            .into_acknowledgement()
            .into_result("Failed to send message")?;
        info!(email = %request.email, "Contact submission stored");
        Ok(ack)
    }
}

fn validate_contact(request: &PublicContactRequest) -> Result<()> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() || request.message.trim().is_empty() {
        return Err(AdminError::InvalidInput("Name, email and message are required".to_string()));
    }
    if !is_plausible_email(&request.email) {
        return Err(AdminError::InvalidInput("Please enter a valid email address".to_string()));
    }
    Ok(())
}
