//! Contact submission model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::api::Resource;
use super::de;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: i64,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub message: String,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for ContactSubmission {
    const NAME: &'static str = "contact submission";
    const PATH: &'static str = "/api/contact-submissions";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Editable fields of a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub role: Option<String>,
    pub message: String,
}

impl From<&ContactSubmission> for UpdateContactRequest {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            name: submission.name.clone(),
            company: submission.company.clone(),
            email: submission.email.clone(),
            role: submission.role.clone(),
            message: submission.message.clone(),
        }
    }
}

/// Email reply sent to a submission's author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactReply {
    pub subject: String,
    pub message: String,
}

/// Public contact form payload, posted by visitors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicContactRequest {
    pub name: String,
    pub company: String,
    pub email: String,
    pub role: String,
    pub message: String,
}
