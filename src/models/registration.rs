//! Bot-registered user model
//!
//! Users who registered through the Telegram bot. Access to the products
//! is granted by an approval window (`approved_from .. approved_to`).

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use crate::api::Resource;
use super::de;

/// Length of the approval window granted by bulk approval
pub const APPROVAL_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRegistration {
    pub id: i64,
    #[serde(default, deserialize_with = "de::flexible_string")]
    pub telegram_user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_opt_string")]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub conversation_data: serde_json::Value,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub approved: bool,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub approved_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub approved_to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub is_admin: bool,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Approval state shown in the users table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Expired,
}

impl ApprovalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Expired => "Expired",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => Some(ApprovalStatus::Approved),
            "pending" => Some(ApprovalStatus::Pending),
            "expired" => Some(ApprovalStatus::Expired),
            _ => None,
        }
    }
}

impl BotRegistration {
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        if !full.trim().is_empty() {
            full
        } else if let Some(username) = &self.username {
            format!("@{}", username)
        } else {
            self.telegram_user_id.clone()
        }
    }

    /// Approved, but the window already ended
    pub fn is_approval_expired(&self, now: DateTime<Utc>) -> bool {
        match (self.approved, self.approved_to) {
            (true, Some(until)) => until < now,
            _ => false,
        }
    }

    pub fn approval_status(&self, now: DateTime<Utc>) -> ApprovalStatus {
        if !self.approved {
            ApprovalStatus::Pending
        } else if self.is_approval_expired(now) {
            ApprovalStatus::Expired
        } else {
            ApprovalStatus::Approved
        }
    }

    /// Mirror a bulk approval locally: approving opens a fresh window
    /// starting `now`, revoking clears it
    pub fn apply_approval(&mut self, approved: bool, now: DateTime<Utc>) {
        self.approved = approved;
        if approved {
            self.approved_from = Some(now);
            self.approved_to = Some(now + Duration::days(APPROVAL_WINDOW_DAYS));
        } else {
            self.approved_from = None;
            self.approved_to = None;
        }
    }
}

impl Resource for BotRegistration {
    const NAME: &'static str = "user";
    const PATH: &'static str = "/api/bot-registrations";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Editable fields of a registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRegistrationRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub approved: bool,
    pub approved_from: Option<DateTime<Utc>>,
    pub approved_to: Option<DateTime<Utc>>,
    pub is_admin: bool,
    pub account_type: Option<String>,
}

impl From<&BotRegistration> for UpdateRegistrationRequest {
    fn from(user: &BotRegistration) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            approved: user.approved,
            approved_from: user.approved_from,
            approved_to: user.approved_to,
            is_admin: user.is_admin,
            account_type: user.account_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkApproveRequest {
    pub user_ids: Vec<i64>,
    pub approved: bool,
}

/// Aggregate counters from `/bot-registrations-stats/statistics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub admin_users: u64,
    #[serde(default)]
    pub approved_users: u64,
    #[serde(default)]
    pub pending_users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn registration() -> BotRegistration {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "telegram_user_id": 5550001,
            "username": "trader",
            "first_name": null,
            "approved": false,
            "is_admin": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_numeric_telegram_id_is_accepted() {
        let user = registration();
        assert_eq!(user.telegram_user_id, "5550001");
        assert_eq!(user.display_name(), "@trader");
    }

    #[test]
    fn test_apply_approval_opens_thirty_day_window() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let mut user = registration();

        user.apply_approval(true, now);
        assert!(user.approved);
        assert_eq!(user.approved_from, Some(now));
        assert_eq!(user.approved_to, Some(Utc.with_ymd_and_hms(2025, 5, 31, 0, 0, 0).unwrap()));
        assert_eq!(user.approval_status(now), ApprovalStatus::Approved);

        user.apply_approval(false, now);
        assert!(user.approved_from.is_none());
        assert_eq!(user.approval_status(now), ApprovalStatus::Pending);
    }

    #[test]
    fn test_expired_approval() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let mut user = registration();
        user.apply_approval(true, now - Duration::days(40));
        assert!(user.is_approval_expired(now));
        assert_eq!(user.approval_status(now).label(), "Expired");
    }
}
