//! Session user model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::de;

/// The authenticated identity returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, deserialize_with = "de::flexible_opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::flexible_opt_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_opt_string")]
    pub telegram_user_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub is_admin: bool,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub approved: bool,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub approved_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_datetime")]
    pub approved_to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::flexible_opt_i64")]
    pub days_remaining: Option<i64>,
}

/// Product tier derived from `account_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTier {
    Standard,
    Elite,
    Premium,
    Pro,
}

impl AccountTier {
    pub fn from_account_type(account_type: Option<&str>) -> Self {
        match account_type.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("premium") => AccountTier::Premium,
            Some("elite") => AccountTier::Elite,
            Some("pro") => AccountTier::Pro,
            _ => AccountTier::Standard,
        }
    }
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        if !full.trim().is_empty() {
            return full;
        }
        self.username
            .clone()
            .or_else(|| self.login_id())
            .unwrap_or_else(|| "Member".to_string())
    }

    /// Identifier the user signs in with
    pub fn login_id(&self) -> Option<String> {
        self.user_id.clone().or_else(|| self.telegram_user_id.clone())
    }

    /// Account type as displayed, "Standard" when unset
    pub fn account_label(&self) -> String {
        crate::utils::helpers::or_placeholder(self.account_type.as_deref(), "Standard")
    }

    pub fn tier(&self) -> AccountTier {
        AccountTier::from_account_type(self.account_type.as_deref())
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_user_with_sparse_fields() {
        let user: SessionUser = serde_json::from_value(serde_json::json!({
            "id": 12,
            "telegram_user_id": "998877",
            "is_admin": true,
            "days_remaining": 12.6
        }))
        .unwrap();

        assert_eq!(user.login_id().as_deref(), Some("998877"));
        assert!(user.is_admin);
        assert_eq!(user.days_remaining, Some(12));
        assert_eq!(user.account_label(), "Standard");
        assert_eq!(user.display_name(), "998877");
    }

    #[test]
    fn test_tiers() {
        assert_eq!(AccountTier::from_account_type(Some("Premium")), AccountTier::Premium);
        assert_eq!(AccountTier::from_account_type(Some("elite")), AccountTier::Elite);
        assert_eq!(AccountTier::from_account_type(None), AccountTier::Standard);
    }
}
