//! Member dashboard

use std::fmt;
use crate::middleware::AccessLevel;
use crate::models::SessionUser;
use crate::state::SessionStore;
use crate::utils::helpers::{format_date, or_placeholder};
use super::{admit, Mounted};

/// Profile summary of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub name: String,
    pub user_id: String,
    pub account_type: String,
    pub approved: bool,
    pub approval_period: String,
    pub days_remaining: String,
    pub is_admin: bool,
}

impl DashboardView {
    pub fn mount(session: &SessionStore) -> Mounted<Self> {
        match admit(session, AccessLevel::Authenticated) {
            Ok(Some(user)) => Mounted::Screen(Self::from_user(&user)),
            Ok(None) => Mounted::Redirect(super::Route::Login),
            Err(mounted) => mounted,
        }
    }

    pub fn from_user(user: &SessionUser) -> Self {
        let approval_period = match (user.approved_from, user.approved_to) {
            (Some(from), Some(to)) => format!("{} - {}", format_date(Some(from)), format_date(Some(to))),
            _ => "Not specified".to_string(),
        };

        Self {
            name: user.display_name(),
            user_id: or_placeholder(user.login_id().as_deref(), "N/A"),
            account_type: user.account_label(),
            approved: user.approved,
            approval_period,
            days_remaining: user
                .days_remaining
                .map(|days| days.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            is_admin: user.is_admin,
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome back, {}", self.name)?;
        writeln!(f, "  User ID:         {}", self.user_id)?;
        writeln!(f, "  Account type:    {}", self.account_type)?;
        writeln!(f, "  Status:          {}", if self.approved { "Approved" } else { "Pending approval" })?;
        writeln!(f, "  Approval period: {}", self.approval_period)?;
        write!(f, "  Days remaining:  {}", self.days_remaining)?;
        if self.is_admin {
            write!(f, "\n  Role:            Administrator")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_for_missing_profile_fields() {
        let user: SessionUser = serde_json::from_value(serde_json::json!({
            "id": 2,
            "user_id": "77",
            "approved_from": "2025-01-01 00:00:00"
        }))
        .unwrap();

        let view = DashboardView::from_user(&user);
        assert_eq!(view.account_type, "Standard");
        assert_eq!(view.approval_period, "Not specified");
        assert_eq!(view.days_remaining, "N/A");
    }

    #[test]
    fn test_full_profile() {
        let user: SessionUser = serde_json::from_value(serde_json::json!({
            "id": 2,
            "user_id": "77",
            "first_name": "Noor",
            "account_type": "premium",
            "approved": true,
            "approved_from": "2025-01-01 00:00:00",
            "approved_to": "2025-01-31 00:00:00",
            "days_remaining": 9
        }))
        .unwrap();

        let view = DashboardView::from_user(&user);
        assert_eq!(view.name, "Noor");
        assert_eq!(view.approval_period, "Jan 1, 2025 - Jan 31, 2025");
        assert_eq!(view.days_remaining, "9");
    }
}
