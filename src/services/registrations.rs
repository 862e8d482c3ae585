//! Bot registration service
//!
//! Users registered through the Telegram bot: listing, statistics, edits
//! and bulk approval.

use tracing::{info, warn};
use crate::api::{Acknowledgement, ApiClient, RequestBody, ResourceClient};
use crate::models::{BotRegistration, BulkApproveRequest, RegistrationStats, UpdateRegistrationRequest};
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::log_admin_action;

pub const STATS_PATH: &str = "/api/bot-registrations-stats/statistics";
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one user";

#[derive(Clone, Debug)]
pub struct RegistrationService {
    registrations: ResourceClient<BotRegistration>,
}

impl RegistrationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            registrations: ResourceClient::new(api),
        }
    }

    pub async fn list(&self) -> Result<Vec<BotRegistration>> {
        self.registrations.list().await
    }

    pub async fn stats(&self) -> Result<RegistrationStats> {
        self.registrations
            .api()
            .get(STATS_PATH)
            .await?
            .into_outcome(&["data"])?
            .into_result("Failed to load user statistics")
    }

    /// Users and statistics fetched concurrently. Only the user list is
    /// required; failed statistics fall back to zeroes.
    pub async fn list_with_stats(&self) -> Result<(Vec<BotRegistration>, RegistrationStats)> {
        let (users, stats) = futures::join!(self.list(), self.stats());
        let stats = match stats {
            Ok(stats) => stats,
            Err(AdminError::Cancelled) => return Err(AdminError::Cancelled),
            Err(e) => {
                warn!(error = %e, "User statistics unavailable");
                RegistrationStats::default()
            }
        };
        Ok((users?, stats))
    }

    pub async fn update(&self, id: i64, request: &UpdateRegistrationRequest) -> Result<BotRegistration> {
        let updated = self.registrations.update(id, RequestBody::json(request)?).await?;
        log_admin_action(None, "update_user", Some(&id.to_string()), None);
        Ok(updated)
    }

    /// Approve or revoke several users in one request
    pub async fn bulk_approve(&self, user_ids: Vec<i64>, approved: bool) -> Result<Acknowledgement> {
        if user_ids.is_empty() {
            return Err(AdminError::InvalidInput(EMPTY_SELECTION_MESSAGE.to_string()));
        }

        let count = user_ids.len();
        let request = BulkApproveRequest { user_ids, approved };
        let ack = self
            .registrations
            .post_collection_action("bulk-approve", RequestBody::json(&request)?)
            .await?;

        info!(count = count, approved = approved, "Bulk approval applied");
        log_admin_action(None, "bulk_approve", None, Some(&format!("{} users, approved={}", count, approved)));
        Ok(ack)
    }
}
