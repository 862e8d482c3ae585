//! Bot-registered users management screen
//!
//! Users and statistics are loaded together. Bulk approval is mirrored into
//! the selected rows right away and the statistics are then refetched.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use crate::middleware::AccessLevel;
use crate::models::{ApprovalStatus, BotRegistration, RegistrationStats, UpdateRegistrationRequest};
use crate::services::{RegistrationService, EMPTY_SELECTION_MESSAGE};
use crate::state::SessionStore;
use crate::utils::errors::{AdminError, Result};
use super::{admit, Mounted, ResourceScreen, ScreenContext};

const STATUS: &str = "status";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

pub struct UsersScreen {
    screen: ResourceScreen<BotRegistration>,
    service: RegistrationService,
    stats: RegistrationStats,
}

impl UsersScreen {
    pub async fn mount(ctx: &ScreenContext, session: &SessionStore) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }

        let mut screen = ResourceScreen::new(ctx);
        let service = RegistrationService::new(screen.api().clone());
        let (users, stats) = match service.list_with_stats().await {
            Ok(pair) => pair,
            Err(e) => return Err(screen.report(e, "list")),
        };
        screen.list_mut().replace_all(users);

        Ok(Mounted::Screen(Self { screen, service, stats }))
    }

    pub fn screen(&self) -> &ResourceScreen<BotRegistration> {
        &self.screen
    }

    pub fn stats(&self) -> &RegistrationStats {
        &self.stats
    }

    pub fn visible(&self) -> Vec<&BotRegistration> {
        self.screen.list().visible()
    }

    pub fn set_search(&mut self, term: &str) {
        self.screen.list_mut().set_search(term);
    }

    /// Restrict rows to one approval status as of `now`
    pub fn set_status_filter(&mut self, status: Option<ApprovalStatus>, now: DateTime<Utc>) {
        let list = self.screen.list_mut();
        match status {
            Some(status) => list.set_filter(STATUS, move |user: &BotRegistration| user.approval_status(now) == status),
            None => {
                list.clear_filter(STATUS);
            }
        }
    }

    pub fn toggle_selected(&mut self, id: i64) {
        self.screen.list_mut().toggle_selected(id);
    }

    pub fn toggle_select_all(&mut self) {
        self.screen.list_mut().toggle_select_all();
    }

    pub fn selected(&self) -> Vec<i64> {
        self.screen.list().selected_ids().iter().copied().collect()
    }

    /// Editable copy of a row
    pub fn draft(&self, id: i64) -> Result<UpdateRegistrationRequest> {
        self.screen
            .list()
            .get(id)
            .map(UpdateRegistrationRequest::from)
            .ok_or_else(|| AdminError::NotFound {
                resource: "user".to_string(),
                id,
            })
    }

    pub async fn update(&mut self, id: i64, request: &UpdateRegistrationRequest) -> Result<()> {
        match self.service.update(id, request).await {
            Ok(updated) => {
                self.screen.apply_update(updated, "User updated successfully!");
                self.refresh_stats().await;
                Ok(())
            }
            Err(e) => Err(self.screen.report(e, "update")),
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let deleted = self.screen.delete(id, DELETE_PROMPT).await?;
        if deleted {
            self.refresh_stats().await;
        }
        Ok(deleted)
    }

    /// Approve or revoke every selected user
    pub async fn bulk_approve(&mut self, approved: bool) -> Result<usize> {
        self.bulk_approve_at(approved, Utc::now()).await
    }

    /// [`bulk_approve`](Self::bulk_approve) with an explicit clock
    pub async fn bulk_approve_at(&mut self, approved: bool, now: DateTime<Utc>) -> Result<usize> {
        let ids = self.screen.list().selected_ids().clone();
        if ids.is_empty() {
            let error = AdminError::InvalidInput(EMPTY_SELECTION_MESSAGE.to_string());
            self.screen.ctx().notifier.error(&error);
            return Err(error);
        }

        let ack = match self.service.bulk_approve(ids.iter().copied().collect(), approved).await {
            Ok(ack) => ack,
            Err(e) => return Err(self.screen.report(e, "bulk approve")),
        };

        let touched = self
            .screen
            .list_mut()
            .update_where(&ids, |user| user.apply_approval(approved, now));
        self.screen.list_mut().clear_selection();
        info!(count = touched, approved = approved, "Approval mirrored locally");

        let fallback = if approved { "Users approved successfully" } else { "User approvals revoked" };
        self.screen.acknowledge(&ack, fallback);
        self.refresh_stats().await;
        Ok(touched)
    }

    /// Statistics are derived server-side; a failed refresh keeps the old ones
    async fn refresh_stats(&mut self) {
        match self.service.stats().await {
            Ok(stats) => self.stats = stats,
            Err(e) => warn!(error = %e, "Failed to refresh user statistics"),
        }
    }
}
