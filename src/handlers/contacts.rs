//! Contact submission management screen

use crate::middleware::AccessLevel;
use crate::models::{ContactReply, ContactSubmission, UpdateContactRequest};
use crate::services::ContactService;
use crate::state::SessionStore;
use crate::utils::errors::{AdminError, Result};
use super::{admit, Mounted, ResourceScreen, ScreenContext};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this submission?";

pub struct ContactsScreen {
    screen: ResourceScreen<ContactSubmission>,
    service: ContactService,
}

impl ContactsScreen {
    pub async fn mount(ctx: &ScreenContext, session: &SessionStore) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }

        let mut screen = ResourceScreen::new(ctx);
        let service = ContactService::new(screen.api().clone());
        screen.refresh().await?;
        Ok(Mounted::Screen(Self { screen, service }))
    }

    pub fn screen(&self) -> &ResourceScreen<ContactSubmission> {
        &self.screen
    }

    pub fn visible(&self) -> Vec<&ContactSubmission> {
        self.screen.list().visible()
    }

    pub fn set_search(&mut self, term: &str) {
        self.screen.list_mut().set_search(term);
    }

    /// Editable copy of a row
    pub fn draft(&self, id: i64) -> Result<UpdateContactRequest> {
        self.screen
            .list()
            .get(id)
            .map(UpdateContactRequest::from)
            .ok_or_else(|| AdminError::NotFound {
                resource: "contact submission".to_string(),
                id,
            })
    }

    pub async fn update(&mut self, id: i64, request: &UpdateContactRequest) -> Result<()> {
        match self.service.update(id, request).await {
            Ok(updated) => {
                self.screen.apply_update(updated, "Submission updated successfully!");
                Ok(())
            }
            Err(e) => Err(self.screen.report(e, "update")),
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        self.screen.delete(id, DELETE_PROMPT).await
    }

    /// Send an email reply to the submitter
    pub async fn reply(&self, id: i64, reply: &ContactReply) -> Result<()> {
        match self.service.reply(id, reply).await {
            Ok(ack) => {
                self.screen.acknowledge(&ack, "Message sent successfully!");
                Ok(())
            }
            Err(e) => Err(self.screen.report(e, "send message")),
        }
    }
}
