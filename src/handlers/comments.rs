//! Customer comment moderation screen

use tracing::warn;
use crate::middleware::AccessLevel;
use crate::models::CustomerComment;
use crate::state::SessionStore;
use crate::utils::errors::{AdminError, Result};
use super::{admit, Mounted, ResourceScreen, ScreenContext};

const STARS: &str = "stars";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this comment?";

pub struct CommentsScreen {
    screen: ResourceScreen<CustomerComment>,
}

impl CommentsScreen {
    pub async fn mount(ctx: &ScreenContext, session: &SessionStore) -> Result<Mounted<Self>> {
        if let Err(mounted) = admit(session, AccessLevel::Admin) {
            return Ok(mounted);
        }

        let mut screen = ResourceScreen::new(ctx);
        screen.refresh().await?;
        Ok(Mounted::Screen(Self { screen }))
    }

    pub fn screen(&self) -> &ResourceScreen<CustomerComment> {
        &self.screen
    }

    pub fn visible(&self) -> Vec<&CustomerComment> {
        self.screen.list().visible()
    }

    pub fn set_search(&mut self, term: &str) {
        self.screen.list_mut().set_search(term);
    }

    /// Show only comments with exactly `stars` stars
    pub fn set_star_filter(&mut self, stars: Option<i64>) -> Result<()> {
        let list = self.screen.list_mut();
        match stars {
            Some(stars) if !(1..=5).contains(&stars) => {
                return Err(AdminError::InvalidInput("Star rating must be between 1 and 5".to_string()));
            }
            Some(stars) => list.set_filter(STARS, move |comment: &CustomerComment| comment.star_count == stars),
            None => {
                list.clear_filter(STARS);
            }
        }
        Ok(())
    }

    /// Delete, then reload the list as the moderation page does.
    /// A failed reload keeps the locally pruned rows.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let deleted = self.screen.delete(id, DELETE_PROMPT).await?;
        if deleted {
            if let Err(e) = self.screen.refresh().await {
                warn!(id = id, error = %e, "Comment list reload failed after delete");
            }
        }
        Ok(deleted)
    }
}
