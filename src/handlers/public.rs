//! Public screens
//!
//! Testimonials, the product catalogue and the contact forms. None of
//! these require a session; the catalogue only shows more when one exists.

use tracing::{debug, info};
use crate::models::{AccountTier, CustomerComment, PublicContactRequest, SessionUser, Video};
use crate::services::PublicService;
use crate::state::SessionStore;
use crate::utils::errors::Result;
use super::ScreenContext;

/// Landing page testimonials
#[derive(Debug, Clone, Default)]
pub struct TestimonialsView {
    pub comments: Vec<CustomerComment>,
}

impl TestimonialsView {
    /// Failures leave the section empty rather than breaking the page
    pub async fn load(ctx: &ScreenContext) -> Self {
        match ctx.services.public_service.testimonials().await {
            Ok(comments) => Self { comments },
            Err(e) => {
                debug!(error = %e, "Testimonials unavailable");
                Self::default()
            }
        }
    }
}

/// Where a contact form posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTarget {
    /// Landing page form (`/api/contact`)
    Landing,
    /// Contact page form (`/api/contact-submissions`)
    ContactPage,
}

pub struct ContactFormScreen {
    target: ContactTarget,
    service: PublicService,
    ctx: ScreenContext,
}

impl ContactFormScreen {
    pub fn new(ctx: &ScreenContext, target: ContactTarget) -> Self {
        Self {
            target,
            service: ctx.services.public_service.clone(),
            ctx: ctx.clone(),
        }
    }

    pub async fn submit(&self, request: &PublicContactRequest) -> Result<()> {
        let result = match self.target {
            ContactTarget::Landing => self.service.submit_contact(request).await,
            ContactTarget::ContactPage => self.service.submit_contact_submission(request).await,
        };

        match result {
            Ok(ack) => {
                info!(form = ?self.target, "Contact form sent");
                self.ctx
                    .notifier
                    .success(ack.message_or("Message sent. We will contact you as soon as possible."));
                Ok(())
            }
            Err(e) => {
                self.ctx.notifier.error(&e);
                Err(e)
            }
        }
    }
}

/// Product catalogue gated by account tier
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    pub products: Vec<Video>,
    pub total: usize,
}

impl ProductCatalog {
    pub async fn load(ctx: &ScreenContext, session: &SessionStore) -> Result<Self> {
        let videos = match ctx.services.video_service.list().await {
            Ok(videos) => videos,
            Err(e) => {
                ctx.notifier.error(&e);
                return Err(e);
            }
        };
        Ok(Self::for_user(videos, session.current_user()))
    }

    pub fn for_user(videos: Vec<Video>, user: Option<&SessionUser>) -> Self {
        let total = videos.len();
        let limit = visible_products(user);
        Self {
            products: videos.into_iter().take(limit.unwrap_or(usize::MAX)).collect(),
            total,
        }
    }

    pub fn hidden(&self) -> usize {
        self.total - self.products.len()
    }
}

/// How many catalogue entries a visitor sees; `None` means all
pub fn visible_products(user: Option<&SessionUser>) -> Option<usize> {
    match user {
        Some(user) if user.is_admin => None,
        Some(user) => match user.tier() {
            AccountTier::Premium => None,
            AccountTier::Elite => Some(4),
            _ => Some(2),
        },
        None => Some(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(account_type: Option<&str>, is_admin: bool) -> SessionUser {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "account_type": account_type,
            "is_admin": is_admin
        }))
        .unwrap()
    }

    fn videos(count: i64) -> Vec<Video> {
        (1..=count)
            .map(|id| {
                serde_json::from_value(serde_json::json!({"id": id, "title": format!("V{}", id), "video_number": id}))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_tier_gating() {
        assert_eq!(visible_products(None), Some(2));
        assert_eq!(visible_products(Some(&user(Some("elite"), false))), Some(4));
        assert_eq!(visible_products(Some(&user(Some("premium"), false))), None);
        assert_eq!(visible_products(Some(&user(None, true))), None);
        assert_eq!(visible_products(Some(&user(Some("pro"), false))), Some(2));
    }

    #[test]
    fn test_catalog_counts_hidden_products() {
        let catalog = ProductCatalog::for_user(videos(6), Some(&user(Some("elite"), false)));
        assert_eq!(catalog.products.len(), 4);
        assert_eq!(catalog.hidden(), 2);
    }
}
