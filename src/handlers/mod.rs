//! Screen handlers module
//!
//! This module contains one handler per screen of the admin console:
//! - Public screens (testimonials, products, contact forms)
//! - The login screen and member dashboard
//! - Admin resource screens built on [`resource::ResourceScreen`]

pub mod comments;
pub mod contacts;
pub mod dashboard;
pub mod login;
pub mod public;
pub mod resource;
pub mod users;
pub mod videos;

use std::fmt;
use std::sync::Arc;
use crate::config::FeaturesConfig;
use crate::middleware::{Access, AccessGuard, AccessLevel};
use crate::models::SessionUser;
use crate::services::{AssumeYes, Confirmer, Notifier, ServiceFactory};
use crate::state::SessionStore;

pub use comments::CommentsScreen;
pub use contacts::ContactsScreen;
pub use dashboard::DashboardView;
pub use login::LoginScreen;
pub use public::{ContactFormScreen, ContactTarget, ProductCatalog, TestimonialsView};
pub use resource::ResourceScreen;
pub use users::UsersScreen;
pub use videos::{VideoDetail, VideoEditor, VideosScreen};

/// Screens reachable in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    Products,
    Testimonials,
    Contact,
    Videos,
    VideoView(i64),
    AddVideo,
    EditVideo(i64),
    Contacts,
    Users,
    Comments,
}

impl Route {
    pub fn access(&self) -> AccessLevel {
        match self {
            Route::Home | Route::Login | Route::Products | Route::Testimonials | Route::Contact => AccessLevel::Public,
            Route::Dashboard => AccessLevel::Authenticated,
            _ => AccessLevel::Admin,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Products => "/products".to_string(),
            Route::Testimonials => "/success-stories".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Videos => "/list-video".to_string(),
            Route::VideoView(id) => format!("/view-video/{}", id),
            Route::AddVideo => "/add-video".to_string(),
            Route::EditVideo(id) => format!("/edit-video/{}", id),
            Route::Contacts => "/contact-management".to_string(),
            Route::Users => "/user-management".to_string(),
            Route::Comments => "/manage-comments".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of opening a guarded screen
#[derive(Debug)]
pub enum Mounted<T> {
    Screen(T),
    Redirect(Route),
    Denied(String),
}

impl<T> Mounted<T> {
    pub fn screen(self) -> Option<T> {
        match self {
            Mounted::Screen(screen) => Some(screen),
            _ => None,
        }
    }
}

/// Run the access guard; `Err` carries the non-screen outcome
pub(crate) fn admit<T>(session: &SessionStore, level: AccessLevel) -> Result<Option<SessionUser>, Mounted<T>> {
    match AccessGuard::check(session, level) {
        Access::Granted(user) => Ok(user),
        Access::LoginRequired => Err(Mounted::Redirect(Route::Login)),
        Access::Denied(reason) => Err(Mounted::Denied(reason)),
    }
}

/// Everything a screen needs from the surrounding program
#[derive(Clone)]
pub struct ScreenContext {
    pub services: ServiceFactory,
    pub notifier: Notifier,
    pub confirmer: Arc<dyn Confirmer>,
    pub features: FeaturesConfig,
}

impl ScreenContext {
    pub fn new(services: ServiceFactory, notifier: Notifier, confirmer: Arc<dyn Confirmer>, features: FeaturesConfig) -> Self {
        Self {
            services,
            notifier,
            confirmer,
            features,
        }
    }

    /// Ask before a destructive action unless confirmation is disabled
    pub fn confirm(&self, prompt: &str) -> bool {
        if !self.features.confirm_destructive {
            return AssumeYes.confirm(prompt);
        }
        self.confirmer.confirm(prompt)
    }
}

/// One navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// Menu for the current session
pub fn navigation(session: &SessionStore) -> Vec<NavItem> {
    let mut items = vec![
        NavItem { label: "Home", route: Route::Home },
        NavItem { label: "Products", route: Route::Products },
        NavItem { label: "Success Stories", route: Route::Testimonials },
        NavItem { label: "Contact", route: Route::Contact },
    ];

    match session.current_user() {
        Some(user) if user.is_admin => items.extend([
            NavItem { label: "Add Video", route: Route::AddVideo },
            NavItem { label: "Video List", route: Route::Videos },
            NavItem { label: "Manage Comments", route: Route::Comments },
            NavItem { label: "Contact Management", route: Route::Contacts },
            NavItem { label: "User Management", route: Route::Users },
        ]),
        Some(_) => items.push(NavItem { label: "Dashboard", route: Route::Dashboard }),
        None => items.push(NavItem { label: "Login", route: Route::Login }),
    }

    items
}

/// Banner for the landing menu, returned only once per session
pub fn splash(session: &mut SessionStore) -> Option<String> {
    if !session.take_splash() {
        return None;
    }
    Some(match session.current_user() {
        Some(user) => format!("{}\nWelcome, {}", crate::info(), user.display_name()),
        None => crate::info(),
    })
}
