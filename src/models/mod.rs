//! Data models module
//!
//! This module contains the backend resources consumed by the admin client

pub mod de;
pub mod user;
pub mod video;
pub mod contact;
pub mod registration;
pub mod comment;

// Re-export commonly used models
pub use user::{SessionUser, AccountTier, LoginRequest};
pub use video::{Video, VideoUrls, VideoStatusRequest, SHORT_DESCRIPTION_MAX};
pub use contact::{ContactSubmission, UpdateContactRequest, ContactReply, PublicContactRequest};
pub use registration::{BotRegistration, ApprovalStatus, UpdateRegistrationRequest, BulkApproveRequest, RegistrationStats, APPROVAL_WINDOW_DAYS};
pub use comment::CustomerComment;
