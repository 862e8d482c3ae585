//! State management module
//!
//! This module handles the session, per-screen collections and form state

pub mod form;
pub mod list;
pub mod scope;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use form::{FieldKind, FieldSpec, FormSchema, FormState, FormStatus, REQUIRED_FIELDS_MESSAGE};
pub use list::{ListView, matches_search};
pub use scope::ViewScope;
pub use session::{SessionState, SessionStore};
pub use storage::{SessionStorage, FileSessionStorage, MemorySessionStorage};
