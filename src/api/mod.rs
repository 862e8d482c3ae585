//! Backend API layer
//!
//! Transport, envelope decoding, request bodies and the generic resource
//! client shared by every admin collection.

pub mod client;
pub mod envelope;
pub mod payload;
pub mod resource;

pub use client::ApiClient;
pub use envelope::{Acknowledgement, ApiOutcome, Envelope, FieldErrors};
pub use payload::{FileAttachment, FormData, RequestBody};
pub use resource::{Resource, ResourceClient};
