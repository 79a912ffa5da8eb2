//! # Stratus Core
//!
//! Request-building and response-mapping primitives for the Stratus Cloud API.
//!
//! This crate provides:
//! - Path template resolution with percent-encoding
//! - Read-only envelopes over decoded JSON response bodies
//! - The task handle used to track long-running server-side jobs
//!
//! ## Example
//!
//! ```rust
//! use stratus_core::{resolve_template, Envelope};
//! use serde_json::json;
//!
//! let path = resolve_template(
//!     "{+base_path}/sites/{site}.json",
//!     &[("base_path", "/v1"), ("site", "stage-one:mysite")],
//! ).unwrap();
//! assert_eq!(path, "/v1/sites/stage-one%3Amysite.json");
//!
//! let envelope = Envelope::new(json!({"name": "stage-one:mysite"}));
//! assert_eq!(envelope.str_field("name").unwrap(), "stage-one:mysite");
//! ```

pub mod envelope;
pub mod error;
pub mod task;
pub mod template;

// Re-exports for convenience
pub use envelope::{Collection, Envelope, Resource};
pub use error::{EnvelopeError, TemplateError};
pub use task::{Task, TaskState};
pub use template::resolve_template;
