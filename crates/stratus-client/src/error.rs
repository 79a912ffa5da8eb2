//! Error types for Cloud API operations.

use thiserror::Error;

use stratus_auth::SignerError;
use stratus_core::{EnvelopeError, TemplateError};

/// Errors surfaced by Cloud API operations.
///
/// Nothing is recovered silently: template and envelope mismatches are
/// programmer errors surfaced immediately, transport failures propagate for
/// the caller to decide on retry, and HTTP status failures carry the raw
/// response body for diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Client error ({status}): {body}")]
    Client { status: u16, body: String },

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Download sink error: {0}")]
    Sink(#[from] std::io::Error),
}
