//! Error types for template resolution and envelope field access.

use thiserror::Error;

/// Errors that can occur while expanding a path template.
///
/// These indicate a mismatch between a template and the parameters supplied
/// at the call site, and are raised before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("No value supplied for placeholder '{0}'")]
    MissingParameter(String),

    #[error("Parameter '{0}' does not match any placeholder in the template")]
    UnusedParameter(String),

    #[error("Unterminated placeholder starting at byte {0}")]
    UnterminatedPlaceholder(usize),
}

/// Errors that can occur while reading fields out of a response envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Field '{field}' has the wrong shape: expected {expected}")]
    WrongShape {
        field: String,
        expected: &'static str,
    },

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),
}

impl EnvelopeError {
    pub(crate) fn wrong_shape(field: &str, expected: &'static str) -> Self {
        Self::WrongShape {
            field: field.to_string(),
            expected,
        }
    }
}
