//! Keyed request signatures.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::credentials::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the consumer identifier.
pub const CLIENT_HEADER: &str = "x-stratus-client";

/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "x-stratus-timestamp";

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-stratus-signature";

/// Errors raised by a signer implementation.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// The parts of a resolved request covered by the signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// HTTP method, uppercase.
    pub method: &'a str,

    /// Fully resolved, percent-encoded path including any query string.
    pub path: &'a str,

    /// When the request is being sent.
    pub timestamp: DateTime<Utc>,
}

/// Computes the authentication headers for one outbound request.
///
/// Signing happens exactly once per request, over the final resolved method
/// and path, immediately before transmission. Implementations must be
/// deterministic for fixed inputs.
pub trait Signer: Send + Sync {
    /// Header name/value pairs to attach to the request.
    fn sign(&self, request: &SigningRequest<'_>) -> Result<Vec<(String, String)>, SignerError>;
}

/// HMAC-SHA256 signer keyed by the credential secret.
///
/// The string to sign is `"{method}\n{path}\n{timestamp}"` with the
/// timestamp in RFC 3339 UTC form, and the digest is emitted base64-encoded
/// in [`SIGNATURE_HEADER`] alongside [`CLIENT_HEADER`] and
/// [`TIMESTAMP_HEADER`].
pub struct HmacSigner {
    credentials: Credentials,
}

impl HmacSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    fn format_timestamp(timestamp: DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn string_to_sign(request: &SigningRequest<'_>) -> String {
        format!(
            "{}\n{}\n{}",
            request.method,
            request.path,
            Self::format_timestamp(request.timestamp)
        )
    }
}

impl Signer for HmacSigner {
    fn sign(&self, request: &SigningRequest<'_>) -> Result<Vec<(String, String)>, SignerError> {
        // HMAC-SHA256 accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret().as_bytes())
            .expect("HMAC key length");
        mac.update(Self::string_to_sign(request).as_bytes());
        let digest = mac.finalize().into_bytes();

        Ok(vec![
            (
                CLIENT_HEADER.to_string(),
                self.credentials.identifier().to_string(),
            ),
            (
                TIMESTAMP_HEADER.to_string(),
                Self::format_timestamp(request.timestamp),
            ),
            (SIGNATURE_HEADER.to_string(), BASE64.encode(digest)),
        ])
    }
}
