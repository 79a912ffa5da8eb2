//! API credential pair.

use std::fmt;

/// Credentials identifying an API consumer.
///
/// Immutable once constructed. The signer holds the only copy; nothing else
/// in the client reads the secret.
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Public identifier sent with each request.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Shared secret used as the signing key.
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}
