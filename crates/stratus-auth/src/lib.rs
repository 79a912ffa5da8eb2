//! # Stratus Auth
//!
//! Credentials and request signing for the Stratus Cloud API.
//!
//! Every outbound request carries a keyed signature computed over the HTTP
//! method, the resolved path, and a timestamp. The [`Signer`] trait keeps
//! the algorithm pluggable; [`HmacSigner`] is the scheme the platform
//! deploys today.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use stratus_auth::{Credentials, HmacSigner, Signer, SigningRequest};
//!
//! let signer = HmacSigner::new(Credentials::new("my-client", "my-secret"));
//! let headers = signer.sign(&SigningRequest {
//!     method: "GET",
//!     path: "/v1/sites.json",
//!     timestamp: Utc.timestamp_opt(1357749797, 0).unwrap(),
//! }).unwrap();
//!
//! assert_eq!(headers.len(), 3);
//! ```

mod credentials;
mod signer;

pub use credentials::Credentials;
pub use signer::{
    HmacSigner, Signer, SignerError, SigningRequest, CLIENT_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
