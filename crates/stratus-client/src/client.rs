//! Reqwest-based Stratus Cloud API client.

use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use stratus_auth::{Credentials, HmacSigner, Signer, SigningRequest};
use stratus_core::{Collection, Envelope, Task};

use crate::error::Error;
use crate::request::RequestDescriptor;

/// Production API endpoint.
pub const BASE_URL: &str = "https://cloudapi.stratushosting.net";

/// Version prefix shared by every resource path.
pub const BASE_PATH: &str = "/v1";

/// Where requests are sent: base URL, base path, and default headers.
///
/// Immutable once the client is constructed.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base_url: String,
    base_path: String,
    default_headers: HeaderMap,
}

impl Endpoint {
    /// Create an endpoint configuration.
    ///
    /// The base URL should not include a trailing slash; one is stripped if
    /// present. The base path is substituted into the `{+base_path}` slot of
    /// every path template.
    pub fn new(base_url: impl Into<String>, base_path: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            base_path: base_path.into(),
            default_headers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(BASE_URL, BASE_PATH)
    }
}

/// Stratus Cloud API client.
///
/// Holds no mutable state: the endpoint configuration, credentials, and
/// signer are fixed at construction, so one client is safe to share across
/// concurrent calls.
///
/// # Example
///
/// ```ignore
/// use stratus_client::{CloudClient, Credentials};
///
/// let client = CloudClient::new(Credentials::new("my-client", "my-secret"));
/// let sites = client.sites().await?;
/// ```
pub struct CloudClient {
    http: Client,
    endpoint: Endpoint,
    signer: Arc<dyn Signer>,
}

impl CloudClient {
    /// Create a client for the production endpoint with the platform's
    /// HMAC signing scheme.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_parts(
            Client::new(),
            Endpoint::default(),
            Arc::new(HmacSigner::new(credentials)),
        )
    }

    /// Create a client against a custom endpoint.
    pub fn with_endpoint(endpoint: Endpoint, credentials: Credentials) -> Self {
        Self::with_parts(Client::new(), endpoint, Arc::new(HmacSigner::new(credentials)))
    }

    /// Assemble a client from explicit collaborators: an HTTP transport, an
    /// endpoint configuration, and a signer.
    pub fn with_parts(http: Client, endpoint: Endpoint, signer: Arc<dyn Signer>) -> Self {
        Self {
            http,
            endpoint,
            signer,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Resolve, sign, and send one request.
    ///
    /// The signature is computed over the final resolved method and path
    /// immediately before transmission. Any 4xx response maps to
    /// [`Error::Client`], any 5xx to [`Error::Server`], each carrying the
    /// raw response body.
    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<reqwest::Response, Error> {
        let path = descriptor.resolve(self.endpoint.base_path())?;
        let url = format!("{}{}", self.endpoint.base_url(), path);

        let timestamp = Utc::now();
        let signature = self.signer.sign(&SigningRequest {
            method: descriptor.method().as_str(),
            path: &path,
            timestamp,
        })?;

        let mut request = self
            .http
            .request(descriptor.method().clone(), &url)
            .headers(self.endpoint.default_headers().clone());
        for (name, value) in &signature {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = descriptor.body() {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;

        let status = response.status();
        if status.is_client_error() {
            return Err(Error::Client {
                status: status.as_u16(),
                body: response.text().await?,
            });
        }
        if status.is_server_error() {
            return Err(Error::Server {
                status: status.as_u16(),
                body: response.text().await?,
            });
        }

        Ok(response)
    }

    /// Perform an exchange and decode the body into an envelope.
    ///
    /// The facade methods all pass through here; it is public so endpoints
    /// without a wrapper yet can still be called with a hand-built
    /// [`RequestDescriptor`].
    pub async fn fetch_envelope(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<Envelope, Error> {
        let response = self.dispatch(&descriptor).await?;
        let body = response.bytes().await?;
        Ok(Envelope::from_slice(&body)?)
    }

    /// Perform an exchange and decode the body into a collection.
    pub async fn fetch_collection<T: From<Envelope>>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<Collection<T>, Error> {
        let envelope = self.fetch_envelope(descriptor).await?;
        Ok(Collection::from_value(envelope.into_value())?)
    }

    /// Perform an exchange and wrap the body as a task handle.
    pub async fn fetch_task(&self, descriptor: RequestDescriptor) -> Result<Task, Error> {
        Ok(Task::from(self.fetch_envelope(descriptor).await?))
    }

    /// Perform an exchange and stream the raw body to `sink`, bypassing
    /// JSON decoding.
    pub async fn fetch_download<W>(
        &self,
        descriptor: RequestDescriptor,
        sink: &mut W,
    ) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        let mut response = self.dispatch(&descriptor).await?;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.base_url(), "https://cloudapi.stratushosting.net");
        assert_eq!(endpoint.base_path(), "/v1");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let endpoint = Endpoint::new("https://api.example.com/", "/v1");
        assert_eq!(endpoint.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_default_headers_carry_content_type() {
        let endpoint = Endpoint::default();
        assert_eq!(
            endpoint.default_headers().get(CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_client_exposes_endpoint() {
        let client = CloudClient::new(Credentials::new("id", "secret"));
        assert_eq!(client.endpoint().base_path(), "/v1");
    }
}
