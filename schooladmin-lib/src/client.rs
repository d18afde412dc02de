//! Main SchoolClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::api::CLASSES_PATH;
use crate::api::Envelope;
use crate::api::ListRequest;
use crate::api::ListResult;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::ClassRef;
use crate::page::ClassSource;
use crate::page::ListRecord;
use crate::page::RecordSource;

/// Client for the school backend's collection endpoints.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use schooladmin_lib::SchoolClient;
///
/// let client = SchoolClient::builder()
///     .url("http://127.0.0.1:8000")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let classes = client.fetch_classes().await?;
/// ```
#[derive(Clone)]
pub struct SchoolClient {
    inner: Arc<SchoolClientInner>,
}

struct SchoolClientInner {
    base_url: Url,
    api_prefix: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl SchoolClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SchoolClientBuilder<Missing> {
        SchoolClientBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the API prefix, e.g. `/api/v1`.
    pub fn api_prefix(&self) -> &str {
        &self.inner.api_prefix
    }

    /// Builds the full URL of an endpoint with query parameters.
    pub fn endpoint_url<K, V>(&self, path: &str, query: &[(K, V)]) -> Result<Url, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let joined = format!(
            "{}/{}",
            self.inner.api_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = self
            .inner
            .base_url
            .join(&joined)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", joined, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key.as_ref(), value.as_ref());
            }
        }
        Ok(url)
    }

    /// Fetches one page of a collection.
    pub async fn fetch_page<R: ListRecord>(&self, request: &ListRequest) -> Result<ListResult<R>, Error> {
        let url = self.endpoint_url(request.resource.path(), &request.query_pairs())?;
        let envelope = self.get_envelope(url).await?;
        let (records, total) = envelope.decode::<R>()?;
        Ok(ListResult::new(records, request.page, total, request.limit))
    }

    /// Fetches the full class collection.
    pub async fn fetch_classes(&self) -> Result<Vec<ClassRef>, Error> {
        let url = self.endpoint_url::<&str, &str>(CLASSES_PATH, &[])?;
        let envelope = self.get_envelope(url).await?;
        let (classes, _) = envelope.decode()?;
        Ok(classes)
    }

    /// Issues a GET and unwraps the response envelope.
    ///
    /// Non-success statuses and `{"status": "error"}` bodies both become errors.
    async fn get_envelope(&self, url: Url) -> Result<Envelope, Error> {
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url.clone());
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            log::debug!("GET {} -> {}", url, status);
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message).into());
        }

        Ok(Envelope::from_body(&body)?)
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

impl std::fmt::Debug for SchoolClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchoolClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("api_prefix", &self.inner.api_prefix)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

#[async_trait]
impl<R: ListRecord> RecordSource<R> for SchoolClient {
    async fn fetch_page(&self, request: &ListRequest) -> Result<ListResult<R>, Error> {
        SchoolClient::fetch_page(self, request).await
    }
}

#[async_trait]
impl ClassSource for SchoolClient {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, Error> {
        SchoolClient::fetch_classes(self).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Default API prefix of the school backend.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Builder for constructing a [`SchoolClient`].
///
/// Uses the typestate pattern to ensure the backend URL is set at compile time.
pub struct SchoolClientBuilder<U> {
    url: U,
    api_prefix: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl SchoolClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend URL, e.g. `http://127.0.0.1:8000`.
    pub fn url(self, url: impl Into<String>) -> SchoolClientBuilder<Set<String>> {
        SchoolClientBuilder {
            url: Set(url.into()),
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for SchoolClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> SchoolClientBuilder<U> {
    /// Sets the API prefix.
    ///
    /// Defaults to `/api/v1`.
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl SchoolClientBuilder<Set<String>> {
    /// Builds the [`SchoolClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<SchoolClient, Error> {
        let raw = self.url.0;
        let base_url = Url::parse(&raw).map_err(|e| Error::Config(format!("invalid backend URL '{}': {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("backend URL '{}' cannot be a base", raw)));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?
            }
        };

        let mut api_prefix = self.api_prefix;
        if !api_prefix.starts_with('/') {
            api_prefix.insert(0, '/');
        }

        Ok(SchoolClient {
            inner: Arc::new(SchoolClientInner {
                base_url,
                api_prefix,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = SchoolClient::builder().url("http://127.0.0.1:8000").build().unwrap();
        let url = client
            .endpoint_url("students", &[("page", "1"), ("sort", "name:asc"), ("search", "a b")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/v1/students?page=1&sort=name%3Aasc&search=a+b"
        );
    }

    #[test]
    fn test_custom_prefix_without_slash() {
        let client = SchoolClient::builder()
            .url("http://school.test")
            .api_prefix("api/v2")
            .build()
            .unwrap();
        assert_eq!(client.api_prefix(), "/api/v2");
        let url = client.endpoint_url::<&str, &str>(CLASSES_PATH, &[]).unwrap();
        assert_eq!(url.as_str(), "http://school.test/api/v2/classes");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = SchoolClient::builder().url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
