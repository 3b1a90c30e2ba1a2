//! listmonk API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Endpoint-level operations live on the model types and in [`crate::routes`].

use std::env;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{ListmonkError, Result};
use crate::multipart::MultipartForm;
use crate::query;

const USER_AGENT: &str = concat!("listmonk-api/", env!("CARGO_PKG_VERSION"));

/// A single HTTP call described as data.
///
/// Built per call by [`crate::Endpoint`] (or by hand for endpoints this
/// crate does not cover) and consumed by [`ListmonkClient::execute`].
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
}

#[derive(Debug)]
pub(crate) enum RequestBody {
    Json(Vec<u8>),
    Multipart(MultipartForm),
}

impl Request {
    /// A request with no query and no body. `path` is relative to the base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Encode `params` into the query string.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        self.query = query::encode(params)?;
        Ok(self)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(ListmonkError::Encode)?;
        self.body = Some(RequestBody::Json(bytes));
        Ok(self)
    }

    /// Send `form` as a multipart body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if this request carries one.
    pub fn json_body(&self) -> Option<&[u8]> {
        match &self.body {
            Some(RequestBody::Json(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

/// Settings a [`ListmonkClient`] is built from.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use listmonk_api::ClientConfig;
///
/// # fn example() -> listmonk_api::Result<()> {
/// let client = ClientConfig::new("http://localhost:9000", "api-user", "secret")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    api_user: String,
    token: String,
    http: Option<Client>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_user", &self.api_user)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_user: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_user: api_user.into(),
            token: token.into(),
            http: None,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Read `LISTMONK_URL`, `LISTMONK_API_USER` and `LISTMONK_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ListmonkError::ConfigMissing`] if any of them is unset.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            env::var(name).map_err(|_| {
                ListmonkError::ConfigMissing(format!("{name} environment variable not set"))
            })
        };

        Ok(Self::new(
            var("LISTMONK_URL")?,
            var("LISTMONK_API_USER")?,
            var("LISTMONK_API_TOKEN")?,
        ))
    }

    /// Use a caller-supplied HTTP client. Timeout and user agent settings are
    /// then the caller's responsibility.
    #[must_use]
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Total request timeout for the default HTTP client. Unset by default,
    /// so a call waits as long as the server takes.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// User agent for the default HTTP client.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<ListmonkClient> {
        ListmonkClient::with_config(self)
    }
}

/// Low-level listmonk API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update` and `Delete`
/// traits on model types and as functions in the model modules.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use listmonk_api::ListmonkClient;
///
/// # async fn example() -> listmonk_api::Result<()> {
/// // Create from environment variables
/// let client = ListmonkClient::from_env()?;
///
/// // Or configure manually
/// let client = ListmonkClient::new("http://localhost:9000", "api-user", "secret")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ListmonkClient {
    http: Client,
    base_url: Arc<Url>,
    auth: Arc<str>,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for ListmonkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListmonkClient")
            .field("base_url", &self.base_url.as_str())
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl ListmonkClient {
    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or the URL is invalid.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env()?.build()
    }

    /// Start a [`ClientConfig`] for finer control over the HTTP transport.
    pub fn builder(
        base_url: impl Into<String>,
        api_user: impl Into<String>,
        token: impl Into<String>,
    ) -> ClientConfig {
        ClientConfig::new(base_url, api_user, token)
    }

    /// Create a new client with the default HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root URL of the listmonk install (e.g., `http://localhost:9000`)
    /// * `api_user` - API user name
    /// * `token` - API token for that user
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, api_user: &str, token: &str) -> Result<Self> {
        ClientConfig::new(base_url, api_user, token).build()
    }

    /// Create a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Paths are joined onto the base, which only works with a trailing /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = match config.http {
            Some(http) => http,
            None => {
                let mut builder = Client::builder()
                    .user_agent(config.user_agent)
                    .brotli(true)
                    .gzip(true)
                    .deflate(true);
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        let auth = format!("token {}:{}", config.api_user, config.token);

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth: Arc::from(auth),
            cancel: None,
        })
    }

    /// A handle whose calls fail with [`ListmonkError::Cancelled`] once
    /// `token` is cancelled. The connection pool is shared with `self`.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Perform exactly one HTTP round trip.
    ///
    /// The response is returned whatever its status; status handling belongs
    /// to [`crate::envelope::decode`].
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.cancellable(self.send(request)).await
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let mut url = self.url(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut builder = self
            .http
            .request(request.method, url)
            .header(AUTHORIZATION, &*self.auth);

        builder = match request.body {
            Some(RequestBody::Json(bytes)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bytes),
            Some(RequestBody::Multipart(form)) => builder.multipart(form.into_form().await?),
            None => builder,
        };

        let response = builder.send().await?;
        tracing::debug!(status = %response.status(), "listmonk responded");
        Ok(response)
    }

    /// Run `fut` unless this handle's token is, or becomes, cancelled.
    pub(crate) async fn cancellable<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match &self.cancel {
            None => fut.await,
            Some(token) => {
                if token.is_cancelled() {
                    return Err(ListmonkError::Cancelled);
                }
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::debug!("request cancelled");
                        Err(ListmonkError::Cancelled)
                    }
                    result = fut => result,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ListmonkClient::new("http://localhost:9000", "api", "test-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ListmonkClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_config_debug_hides_token() {
        let config = ClientConfig::new("http://localhost:9000", "api", "test-token");
        let debug = format!("{:?}", config);
        assert!(debug.contains("api"));
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_timeout_is_opt_in() {
        let config = ClientConfig::new("http://localhost:9000", "u", "t");
        assert_eq!(config.timeout, None);

        let config = config.timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ListmonkClient::new("http://localhost:9000/sub", "u", "t").unwrap();
        let client2 = ListmonkClient::new("http://localhost:9000/sub/", "u", "t").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ListmonkClient::new("http://localhost:9000/listmonk", "u", "t").unwrap();
        let url = client.url("/api/subscribers/3").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/listmonk/api/subscribers/3");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ListmonkClient::new("not a url", "u", "t").unwrap_err();
        assert!(matches!(err, ListmonkError::Url(_)));
    }

    #[test]
    fn test_request_builders() {
        #[derive(Serialize)]
        struct Ids {
            id: Vec<u64>,
        }
        let request = Request::new(Method::DELETE, "/api/bounces")
            .query(&Ids { id: vec![1, 2] })
            .unwrap();
        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(request.query_pairs().len(), 2);
        assert!(request.json_body().is_none());

        let request = Request::new(Method::POST, "/api/tx")
            .json(&serde_json::json!({"template_id": 3}))
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(request.json_body().unwrap()).unwrap();
        assert_eq!(body["template_id"], 3);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let client = ListmonkClient::new("http://127.0.0.1:9", "u", "t")
            .unwrap()
            .with_cancellation(token);

        let err = client
            .execute(Request::new(Method::GET, "/api/lists"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListmonkError::Cancelled));
    }
}
