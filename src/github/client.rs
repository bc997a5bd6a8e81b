//! GitHub API client.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ApiMode, DEFAULT_API_URL, ToolConfig};
use crate::error::{Result, ToolError};

/// Client for interacting with the GitHub API.
///
/// Read calls are sent anonymously. The token, when present, is attached to
/// write calls only.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) token: Option<String>,
    pub(crate) base_url: String,
    pub(crate) mode: ApiMode,
    pub(crate) client: Client,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Create an anonymous client for the public GitHub API.
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_API_URL.into(),
            mode: ApiMode::Direct,
            client: Client::new(),
        }
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &ToolConfig) -> Self {
        let mut client = Self::new()
            .with_base_url(&config.api.base_url)
            .with_mode(config.api.mode);
        if let Some(token) = &config.token {
            client = client.with_token(token);
        }
        client
    }

    /// Attach a bearer token for write calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Point the client at GitHub Enterprise or a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Select how repository creation is addressed.
    pub fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the headers for a request.
    pub(crate) fn headers(&self, authenticated: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("github-tool"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        if authenticated {
            if let Some(token) = &self.token {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| ToolError::InvalidConfig("Invalid token format".into()))?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make an anonymous GET request to the GitHub API.
    pub(crate) fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let request = self.client.get(&url).headers(self.headers(false)?);
        self.send(request)
    }

    /// Make an authenticated POST request to the GitHub API.
    pub(crate) fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let request = self
            .client
            .post(&url)
            .headers(self.headers(true)?)
            .json(body);
        self.send(request)
    }

    /// Make an authenticated PUT request to the GitHub API.
    pub(crate) fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "PUT");
        let request = self
            .client
            .put(&url)
            .headers(self.headers(true)?)
            .json(body);
        self.send(request)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    /// The configured token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API mode.
    pub fn mode(&self) -> ApiMode {
        self.mode
    }
}

/// Turn a non-success response into an [`ToolError::Api`].
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(ToolError::Api {
        status: status.as_u16(),
        message: api_message(&body),
    })
}

/// Pull GitHub's `message` field out of an error body, or return the raw body.
fn api_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ApiErrorBody {
        message: String,
    }

    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}
