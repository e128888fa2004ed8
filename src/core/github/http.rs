//! Blocking HTTP transport backed by `reqwest`.

use reqwest::blocking::Client;
use tracing::trace;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::core::constants;
use crate::error::ApiError;

/// Transport against a real GitHub REST host.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Build a transport for `base_url` (no trailing slash needed).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transient` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(constants::REQUEST_TIMEOUT)
            .connect_timeout(constants::REQUEST_TIMEOUT)
            .user_agent(concat!("ghcrew/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transient {
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Transport for the host named by `GITHUB_API_URL`, or api.github.com.
    pub fn from_env() -> Result<Self, ApiError> {
        let base = std::env::var(constants::API_BASE_URL_ENV)
            .unwrap_or_else(|_| constants::API_BASE_URL.to_string());
        Self::new(&base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        };
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(method, &url)
            .bearer_auth(request.token)
            .header("Accept", constants::ACCEPT)
            .header("X-GitHub-Api-Version", constants::API_VERSION);
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| ApiError::Transient {
            reason: describe(&e),
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().map_err(|e| ApiError::Transient {
            reason: describe(&e),
        })?;

        trace!(status, body_len = body.len(), "received");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Short, user-facing description of a transport failure.
fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}
