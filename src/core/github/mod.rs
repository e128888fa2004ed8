//! GitHub REST access.
//!
//! A [`Transport`] moves one request over the wire. A [`PrincipalClient`]
//! binds a transport to a single credential and normalizes results:
//! statuses 200, 201 and 204 are success, everything else (including
//! network failures) is a failure.
//!
//! ## Implementations
//!
//! - [`HttpTransport`]: blocking `reqwest` client against the real host.
//! - `StubTransport`: scripted responses for tests (`test-stub` feature).

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::constants;
use crate::core::types::Principal;
use crate::error::ApiError;

mod http;

#[cfg(any(test, feature = "test-stub"))]
pub mod stub;

pub use http::HttpTransport;

/// HTTP methods used against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        };
        f.write_str(s)
    }
}

/// One outgoing request.
#[derive(Debug, Clone, Copy)]
pub struct ApiRequest<'a> {
    pub method: Method,
    /// Path below the API host, starting with `/`.
    pub path: &'a str,
    pub token: &'a str,
    pub body: Option<&'a Value>,
}

/// A raw response.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        constants::SUCCESS_STATUSES.contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parse the body as JSON. An empty body yields an empty object.
    pub fn json(&self) -> Result<Value, ApiError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Moves a request to the host and back.
///
/// Implementations report only transport-level failures as errors; any
/// HTTP status, including 4xx/5xx, is a successful `ApiResponse`.
pub trait Transport {
    fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse, ApiError>;
}

/// An authenticated client for one principal.
pub struct PrincipalClient<'a> {
    transport: &'a dyn Transport,
    principal: &'a Principal,
}

impl<'a> PrincipalClient<'a> {
    pub fn new(transport: &'a dyn Transport, principal: &'a Principal) -> Self {
        Self {
            transport,
            principal,
        }
    }

    /// Issue a request and keep the full response.
    ///
    /// # Errors
    ///
    /// `ApiError::Transient` on network failure, `ApiError::Rejected` when the
    /// status is not 200, 201 or 204.
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        trace!(%method, endpoint, has_body = body.is_some(), "sending request");

        let response = self.transport.send(&ApiRequest {
            method,
            path: endpoint,
            token: self.principal.token(),
            body,
        })?;

        debug!(%method, endpoint, status = response.status, "response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Rejected {
                status: response.status,
                body: response.body,
            })
        }
    }

    /// Issue a request and return the parsed body, or `None` on any failure.
    ///
    /// Network errors, rejections and undecodable bodies all collapse to
    /// `None`. No retries happen here.
    pub fn call(&self, endpoint: &str, method: Method, body: Option<&Value>) -> Option<Value> {
        match self.request(method, endpoint, body).and_then(|r| r.json()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%method, endpoint, error = %e, "call failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::{StubResponse, StubTransport};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_returns_body_on_success() {
        let stub = StubTransport::new().on(
            Method::Get,
            "/user",
            StubResponse::json(200, json!({"login": "octo"})),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        let body = client.call("/user", Method::Get, None).unwrap();
        assert_eq!(body["login"], "octo");
    }

    #[test]
    fn test_call_empty_body_is_empty_object() {
        let stub = StubTransport::new().on(
            Method::Put,
            "/repos/octo/shared/collaborators/bob",
            StubResponse::empty(204),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        let body = client
            .call("/repos/octo/shared/collaborators/bob", Method::Put, None)
            .unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_call_non_success_status_is_none() {
        for status in [202, 301, 404, 422, 500] {
            let stub = StubTransport::new().on(
                Method::Get,
                "/user",
                StubResponse::json(status, json!({"message": "nope"})),
            );
            let admin = Principal::new("tok-admin");
            let client = PrincipalClient::new(&stub, &admin);
            assert!(
                client.call("/user", Method::Get, None).is_none(),
                "status {} treated as success",
                status
            );
        }
    }

    #[test]
    fn test_call_transport_failure_is_none() {
        let stub = StubTransport::new().on(Method::Get, "/user", StubResponse::timeout());
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        assert!(client.call("/user", Method::Get, None).is_none());
    }

    #[test]
    fn test_request_rejection_keeps_status_and_body() {
        let stub = StubTransport::new().on(
            Method::Get,
            "/user",
            StubResponse::json(401, json!({"message": "Bad credentials"})),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        match client.request(Method::Get, "/user", None) {
            Err(ApiError::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_requests_carry_principal_token() {
        let stub = StubTransport::new().on(Method::Get, "/user", StubResponse::empty(200));
        let member = Principal::with_username("tok-bob", "bob");
        let client = PrincipalClient::new(&stub, &member);

        client.call("/user", Method::Get, None);
        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, "tok-bob");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut response = ApiResponse::new(200, "");
        response
            .headers
            .insert("x-oauth-scopes".to_string(), "repo".to_string());
        assert_eq!(response.header("X-OAuth-Scopes"), Some("repo"));
    }
}
