//! Scripted transport for tests.
//!
//! Responses are matched on method, path and (optionally) the calling
//! token. Unmatched requests get a 404. Every request is recorded.

use std::cell::RefCell;

use serde_json::Value;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

/// A canned reply.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Reply(ApiResponse),
    Timeout,
}

impl StubResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self::Reply(ApiResponse::new(status, body.to_string()))
    }

    pub fn empty(status: u16) -> Self {
        Self::Reply(ApiResponse::new(status, ""))
    }

    pub fn timeout() -> Self {
        Self::Timeout
    }

    /// Add a response header.
    pub fn header(self, name: &str, value: &str) -> Self {
        match self {
            Self::Reply(mut response) => {
                response
                    .headers
                    .insert(name.to_ascii_lowercase(), value.to_string());
                Self::Reply(response)
            }
            Self::Timeout => Self::Timeout,
        }
    }
}

#[derive(Debug)]
struct Rule {
    method: Method,
    path: String,
    token: Option<String>,
    uses: Option<usize>,
    response: StubResponse,
}

impl Rule {
    fn matches(&self, request: &ApiRequest<'_>) -> bool {
        self.uses != Some(0)
            && self.method == request.method
            && self.path == request.path
            && self.token.as_deref().map_or(true, |t| t == request.token)
    }
}

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub token: String,
    pub body: Option<Value>,
}

/// Transport returning scripted responses.
#[derive(Debug, Default)]
pub struct StubTransport {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every matching request with `response`.
    pub fn on(self, method: Method, path: &str, response: StubResponse) -> Self {
        self.push(method, path, None, None, response)
    }

    /// Answer the next matching request only; later ones fall through.
    pub fn once(self, method: Method, path: &str, response: StubResponse) -> Self {
        self.push(method, path, None, Some(1), response)
    }

    /// Answer matching requests made with `token` only.
    pub fn on_token(
        self,
        token: &str,
        method: Method,
        path: &str,
        response: StubResponse,
    ) -> Self {
        self.push(method, path, Some(token.to_string()), None, response)
    }

    /// Like [`StubTransport::once`], restricted to `token`.
    pub fn once_token(
        self,
        token: &str,
        method: Method,
        path: &str,
        response: StubResponse,
    ) -> Self {
        self.push(method, path, Some(token.to_string()), Some(1), response)
    }

    fn push(
        self,
        method: Method,
        path: &str,
        token: Option<String>,
        uses: Option<usize>,
        response: StubResponse,
    ) -> Self {
        self.rules.borrow_mut().push(Rule {
            method,
            path: path.to_string(),
            token,
            uses,
            response,
        });
        self
    }

    /// All requests received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Requests matching `method` and `path`.
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .cloned()
            .collect()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse, ApiError> {
        self.calls.borrow_mut().push(RecordedCall {
            method: request.method,
            path: request.path.to_string(),
            token: request.token.to_string(),
            body: request.body.cloned(),
        });

        let mut rules = self.rules.borrow_mut();
        let Some(rule) = rules.iter_mut().find(|r| r.matches(request)) else {
            return Ok(ApiResponse::new(404, r#"{"message":"Not Found"}"#));
        };
        if let Some(uses) = rule.uses.as_mut() {
            *uses -= 1;
        }

        match &rule.response {
            StubResponse::Reply(response) => Ok(response.clone()),
            StubResponse::Timeout => Err(ApiError::Transient {
                reason: "request timed out".to_string(),
            }),
        }
    }
}
