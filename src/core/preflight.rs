//! Admin token scope check.
//!
//! Reads the scopes granted to the admin token from the `X-OAuth-Scopes`
//! header of `GET /user`. Both workflows need `repo` and `workflow`.

use tracing::{debug, warn};

use crate::core::constants;
use crate::core::github::{Method, PrincipalClient};
use crate::error::{AuthError, Result};

/// Scopes reported for the admin token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    /// Scopes granted, in header order.
    pub scopes: Vec<String>,
    /// Required scopes that are absent.
    pub missing: Vec<String>,
}

impl Preflight {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Split a scopes header value (`"repo, workflow"`).
pub fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inspect the admin token.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredential` if the identity call fails for any
/// reason. Missing scopes are reported in the returned value, not as an
/// error.
pub fn inspect(client: &PrincipalClient<'_>) -> Result<Preflight> {
    let response = client.request(Method::Get, "/user", None).map_err(|e| {
        warn!(error = %e, "identity check failed");
        AuthError::InvalidCredential
    })?;

    let scopes = response
        .header(constants::SCOPES_HEADER)
        .map(parse_scopes)
        .unwrap_or_default();
    let missing = constants::REQUIRED_SCOPES
        .iter()
        .filter(|required| !scopes.iter().any(|s| s.as_str() == **required))
        .map(|s| s.to_string())
        .collect();

    debug!(?scopes, ?missing, "token scopes");
    Ok(Preflight { scopes, missing })
}

/// Run [`inspect`] and fail unless every required scope is granted.
///
/// # Errors
///
/// `AuthError::InvalidCredential` or `AuthError::MissingScopes`.
pub fn require(client: &PrincipalClient<'_>) -> Result<Preflight> {
    let preflight = inspect(client)?;
    if !preflight.passed() {
        return Err(AuthError::MissingScopes {
            missing: preflight.missing,
        }
        .into());
    }
    Ok(preflight)
}

/// True when the admin token is valid and carries every required scope.
pub fn check(client: &PrincipalClient<'_>) -> bool {
    require(client).is_ok()
}
