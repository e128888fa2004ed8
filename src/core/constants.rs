//! Constants used throughout ghcrew.
//!
//! Centralizes API details, naming patterns and pacing values.

use std::time::Duration;

/// Default REST host.
pub const API_BASE_URL: &str = "https://api.github.com";

/// Environment variable that overrides the REST host (GHES, tests).
pub const API_BASE_URL_ENV: &str = "GITHUB_API_URL";

/// Media type sent in the `Accept` header.
pub const ACCEPT: &str = "application/vnd.github+json";

/// REST API version sent in `X-GitHub-Api-Version`.
pub const API_VERSION: &str = "2022-11-28";

/// Response header carrying the token's granted scopes.
pub const SCOPES_HEADER: &str = "x-oauth-scopes";

/// Scopes the admin token needs for both workflows.
pub const REQUIRED_SCOPES: &[&str] = &["repo", "workflow"];

/// Statuses treated as success by the principal client.
pub const SUCCESS_STATUSES: &[u16] = &[200, 201, 204];

/// Statuses treated as success for a secret upsert (created, updated).
pub const UPSERT_STATUSES: &[u16] = &[201, 204];

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of configurable account slots (`PAT1..PAT20`, `USERNAME1..USERNAME20`).
pub const MAX_SLOTS: usize = 20;

/// Prefix of token variables; also the secret naming pattern.
pub const TOKEN_PREFIX: &str = "PAT";

/// Prefix of username variables.
pub const USERNAME_PREFIX: &str = "USERNAME";

/// Permission granted to invited members.
pub const COLLABORATOR_PERMISSION: &str = "push";

/// Delay between consecutive invite or accept calls.
pub const CALL_PACING: Duration = Duration::from_millis(800);

/// Pause between the invite and accept phases.
pub const SETTLE_WAIT: Duration = Duration::from_secs(5);

/// Delay before re-reading a member's invitation list when retries are enabled.
pub const ACCEPT_BACKOFF: Duration = Duration::from_secs(2);

/// Where users fix token scopes.
pub const TOKEN_SETTINGS_URL: &str = "https://github.com/settings/tokens";
