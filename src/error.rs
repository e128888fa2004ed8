use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Configuration errors. Always fatal, raised before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("admin token not found: set PAT1 in the environment or .env")]
    MissingAdminToken,

    #[error("no secrets configured: set at least one PAT<n> token")]
    NoSecrets,

    #[error("target repository not set: use TARGET_REPO or --repo")]
    MissingRepository,

    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Authorization errors detected by the preflight check.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("admin token is invalid or expired")]
    InvalidCredential,

    #[error("admin token is missing required scopes: {}", .missing.join(", "))]
    MissingScopes { missing: Vec<String> },
}

/// Errors talking to the GitHub API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Timeout, connection reset, DNS failure and similar.
    #[error("network error: {reason}")]
    Transient { reason: String },

    /// A well-formed request the host refused.
    #[error("github returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transient { .. } => true,
            ApiError::Rejected { status, .. } => *status == 429 || *status >= 500,
            ApiError::Decode(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid repository public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("secret name cannot be empty")]
    EmptyKey,

    #[error("invalid secret name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid repository '{repo}' (expected format: owner/repo)")]
    InvalidRepository { repo: String },
}

pub type Result<T> = std::result::Result<T, Error>;
