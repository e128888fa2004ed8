//! Secret encryption for the GitHub Actions secret store.
//!
//! GitHub accepts secrets as libsodium sealed boxes (X25519 +
//! XSalsa20-Poly1305) addressed to the repository's public key. The key can
//! rotate, so callers fetch it fresh before each upload.

use serde::Deserialize;
use tracing::debug;

use crate::core::github::{Method, PrincipalClient};
use crate::core::types::Repository;
use crate::error::{ApiError, Result};

mod sealed;

pub use sealed::seal;

/// A repository's secret-encryption public key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryPublicKey {
    /// Identifier sent back alongside the ciphertext.
    pub key_id: String,
    /// Base64 encoded X25519 public key.
    pub key: String,
}

/// Endpoint of a repository's secrets public key.
pub fn public_key_endpoint(repository: &Repository) -> String {
    format!("/repos/{}/actions/secrets/public-key", repository)
}

/// Fetch the repository's current public key.
///
/// # Errors
///
/// Returns `ApiError::Rejected` with the host's status and body when the
/// key cannot be read (missing scopes, unknown repository), or
/// `ApiError::Transient` on network failure.
pub fn fetch_public_key(
    client: &PrincipalClient<'_>,
    repository: &Repository,
) -> Result<RepositoryPublicKey> {
    let response = client.request(Method::Get, &public_key_endpoint(repository), None)?;
    let key: RepositoryPublicKey = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Decode(format!("public key: {}", e)))?;

    debug!(repository = %repository, key_id = %key.key_id, "fetched public key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::github::stub::{StubResponse, StubTransport};
    use crate::core::types::Principal;
    use crate::error::Error;
    use serde_json::json;

    fn repo() -> Repository {
        "octo/shared".parse().unwrap()
    }

    #[test]
    fn test_fetch_public_key() {
        let stub = StubTransport::new().on(
            Method::Get,
            "/repos/octo/shared/actions/secrets/public-key",
            StubResponse::json(200, json!({"key_id": "568250167242549743", "key": "AAAA"})),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        let key = fetch_public_key(&client, &repo()).unwrap();
        assert_eq!(key.key_id, "568250167242549743");
        assert_eq!(key.key, "AAAA");
    }

    #[test]
    fn test_fetch_public_key_failure_surfaces_status_and_body() {
        let stub = StubTransport::new().on(
            Method::Get,
            "/repos/octo/shared/actions/secrets/public-key",
            StubResponse::json(403, json!({"message": "Resource not accessible"})),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        let err = fetch_public_key(&client, &repo()).unwrap_err();
        match err {
            Error::Api(ApiError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("Resource not accessible"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_public_key_malformed_body() {
        let stub = StubTransport::new().on(
            Method::Get,
            "/repos/octo/shared/actions/secrets/public-key",
            StubResponse::json(200, json!({"unexpected": true})),
        );
        let admin = Principal::new("tok-admin");
        let client = PrincipalClient::new(&stub, &admin);

        assert!(matches!(
            fetch_public_key(&client, &repo()),
            Err(Error::Api(ApiError::Decode(_)))
        ));
    }
}
