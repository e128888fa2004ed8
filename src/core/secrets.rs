//! Repository secret provisioning.
//!
//! Upserts named values as GitHub Actions secrets under the admin principal.
//! Each secret is handled on its own: fetch the current public key, seal the
//! value, PUT it. One failure never stops the batch.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::core::cipher;
use crate::core::constants;
use crate::core::github::{Method, PrincipalClient};
use crate::core::types::{Outcome, Repository, Secret};
use crate::core::validation;
use crate::error::{ApiError, Result};

/// Receives progress while a batch runs.
pub trait ProvisionObserver {
    fn started(&mut self, _name: &str) {}
    fn finished(&mut self, _outcome: &Outcome) {}
}

impl ProvisionObserver for () {}

/// Per-secret results of one provisioning run.
#[derive(Debug, Default, Clone)]
pub struct ProvisionReport {
    outcomes: Vec<Outcome>,
}

impl ProvisionReport {
    /// Outcomes in the order they were attempted.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Secret name to success.
    pub fn results(&self) -> BTreeMap<String, bool> {
        self.outcomes
            .iter()
            .map(|o| (o.name.clone(), o.success))
            .collect()
    }

    /// Names that failed, in attempt order.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| o.name.as_str())
            .collect()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

/// Endpoint of one repository secret.
pub fn secret_endpoint(repository: &Repository, name: &str) -> String {
    format!("/repos/{}/actions/secrets/{}", repository, name)
}

/// Create or update a single secret.
///
/// The public key is fetched on every call; it is never reused across
/// secrets.
///
/// # Errors
///
/// Returns `ValidationError` for a name GitHub would refuse, before any
/// request is made. Otherwise returns the key fetch, sealing or upsert
/// error. An upsert answered with anything but 201 (created) or 204
/// (updated) is `ApiError::Rejected`.
pub fn upsert(
    client: &PrincipalClient<'_>,
    repository: &Repository,
    secret: &Secret,
) -> Result<()> {
    validation::validate_key(&secret.name)?;

    let key = cipher::fetch_public_key(client, repository)?;
    let encrypted_value = cipher::seal(&key, &secret.value)?;

    let body = json!({
        "encrypted_value": encrypted_value,
        "key_id": key.key_id,
    });
    let response = client.request(
        Method::Put,
        &secret_endpoint(repository, &secret.name),
        Some(&body),
    )?;

    if !constants::UPSERT_STATUSES.contains(&response.status) {
        return Err(ApiError::Rejected {
            status: response.status,
            body: response.body,
        }
        .into());
    }

    debug!(name = %secret.name, status = response.status, "secret stored");
    Ok(())
}

/// Upsert every secret in `secrets`, sequentially.
///
/// Secrets are consumed; each plaintext is wiped as soon as its upload
/// finishes. The admin principal behind `client` is assumed to have passed
/// the preflight check.
pub fn provision(
    client: &PrincipalClient<'_>,
    repository: &Repository,
    secrets: Vec<Secret>,
    observer: &mut dyn ProvisionObserver,
) -> ProvisionReport {
    info!(repository = %repository, count = secrets.len(), "provisioning secrets");

    let mut report = ProvisionReport::default();
    for secret in secrets {
        observer.started(&secret.name);

        let success = match upsert(client, repository, &secret) {
            Ok(()) => true,
            Err(e) => {
                warn!(name = %secret.name, error = %e, "secret failed");
                false
            }
        };

        let outcome = Outcome {
            name: secret.name.clone(),
            success,
        };
        drop(secret);

        observer.finished(&outcome);
        report.outcomes.push(outcome);
    }

    info!(
        succeeded = report.succeeded(),
        total = report.total(),
        "provisioning finished"
    );
    report
}
