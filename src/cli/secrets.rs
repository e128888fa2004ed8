//! Secrets command - upload every token as an encrypted repository secret.

use tracing::info;

use crate::cli::{check, output, RunStatus};
use crate::core::config::Settings;
use crate::core::constants;
use crate::core::github::{PrincipalClient, Transport};
use crate::core::secrets::{self, ProvisionObserver};
use crate::core::types::{Outcome, Secret};
use crate::error::Result;

/// Preflight, then provision every configured secret.
pub fn execute(transport: &dyn Transport, mut settings: Settings) -> Result<RunStatus> {
    check::run(transport, &settings)?;
    let batch = std::mem::take(&mut settings.secrets);
    Ok(run(transport, &settings, batch))
}

/// Provision `batch` and print the summary. Assumes preflight passed.
pub fn run(transport: &dyn Transport, settings: &Settings, batch: Vec<Secret>) -> RunStatus {
    info!(count = batch.len(), "uploading secrets");

    output::section("Secrets");
    output::kv("repository", output::key(&settings.repository.full_name()));
    output::kv("secrets", batch.len());
    println!();

    let client = PrincipalClient::new(transport, &settings.admin);
    let report = secrets::provision(&client, &settings.repository, batch, &mut Progress);

    output::summary(
        "secrets uploaded",
        report.succeeded(),
        report.total(),
        &report.failed(),
    );
    if report.all_succeeded() {
        output::hint("secrets are ready for GitHub Actions workflows");
    } else {
        output::hint(&format!(
            "check that PAT1 has the {} scopes",
            constants::REQUIRED_SCOPES.join(" and ")
        ));
    }

    RunStatus::from_success(report.all_succeeded())
}

struct Progress;

impl ProvisionObserver for Progress {
    fn started(&mut self, name: &str) {
        output::progress(&format!("adding {}", name));
    }

    fn finished(&mut self, outcome: &Outcome) {
        output::progress_done(outcome.success);
    }
}
