//! Setup command - secrets, then collaborators, behind one preflight.

use crate::cli::{check, collaborators, output, secrets, RunStatus};
use crate::core::config::Settings;
use crate::core::github::Transport;
use crate::error::Result;

/// Run both workflows.
pub fn execute(transport: &dyn Transport, mut settings: Settings) -> Result<RunStatus> {
    check::run(transport, &settings)?;

    let batch = std::mem::take(&mut settings.secrets);
    let uploaded = secrets::run(transport, &settings, batch);
    let bootstrapped = collaborators::run(transport, &settings);

    let status = uploaded.and(bootstrapped);
    println!();
    match status {
        RunStatus::Complete => output::success("setup complete"),
        RunStatus::Partial => output::warn("setup finished with failures"),
    }
    Ok(status)
}
