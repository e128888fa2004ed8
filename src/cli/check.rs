//! Check command - verify the admin token before anything runs.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::constants;
use crate::core::github::{PrincipalClient, Transport};
use crate::core::preflight;
use crate::error::{AuthError, Result};

/// Run the preflight check and report scopes.
pub fn execute(transport: &dyn Transport, settings: &Settings) -> Result<()> {
    output::kv("repository", output::key(&settings.repository.full_name()));
    if let Some(admin) = settings.admin.username() {
        output::kv("admin", admin);
    }
    run(transport, settings)
}

/// Preflight gate shared by every workflow command.
///
/// # Errors
///
/// Returns `AuthError` when the token is invalid or lacks scopes; the caller
/// must abort the run.
pub fn run(transport: &dyn Transport, settings: &Settings) -> Result<()> {
    let client = PrincipalClient::new(transport, &settings.admin);

    output::progress("checking admin token");
    let preflight = match preflight::inspect(&client) {
        Ok(p) => p,
        Err(e) => {
            output::progress_done(false);
            return Err(e);
        }
    };
    output::progress_done(preflight.passed());

    let scopes = if preflight.scopes.is_empty() {
        "(none)".to_string()
    } else {
        preflight.scopes.join(", ")
    };
    output::kv("scopes", scopes);

    if !preflight.passed() {
        output::warn(&format!(
            "missing required scopes: {}",
            preflight.missing.join(", ")
        ));
        print_fix_steps();
        return Err(AuthError::MissingScopes {
            missing: preflight.missing,
        }
        .into());
    }

    output::success("all required scopes granted");
    Ok(())
}

fn print_fix_steps() {
    output::section("How to fix");
    output::list_item(&format!("open {}", output::key(constants::TOKEN_SETTINGS_URL)));
    output::list_item("edit the admin token (PAT1)");
    output::list_item("enable repo (full control of private repositories)");
    output::list_item("enable workflow (update GitHub Action workflows)");
    output::list_item("save and copy the new token into your .env");
    println!();
}
