//! ghcrew - provision a shared GitHub repository for a crew of accounts.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ghcrew::cli::output;
use ghcrew::cli::{execute, Cli, RunStatus};
use ghcrew::core::constants;
use ghcrew::error::{AuthError, ConfigError, Error, ValidationError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("GHCREW_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ghcrew=debug")
        } else {
            EnvFilter::new("ghcrew=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli) {
        Ok(RunStatus::Complete) => {}
        Ok(RunStatus::Partial) => std::process::exit(2),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(advice) = hint(&e) {
                output::hint(&advice);
            }
            output::error("setup aborted");
            std::process::exit(1);
        }
    }
}

/// Remediation for a fatal error, when one is known.
fn hint(e: &Error) -> Option<String> {
    match e {
        Error::Auth(AuthError::MissingScopes { .. }) => Some(format!(
            "grant repo and workflow scopes at {}",
            constants::TOKEN_SETTINGS_URL
        )),
        Error::Auth(AuthError::InvalidCredential) => {
            Some("check PAT1 in your .env; it may be revoked or expired".to_string())
        }
        Error::Config(ConfigError::MissingAdminToken) | Error::Config(ConfigError::NoSecrets) => {
            Some("add PAT1=<token> to .env or the environment".to_string())
        }
        Error::Config(ConfigError::MissingRepository)
        | Error::Validation(ValidationError::InvalidRepository { .. }) => {
            Some("set TARGET_REPO=owner/repo or pass --repo owner/repo".to_string())
        }
        _ => None,
    }
}
