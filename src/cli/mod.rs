//! Command-line interface.

pub mod check;
pub mod collaborators;
pub mod completions;
pub mod output;
pub mod secrets;
pub mod setup;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::core::collaborators::Timing;
use crate::core::config::Settings;
use crate::core::github::HttpTransport;
use crate::error::Result;

/// ghcrew - provision a shared GitHub repository for a crew of accounts.
#[derive(Parser)]
#[command(
    name = "ghcrew",
    about = "Upload encrypted repository secrets and bootstrap collaborator access",
    version,
    after_help = "Configuration is read from the environment and .env (PAT1..PAT20, USERNAME1..USERNAME20, TARGET_REPO)."
)]
pub struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Target repository, overrides TARGET_REPO
    #[arg(long, global = true, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Check that the admin token has the required scopes
    Check,

    /// Upload every PAT<n> token as an encrypted repository secret
    Secrets,

    /// Invite every member and accept the invitations with their own tokens
    Collaborators(BootstrapArgs),

    /// Run secrets, then collaborators
    Setup(BootstrapArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Tuning for the collaborator bootstrap.
#[derive(Args, Debug, Clone, Default)]
pub struct BootstrapArgs {
    /// Seconds to wait between the invite and accept phases
    #[arg(long, value_name = "SECS")]
    pub settle_secs: Option<u64>,

    /// Reads of each member's invitation list before giving up
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=10))]
    pub accept_attempts: Option<u32>,
}

impl BootstrapArgs {
    /// Apply overrides on top of `timing`.
    pub fn apply(&self, mut timing: Timing) -> Timing {
        if let Some(secs) = self.settle_secs {
            timing.settle = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.accept_attempts {
            timing.accept_attempts = attempts;
        }
        timing
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every attempted operation succeeded.
    Complete,
    /// At least one item failed.
    Partial,
}

impl RunStatus {
    pub fn from_success(all_succeeded: bool) -> Self {
        if all_succeeded {
            RunStatus::Complete
        } else {
            RunStatus::Partial
        }
    }

    /// Combine the status of two workflows.
    pub fn and(self, other: RunStatus) -> RunStatus {
        Self::from_success(self == RunStatus::Complete && other == RunStatus::Complete)
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<RunStatus> {
    use Command::*;

    let load = || Settings::load(cli.env_file.as_deref(), cli.repo.as_deref());

    match cli.command {
        Completions { shell } => {
            completions::execute(shell)?;
            Ok(RunStatus::Complete)
        }
        Check => {
            let settings = load()?;
            let transport = HttpTransport::from_env()?;
            check::execute(&transport, &settings)?;
            Ok(RunStatus::Complete)
        }
        Secrets => {
            let settings = load()?;
            let transport = HttpTransport::from_env()?;
            secrets::execute(&transport, settings)
        }
        Collaborators(args) => {
            let mut settings = load()?;
            settings.timing = args.apply(settings.timing);
            let transport = HttpTransport::from_env()?;
            collaborators::execute(&transport, &settings)
        }
        Setup(args) => {
            let mut settings = load()?;
            settings.timing = args.apply(settings.timing);
            let transport = HttpTransport::from_env()?;
            setup::execute(&transport, settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_args_override_timing() {
        let args = BootstrapArgs {
            settle_secs: Some(12),
            accept_attempts: Some(3),
        };
        let timing = args.apply(Timing::default());
        assert_eq!(timing.settle, Duration::from_secs(12));
        assert_eq!(timing.accept_attempts, 3);
        assert_eq!(timing.invite_pacing, Timing::default().invite_pacing);
    }

    #[test]
    fn test_bootstrap_args_default_keeps_timing() {
        let timing = BootstrapArgs::default().apply(Timing::default());
        assert_eq!(timing, Timing::default());
    }

    #[test]
    fn test_run_status_and() {
        use RunStatus::*;
        assert_eq!(Complete.and(Complete), Complete);
        assert_eq!(Complete.and(Partial), Partial);
        assert_eq!(Partial.and(Complete), Partial);
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ghcrew",
            "collaborators",
            "--repo",
            "octo/shared",
            "--settle-secs",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.repo.as_deref(), Some("octo/shared"));
        match cli.command {
            Command::Collaborators(args) => assert_eq!(args.settle_secs, Some(0)),
            _ => panic!("expected collaborators"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_attempts() {
        assert!(Cli::try_parse_from(["ghcrew", "setup", "--accept-attempts", "0"]).is_err());
    }
}
