//! Collaborators command - invite members and accept on their behalf.

use std::time::Duration;

use crate::cli::{check, output, RunStatus};
use crate::core::collaborators::{self, BootstrapObserver, InvitationState, MemberStatus};
use crate::core::config::Settings;
use crate::core::github::Transport;
use crate::error::Result;

/// Preflight, then bootstrap every member.
pub fn execute(transport: &dyn Transport, settings: &Settings) -> Result<RunStatus> {
    check::run(transport, settings)?;
    Ok(run(transport, settings))
}

/// Run the bootstrap and print the summary. Assumes preflight passed.
pub fn run(transport: &dyn Transport, settings: &Settings) -> RunStatus {
    output::section("Collaborators");
    output::kv("repository", output::key(&settings.repository.full_name()));
    output::kv("members", settings.members.len());

    if settings.members.is_empty() {
        output::dimmed("no members configured (USERNAME2..USERNAME20 with PAT2..PAT20)");
        return RunStatus::Complete;
    }

    println!();
    output::header("Sending invitations");
    let report = collaborators::bootstrap(
        transport,
        &settings.repository,
        &settings.admin,
        &settings.members,
        &settings.timing,
        &mut Progress { accept_header: false },
    );

    let accepted = report.accepted().len();
    output::summary(
        "invitations accepted",
        accepted,
        report.total(),
        &report.stuck(),
    );
    if !report.all_accepted() {
        output::hint("stuck members can be re-run; invitations may take longer to appear");
        if !report.invite_failures().is_empty() {
            output::hint("invite failures usually mean PAT1 lacks admin rights on the repository");
        }
    }

    RunStatus::from_success(report.all_accepted())
}

struct Progress {
    accept_header: bool,
}

impl BootstrapObserver for Progress {
    fn invited(&mut self, username: &str, sent: bool) {
        if sent {
            output::success(&format!("invitation sent to {}", output::key(username)));
        } else {
            output::warn(&format!("failed to invite {}", output::key(username)));
        }
    }

    fn settling(&mut self, wait: Duration) {
        println!();
        output::dimmed(&format!(
            "waiting {}s for invitations to propagate",
            wait.as_secs_f32()
        ));
    }

    fn resolved(&mut self, status: &MemberStatus) {
        if !self.accept_header {
            println!();
            output::header("Accepting invitations");
            self.accept_header = true;
        }
        let name = output::key(&status.username);
        match (status.state, status.reason) {
            (InvitationState::Accepted, _) => {
                output::success(&format!("{} accepted invitation", name))
            }
            (_, Some(reason)) => output::warn(&format!("{}: {}", name, reason)),
            (state, None) => output::warn(&format!("{}: {}", name, state)),
        }
    }
}
