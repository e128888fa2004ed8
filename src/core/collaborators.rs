//! Collaborator bootstrap.
//!
//! Gives every member account push access to the target repository in two
//! strictly ordered phases:
//!
//! 1. **Invite**: the admin principal PUTs each member as a collaborator.
//! 2. **Accept**: after a settling wait, each member lists its own pending
//!    invitations with its own token and accepts the one for the target
//!    repository.
//!
//! The host makes invitations visible asynchronously. The settling wait is a
//! best-effort pause, not a guarantee; a member whose invitation is not
//! visible yet ends up `Stuck`. By default each member's invitation list is
//! read exactly once.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::core::constants;
use crate::core::github::{Method, PrincipalClient, Transport};
use crate::core::types::{Member, Outcome, Principal, Repository};

/// Invitation lifecycle for one (repository, member) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationState {
    /// No invitation was created.
    None,
    /// The admin's invite was accepted by the host.
    Pending,
    /// The member accepted the invitation.
    Accepted,
    /// The member could not accept: nothing observed, or the accept failed.
    Stuck,
}

impl fmt::Display for InvitationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvitationState::None => "none",
            InvitationState::Pending => "pending",
            InvitationState::Accepted => "accepted",
            InvitationState::Stuck => "stuck",
        };
        f.write_str(s)
    }
}

/// Why a member ended up stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuckReason {
    /// No invitation for the repository was visible to the member.
    NoInvitation,
    /// The invitation was found but the accept call failed.
    AcceptFailed,
}

impl fmt::Display for StuckReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StuckReason::NoInvitation => f.write_str("no invitation found"),
            StuckReason::AcceptFailed => f.write_str("failed to accept"),
        }
    }
}

/// Final status of one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatus {
    pub username: String,
    /// Whether the invite phase succeeded for this member.
    pub invited: bool,
    pub state: InvitationState,
    pub reason: Option<StuckReason>,
}

/// Pacing and settling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause between consecutive invites.
    pub invite_pacing: Duration,
    /// Pause between consecutive members in the accept phase.
    pub accept_pacing: Duration,
    /// Pause between the two phases.
    pub settle: Duration,
    /// Reads of each member's invitation list. 1 means observe once.
    pub accept_attempts: u32,
    /// Base delay between reads when `accept_attempts > 1`; grows linearly.
    pub accept_backoff: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            invite_pacing: constants::CALL_PACING,
            accept_pacing: constants::CALL_PACING,
            settle: constants::SETTLE_WAIT,
            accept_attempts: 1,
            accept_backoff: constants::ACCEPT_BACKOFF,
        }
    }
}

impl Timing {
    /// No delays at all.
    pub fn immediate() -> Self {
        Self {
            invite_pacing: Duration::ZERO,
            accept_pacing: Duration::ZERO,
            settle: Duration::ZERO,
            accept_attempts: 1,
            accept_backoff: Duration::ZERO,
        }
    }
}

/// Receives progress while the bootstrap runs.
pub trait BootstrapObserver {
    fn invited(&mut self, _username: &str, _sent: bool) {}
    fn settling(&mut self, _wait: Duration) {}
    fn resolved(&mut self, _status: &MemberStatus) {}
}

impl BootstrapObserver for () {}

/// Per-member results of one bootstrap run.
#[derive(Debug, Default, Clone)]
pub struct BootstrapReport {
    members: Vec<MemberStatus>,
}

impl BootstrapReport {
    pub fn members(&self) -> &[MemberStatus] {
        &self.members
    }

    pub fn state_of(&self, username: &str) -> Option<InvitationState> {
        self.members
            .iter()
            .find(|m| m.username == username)
            .map(|m| m.state)
    }

    pub fn accepted(&self) -> Vec<&str> {
        self.with_state(InvitationState::Accepted)
    }

    pub fn stuck(&self) -> Vec<&str> {
        self.with_state(InvitationState::Stuck)
    }

    /// Usernames whose invite was not sent.
    pub fn invite_failures(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| !m.invited)
            .map(|m| m.username.as_str())
            .collect()
    }

    /// One outcome per member; success means accepted.
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.members
            .iter()
            .map(|m| Outcome {
                name: m.username.clone(),
                success: m.state == InvitationState::Accepted,
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.members.len()
    }

    pub fn all_accepted(&self) -> bool {
        self.members
            .iter()
            .all(|m| m.state == InvitationState::Accepted)
    }

    fn with_state(&self, state: InvitationState) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.state == state)
            .map(|m| m.username.as_str())
            .collect()
    }
}

/// Endpoint adding `username` as a collaborator.
pub fn collaborator_endpoint(repository: &Repository, username: &str) -> String {
    format!("/repos/{}/collaborators/{}", repository, username)
}

/// Endpoint listing the caller's pending repository invitations.
pub const INVITATIONS_ENDPOINT: &str = "/user/repository_invitations";

/// Endpoint accepting invitation `id`.
pub fn accept_endpoint(id: &str) -> String {
    format!("{}/{}", INVITATIONS_ENDPOINT, id)
}

/// Run both phases for every member.
///
/// Members named like the admin are skipped. One member's failure never
/// affects another.
pub fn bootstrap(
    transport: &dyn Transport,
    repository: &Repository,
    admin: &Principal,
    members: &[Member],
    timing: &Timing,
    observer: &mut dyn BootstrapObserver,
) -> BootstrapReport {
    let members: Vec<&Member> = members
        .iter()
        .filter(|m| {
            let is_admin = admin
                .username()
                .is_some_and(|a| a.eq_ignore_ascii_case(&m.username));
            if is_admin {
                debug!(username = %m.username, "skipping admin");
            }
            !is_admin
        })
        .collect();

    info!(repository = %repository, members = members.len(), "bootstrapping collaborators");

    let admin_client = PrincipalClient::new(transport, admin);
    let mut states: Vec<InvitationState> = Vec::with_capacity(members.len());
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            thread::sleep(timing.invite_pacing);
        }
        let state = invite(&admin_client, repository, &member.username);
        observer.invited(&member.username, state == InvitationState::Pending);
        states.push(state);
    }

    if !members.is_empty() {
        info!(wait = ?timing.settle, "waiting for invitations to settle");
        observer.settling(timing.settle);
        thread::sleep(timing.settle);
    }

    let mut report = BootstrapReport::default();
    for (i, (member, invite_state)) in members.iter().zip(states).enumerate() {
        if i > 0 {
            thread::sleep(timing.accept_pacing);
        }
        let client = PrincipalClient::new(transport, &member.principal);
        let (state, reason) = accept(&client, repository, timing);

        let status = MemberStatus {
            username: member.username.clone(),
            invited: invite_state == InvitationState::Pending,
            state,
            reason,
        };
        if let Some(reason) = reason {
            warn!(username = %status.username, %reason, "member stuck");
        }
        observer.resolved(&status);
        report.members.push(status);
    }

    info!(
        accepted = report.accepted().len(),
        stuck = report.stuck().len(),
        "bootstrap finished"
    );
    report
}

/// Invite one member with push permission. Returns `Pending` or `None`.
pub fn invite(
    admin: &PrincipalClient<'_>,
    repository: &Repository,
    username: &str,
) -> InvitationState {
    let body = json!({ "permission": constants::COLLABORATOR_PERMISSION });
    match admin.call(
        &collaborator_endpoint(repository, username),
        Method::Put,
        Some(&body),
    ) {
        Some(_) => {
            debug!(username, "invitation sent");
            InvitationState::Pending
        }
        None => {
            warn!(username, "invitation failed");
            InvitationState::None
        }
    }
}

/// Look for the member's invitation and accept it with the member's token.
pub fn accept(
    member: &PrincipalClient<'_>,
    repository: &Repository,
    timing: &Timing,
) -> (InvitationState, Option<StuckReason>) {
    let Some(id) = observe_invitation(member, repository, timing) else {
        return (InvitationState::Stuck, Some(StuckReason::NoInvitation));
    };

    match member.call(&accept_endpoint(&id), Method::Patch, None) {
        Some(_) => (InvitationState::Accepted, None),
        None => (InvitationState::Stuck, Some(StuckReason::AcceptFailed)),
    }
}

fn observe_invitation(
    member: &PrincipalClient<'_>,
    repository: &Repository,
    timing: &Timing,
) -> Option<String> {
    let attempts = timing.accept_attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(list) = member.call(INVITATIONS_ENDPOINT, Method::Get, None) {
            if let Some(id) = find_invitation(&list, repository) {
                return Some(id);
            }
        }
        if attempt < attempts {
            debug!(attempt, "invitation not visible yet");
            thread::sleep(timing.accept_backoff * attempt);
        }
    }
    None
}

/// Id of the invitation in `list` for `repository`, if any.
///
/// Anything but a JSON array yields `None`.
pub fn find_invitation(list: &Value, repository: &Repository) -> Option<String> {
    let target = repository.full_name();
    list.as_array()?
        .iter()
        .find(|invite| {
            invite
                .pointer("/repository/full_name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(&target))
        })
        .and_then(|invite| match invite.get("id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
}
