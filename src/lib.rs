//! ghcrew - provision a shared GitHub repository for a crew of accounts.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Admin token scope check
//! │   ├── secrets       # Upload tokens as repository secrets
//! │   ├── collaborators # Invite and accept collaborators
//! │   ├── setup         # Both workflows
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # Environment / .env settings
//!     ├── github/       # Transport trait, reqwest transport, principal client
//!     ├── cipher/       # Public key fetch and sealed-box encryption
//!     ├── secrets       # Secret provisioning engine
//!     ├── collaborators # Invite/accept orchestration
//!     ├── preflight     # Token scope check
//!     └── types         # Principal, Repository, Secret, Outcome
//! ```
//!
//! # Workflows
//!
//! - Preflight runs first and aborts the run on an invalid token or missing
//!   `repo`/`workflow` scopes.
//! - Secret provisioning and collaborator bootstrap are independent and
//!   isolate failures per item.

pub mod cli;
pub mod core;
pub mod error;
