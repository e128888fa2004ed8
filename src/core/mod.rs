//! Core library components.
//!
//! Reusable logic for both workflows: the GitHub transport, secret sealing,
//! the provisioning engine, the collaborator bootstrap and the preflight
//! scope check.

pub mod cipher;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod github;
pub mod preflight;
pub mod secrets;
pub mod types;
pub mod validation;
