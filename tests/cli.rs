//! CLI integration tests.

mod support;

#[path = "cli/config.rs"]
mod config;
#[path = "cli/errors.rs"]
mod errors;
#[path = "cli/preflight.rs"]
mod preflight;
