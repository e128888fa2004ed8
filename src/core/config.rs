//! Run configuration.
//!
//! Settings come from the process environment, optionally backed by a
//! `.env` file. Process variables win over file entries. Everything is read
//! once and passed explicitly to the workflows.
//!
//! | Variable            | Meaning                                        |
//! |---------------------|------------------------------------------------|
//! | `TARGET_REPO`       | `owner/repo` to provision                      |
//! | `ADMIN_USERNAME`    | admin login (defaults to `USERNAME1`)          |
//! | `PAT1`..`PAT20`     | tokens; `PAT1` is the admin, all are secrets   |
//! | `USERNAME1`..`USERNAME20` | logins paired with `PATn` by slot        |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::collaborators::Timing;
use crate::core::constants;
use crate::core::types::{Member, Principal, Repository, Secret};
use crate::error::{ConfigError, Result};

/// Default env file, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Everything one run needs.
#[derive(Debug)]
pub struct Settings {
    pub admin: Principal,
    pub repository: Repository,
    /// Secrets to upload, in slot order.
    pub secrets: Vec<Secret>,
    /// Member accounts (slots 2 and up), in slot order.
    pub members: Vec<Member>,
    pub timing: Timing,
}

impl Settings {
    /// Load settings from the environment and an env file.
    ///
    /// With `env_file` set, that file must exist. Without it, `.env` in the
    /// working directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unreadable env files or missing values, and
    /// `ValidationError` for a malformed repository.
    pub fn load(env_file: Option<&Path>, repository: Option<&str>) -> Result<Self> {
        let file_vars = match env_file {
            Some(path) => read_env_file(path)?,
            None => {
                let default = PathBuf::from(ENV_FILE);
                if default.exists() {
                    read_env_file(&default)?
                } else {
                    HashMap::new()
                }
            }
        };

        Self::from_lookup(
            |name| {
                std::env::var(name)
                    .ok()
                    .or_else(|| file_vars.get(name).cloned())
            },
            repository,
        )
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// `repository` overrides `TARGET_REPO`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, repository: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token_var = |slot: usize| format!("{}{}", constants::TOKEN_PREFIX, slot);
        let username_var = |slot: usize| format!("{}{}", constants::USERNAME_PREFIX, slot);

        let admin_token = get(&token_var(1)).ok_or(ConfigError::MissingAdminToken)?;
        let admin = match get("ADMIN_USERNAME").or_else(|| get(&username_var(1))) {
            Some(username) => Principal::with_username(admin_token, username),
            None => Principal::new(admin_token),
        };

        let repository: Repository = repository
            .map(str::to_string)
            .or_else(|| get("TARGET_REPO"))
            .ok_or(ConfigError::MissingRepository)?
            .trim()
            .parse()?;

        let mut secrets = Vec::new();
        let mut members = Vec::new();
        for slot in 1..=constants::MAX_SLOTS {
            let token = get(&token_var(slot));

            if let Some(value) = &token {
                secrets.push(Secret::new(token_var(slot), value.as_str()));
            }

            if slot == 1 {
                continue;
            }
            match (get(&username_var(slot)), token) {
                (Some(username), Some(token)) => members.push(Member::new(username, token)),
                (Some(username), None) => {
                    warn!(slot, %username, "username without token, skipping member")
                }
                (None, Some(_)) => warn!(slot, "token without username, not a member"),
                (None, None) => {}
            }
        }

        if secrets.is_empty() {
            return Err(ConfigError::NoSecrets.into());
        }

        debug!(
            repository = %repository,
            secrets = secrets.len(),
            members = members.len(),
            "settings loaded"
        );

        Ok(Self {
            admin,
            repository,
            secrets,
            members,
            timing: Timing::default(),
        })
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let env_error = |source: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(env_error)? {
        let (key, value) = item.map_err(env_error)?;
        vars.insert(key, value);
    }

    debug!(path = %path.display(), entries = vars.len(), "read env file");
    Ok(vars)
}
