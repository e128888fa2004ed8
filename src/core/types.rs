//! Domain types shared by the workflows.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::core::validation;
use crate::error::{Error, ValidationError};

/// One authenticated identity.
///
/// The token is never printed; `Debug` redacts it.
#[derive(Clone)]
pub struct Principal {
    token: Zeroizing<String>,
    username: Option<String>,
}

impl Principal {
    /// Principal with no known username (the admin).
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            username: None,
        }
    }

    /// Principal for a member account.
    pub fn with_username(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// A member account: login plus its own credential.
#[derive(Debug, Clone)]
pub struct Member {
    pub username: String,
    pub principal: Principal,
}

impl Member {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            principal: Principal::with_username(token, username.clone()),
            username,
        }
    }
}

/// Target repository, `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    owner: String,
    name: String,
}

impl Repository {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/repo`, as reported in `repository.full_name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::validate_repository(s)?;
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| ValidationError::InvalidRepository { repo: s.to_string() })?;
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A named secret awaiting upload. The value is wiped on drop.
pub struct Secret {
    pub name: String,
    pub value: Zeroizing<String>,
}

impl Secret {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Result of one attempted operation, keyed by secret name or username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    pub success: bool,
}
