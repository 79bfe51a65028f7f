//! Client configuration
//!
//! Connection settings for the results site: endpoint URL plus the basic
//! auth credentials. Immutable after construction; all validation happens
//! up front, before any request is attempted.

use crate::error::{ClientError, Result};
use std::fmt;

/// Validated connection settings.
///
/// The base URL is normalized to end in exactly one `/` so endpoint paths
/// can be appended directly.
#[derive(Clone)]
pub struct Config {
    base_url: String,
    username: String,
    password: String,
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// Fails with [`ClientError::InvalidArgument`] when any value is empty
    /// or the URL carries no http(s) scheme.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let username = username.into();
        let password = password.into();

        if base_url.is_empty() {
            return Err(ClientError::InvalidArgument(
                "base_url must not be empty".to_string(),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidArgument(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if username.is_empty() {
            return Err(ClientError::InvalidArgument(
                "username must not be empty".to_string(),
            ));
        }

        if password.is_empty() {
            return Err(ClientError::InvalidArgument(
                "password must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            username,
            password,
        })
    }

    /// The normalized endpoint URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The basic auth username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The basic auth password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Manual impl so the password never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
