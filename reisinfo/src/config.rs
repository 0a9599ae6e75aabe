//! Process configuration.
//!
//! The only required setting is the NS subscription key. It is validated
//! once at startup so a malformed key never reaches the network.

use std::fmt;

/// Environment variable holding the subscription key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Optional environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "NS_BASE_URL";

/// Required length of a subscription key, in characters.
pub const API_KEY_LEN: usize = 32;

/// Configuration errors. These are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("subscription key must be exactly 32 characters, got {0}")]
    InvalidKeyLength(usize),

    #[error("subscription key must contain only printable ASCII characters")]
    InvalidKeyCharacters,
}

/// A subscription key of exactly [`API_KEY_LEN`] printable ASCII characters.
///
/// ```
/// use reisinfo::config::ApiKey;
///
/// assert!(ApiKey::parse("0123456789abcdef0123456789abcdef").is_ok());
/// assert!(ApiKey::parse("too-short").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let len = s.chars().count();
        if len != API_KEY_LEN {
            return Err(ConfigError::InvalidKeyLength(len));
        }
        if !s.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ConfigError::InvalidKeyCharacters);
        }
        Ok(ApiKey(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub base_url: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let api_key = ApiKey::parse(raw.trim())?;
        let base_url = lookup(BASE_URL_VAR).filter(|url| !url.is_empty());

        Ok(Self { api_key, base_url })
    }
}
