//! Environment-derived credentials and endpoints
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate, so it is zeroized on
//! drop and never shows up in `Debug` output. Use
//! [`ApiCredentials::secret_key`] for explicit access.

use secrecy::{ExposeSecret, SecretString};
use std::env::{self, VarError};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};

/// Host for live trading
pub const API_BASE_URL_LIVE: &str = "api.alpaca.markets";

/// Host for paper trading, used when no base URL is configured
pub const API_BASE_URL_PAPER: &str = "paper-api.alpaca.markets";

/// Host for market data
pub const API_DATA_URL: &str = "data.alpaca.markets";

/// Names of the environment variables [`Environment::parse`] reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarNames {
    /// Required API key id
    pub key_id: String,
    /// Required API secret key
    pub secret_key: String,
    /// Optional trading host
    pub base_url: String,
    /// Optional market data host
    pub data_url: String,
}

impl Default for EnvVarNames {
    fn default() -> Self {
        Self {
            key_id: "APCA_API_KEY_ID".to_string(),
            secret_key: "APCA_API_SECRET_KEY".to_string(),
            base_url: "APCA_API_BASE_URL".to_string(),
            data_url: "APCA_API_DATA_URL".to_string(),
        }
    }
}

/// Resolved API credentials and hosts
pub struct ApiCredentials {
    key_id: String,
    secret_key: SecretString,
    base_url: String,
    data_url: String,
}

impl ApiCredentials {
    /// Create credentials directly, using the default data host
    pub fn new(
        key_id: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            secret_key: SecretString::from(secret_key.into()),
            base_url: base_url.into(),
            data_url: API_DATA_URL.to_string(),
        }
    }

    /// API key id
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// API secret key
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Trading host, e.g. `paper-api.alpaca.markets`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Market data host
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Returns true when trading against the paper host
    pub fn is_paper(&self) -> bool {
        self.base_url.contains(API_BASE_URL_PAPER)
    }
}

impl Clone for ApiCredentials {
    fn clone(&self) -> Self {
        Self {
            key_id: self.key_id.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_string()),
            base_url: self.base_url.clone(),
            data_url: self.data_url.clone(),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field(
                "key_id",
                &format!("{}...", self.key_id.chars().take(4).collect::<String>()),
            )
            .field("secret_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("data_url", &self.data_url)
            .finish()
    }
}

/// Supplier of credentials and hosts for the REST client and the stream
///
/// An environment starts unparsed. [`parse`](Self::parse) reads the
/// configured variables; [`ensure_parsed`](Self::ensure_parsed) does so on
/// first use and returns the credentials.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    names: EnvVarNames,
    credentials: Option<ApiCredentials>,
}

impl Environment {
    /// Create an environment reading the standard `APCA_*` variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment reading non-standard variable names
    pub fn from_env_vars(names: EnvVarNames) -> Self {
        Self {
            names,
            credentials: None,
        }
    }

    /// Create an already-parsed environment from explicit values
    pub fn from_credentials(
        key_id: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            names: EnvVarNames::default(),
            credentials: Some(ApiCredentials::new(key_id, secret_key, base_url)),
        }
    }

    /// Override the market data host of an already-parsed environment
    pub fn with_data_url(mut self, data_url: impl Into<String>) -> Self {
        if let Some(credentials) = self.credentials.as_mut() {
            credentials.data_url = data_url.into();
        }
        self
    }

    /// Variable names this environment reads
    pub fn var_names(&self) -> &EnvVarNames {
        &self.names
    }

    /// Read the configured variables into this environment.
    ///
    /// Fails if the key id or secret key is unset. A missing base URL falls
    /// back to the paper host with a warning; a missing data URL falls back
    /// to the default data host.
    pub fn parse(&mut self) -> ConfigResult<()> {
        let key_id = required(&self.names.key_id)?;
        let secret_key = required(&self.names.secret_key)?;

        let base_url = match optional(&self.names.base_url)? {
            Some(url) => url,
            None => {
                warn!(
                    "{} not set so defaulting to using the paper URL: {}",
                    self.names.base_url, API_BASE_URL_PAPER
                );
                API_BASE_URL_PAPER.to_string()
            }
        };

        let data_url = match optional(&self.names.data_url)? {
            Some(url) => url,
            None => {
                debug!(
                    "{} not set so defaulting to using the default data URL: {}",
                    self.names.data_url, API_DATA_URL
                );
                API_DATA_URL.to_string()
            }
        };

        self.credentials = Some(ApiCredentials {
            key_id,
            secret_key: SecretString::from(secret_key),
            base_url,
            data_url,
        });
        Ok(())
    }

    /// Whether [`parse`](Self::parse) has succeeded
    pub fn has_been_parsed(&self) -> bool {
        self.credentials.is_some()
    }

    /// Parse if needed, then return the credentials
    pub fn ensure_parsed(&mut self) -> ConfigResult<&ApiCredentials> {
        if self.credentials.is_none() {
            self.parse()?;
        }
        self.credentials
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("environment was not parsed".to_string()))
    }

    /// Credentials, if the environment has been parsed
    pub fn credentials(&self) -> Option<&ApiCredentials> {
        self.credentials.as_ref()
    }
}

fn required(name: &str) -> ConfigResult<String> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(ConfigError::EnvVarNotSet(name.to_string())),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvVarNotUnicode(name.to_string())),
    }
}

fn optional(name: &str) -> ConfigResult<Option<String>> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvVarNotUnicode(name.to_string())),
    }
}
