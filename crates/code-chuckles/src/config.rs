//! Configuration read from the environment.

use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};
use std::time::Duration;

use code_chuckles_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

/// Holds the API key for the completion service.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Overrides the base URL of the completion service.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Gives up on completions after this many seconds.
pub const TIMEOUT_VAR: &str = "CODE_CHUCKLES_TIMEOUT_SECS";

/// Settings of the program that are fixed for the whole run.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration with `lookup`, which returns the value of
    /// a variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let non_empty = |name| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key =
            non_empty(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = non_empty(BASE_URL_VAR);
        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TIMEOUT_VAR,
                        value,
                    });
                }
            },
            None => None,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout,
        })
    }

    /// Returns the completion timeout, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the configuration of the completion provider.
    pub fn openai_config(&self) -> OpenAIConfig {
        let mut builder = OpenAIConfigBuilder::with_api_key(&self.api_key);
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<deducted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Error returned when the environment is not usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    Missing(&'static str),
    /// A variable has a value that cannot be used.
    Invalid {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "{name} environment variable is not set")
            }
            ConfigError::Invalid { name, value } => {
                write!(f, "{name} has an invalid value: {value:?}")
            }
        }
    }
}

impl StdError for ConfigError {}
