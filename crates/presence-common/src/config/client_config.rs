//! Client configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use crate::telemetry::LogFormat;
use presence_core::{Availability, ParticipantId};
use std::env;
use std::path::PathBuf;

/// Main client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub identity: IdentityConfig,
    pub presence: PresenceConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    /// Overrides the environment's log format when set
    pub log_format: Option<LogFormat>,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Local participant identity
///
/// The id is optional here; whether its absence is fatal is decided when the
/// presence store is built.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub participant_id: Option<ParticipantId>,
}

/// Presence behaviour
#[derive(Debug, Clone)]
pub struct PresenceConfig {
    /// Restore the last chosen status and availability on startup
    pub persist_state: bool,
    /// Status used when nothing is restored
    pub default_status: String,
    /// Availability used when nothing is restored
    pub default_availability: Availability,
    /// Raise the "set your status" notice after joining a session
    pub show_join_message: bool,
    /// Where the last chosen state is written
    pub state_file: PathBuf,
    /// Capacity of the outbound frame channel
    pub outbound_buffer: usize,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            persist_state: false,
            default_status: String::new(),
            default_availability: Availability::Unset,
            show_join_message: default_show_join_message(),
            state_file: default_state_file(),
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "presence-client".to_string()
}

fn default_show_join_message() -> bool {
    true
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./presence-state.json")
}

fn default_outbound_buffer() -> usize {
    64
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let presence_defaults = PresenceConfig::default();

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
                log_format: lookup("LOG_FORMAT")
                    .map(|s| {
                        s.parse()
                            .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT", s))
                    })
                    .transpose()?,
            },
            identity: IdentityConfig {
                participant_id: lookup("PRESENCE_PARTICIPANT_ID")
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| {
                        s.parse()
                            .map_err(|_| ConfigError::InvalidValue("PRESENCE_PARTICIPANT_ID", s))
                    })
                    .transpose()?,
            },
            presence: PresenceConfig {
                persist_state: parse_bool(&lookup, "PRESENCE_PERSIST_STATE")?
                    .unwrap_or(presence_defaults.persist_state),
                default_status: lookup("PRESENCE_DEFAULT_STATUS")
                    .unwrap_or(presence_defaults.default_status),
                default_availability: lookup("PRESENCE_DEFAULT_AVAILABILITY")
                    .map(|s| {
                        s.parse().map_err(|_| {
                            ConfigError::InvalidValue("PRESENCE_DEFAULT_AVAILABILITY", s)
                        })
                    })
                    .transpose()?
                    .unwrap_or(presence_defaults.default_availability),
                show_join_message: parse_bool(&lookup, "PRESENCE_SHOW_JOIN_MESSAGE")?
                    .unwrap_or(presence_defaults.show_join_message),
                state_file: lookup("PRESENCE_STATE_FILE")
                    .map(PathBuf::from)
                    .unwrap_or(presence_defaults.state_file),
                outbound_buffer: lookup("PRESENCE_OUTBOUND_BUFFER")
                    .map(|s| match s.parse::<usize>() {
                        Ok(n) if n > 0 => Ok(n),
                        _ => Err(ConfigError::InvalidValue("PRESENCE_OUTBOUND_BUFFER", s)),
                    })
                    .transpose()?
                    .unwrap_or(presence_defaults.outbound_buffer),
            },
        })
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
