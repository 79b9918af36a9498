//! # presence-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppSettings, ClientConfig, ConfigError, Environment, IdentityConfig, PresenceConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, LogFormat, TracingConfig, TracingError};
