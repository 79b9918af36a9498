//! Log output for the presence client
//!
//! Everything goes to stderr; stdout belongs to the frame stream. `RUST_LOG`
//! overrides the preset's directive when set.

use crate::config::Environment;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, colored, for a terminal
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// One JSON object per event, for collectors
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(TracingError::UnknownFormat(s.to_string())),
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub directive: String,
    pub format: LogFormat,
    /// Log span open and close
    pub span_events: bool,
    /// Include source file and line
    pub source_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directive: "info".to_string(),
            format: LogFormat::Compact,
            span_events: false,
            source_location: false,
        }
    }
}

impl TracingConfig {
    /// Preset for a deployment environment
    ///
    /// Development turns on debug output for the presence crates only, so
    /// dependency chatter stays at info.
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                directive: "info,presence_client=debug,presence_core=debug".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
                source_location: true,
            },
            Environment::Staging => Self::default(),
            Environment::Production => Self {
                format: LogFormat::Json,
                ..Self::default()
            },
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter from `RUST_LOG`, falling back to this preset's directive
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directive))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber
///
/// Returns an error instead of panicking when one is already set.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(config.span_events());

    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}
