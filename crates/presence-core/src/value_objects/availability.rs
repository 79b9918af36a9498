//! Availability - whether a participant welcomes interruption

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Closed set of availability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    /// Happy to be contacted
    Open,
    /// Please do not interrupt
    DoNotDisturb,
    /// No availability chosen
    #[default]
    Unset,
}

impl Availability {
    /// All availability levels, in selector order
    pub const ALL: [Self; 3] = [Self::Open, Self::DoNotDisturb, Self::Unset];

    /// Get the wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::DoNotDisturb => "DO_NOT_DISTURB",
            Self::Unset => "UNSET",
        }
    }

    /// Check if an availability has been chosen
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "DO_NOT_DISTURB" | "DND" => Ok(Self::DoNotDisturb),
            "UNSET" | "NONE" => Ok(Self::Unset),
            _ => Err(DomainError::InvalidAvailability(s.to_string())),
        }
    }
}
