//! Presentation mapping
//!
//! Pure table from a participant's presence to the indicator a renderer
//! draws: a status icon plus an availability overlay.

use presence_core::{Availability, PresenceState};
use std::fmt;

/// Status icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Recording,
    Streaming,
    NoSleep,
    Neutral,
}

impl StatusIcon {
    /// Icon for a status tag; unknown tags are neutral
    #[must_use]
    pub fn for_status(status: &str) -> Self {
        match status {
            "recording" => Self::Recording,
            "streaming" => Self::Streaming,
            "no_sleep" => Self::NoSleep,
            _ => Self::Neutral,
        }
    }

    /// Asset name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Recording => "recording",
            Self::Streaming => "streaming",
            Self::NoSleep => "no_sleep",
            Self::Neutral => "neutral",
        }
    }
}

/// Availability overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityOverlay {
    DoNotDisturb,
    Open,
    NoAvailability,
}

impl AvailabilityOverlay {
    #[must_use]
    pub const fn for_availability(availability: Availability) -> Self {
        match availability {
            Availability::DoNotDisturb => Self::DoNotDisturb,
            Availability::Open => Self::Open,
            Availability::Unset => Self::NoAvailability,
        }
    }

    /// Asset name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DoNotDisturb => "dnd",
            Self::Open => "open",
            Self::NoAvailability => "no_availability",
        }
    }
}

/// Asset path for an icon or overlay name
fn asset_path(name: &str) -> String {
    format!("textures/icons/{name}.png")
}

/// Icon and overlay pair for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Presentation {
    pub icon: StatusIcon,
    pub overlay: AvailabilityOverlay,
}

impl Presentation {
    /// Derive the presentation of a presence state
    #[must_use]
    pub fn of(state: &PresenceState) -> Self {
        Self {
            icon: StatusIcon::for_status(&state.status),
            overlay: AvailabilityOverlay::for_availability(state.availability),
        }
    }

    /// Derive the presentation of a possibly absent state
    #[must_use]
    pub fn of_optional(state: Option<&PresenceState>) -> Option<Self> {
        state.map(Self::of)
    }

    /// Asset path of the icon
    #[must_use]
    pub fn icon_asset(&self) -> String {
        asset_path(self.icon.name())
    }

    /// Asset path of the overlay
    #[must_use]
    pub fn overlay_asset(&self) -> String {
        asset_path(self.overlay.name())
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.icon.name(), self.overlay.name())
    }
}
