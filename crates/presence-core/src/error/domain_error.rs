//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Identity Errors
    // =========================================================================
    #[error("Local participant identity is not available")]
    MissingIdentity,

    #[error("Invalid participant id: {0}")]
    InvalidParticipantId(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid availability: {0}")]
    InvalidAvailability(String),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    /// Get an error code string for logs and host integrations
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::InvalidParticipantId(_) => "INVALID_PARTICIPANT_ID",
            Self::InvalidAvailability(_) => "INVALID_AVAILABILITY",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Check if this error prevents constructing a presence store
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::MissingIdentity | Self::InvalidParticipantId(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAvailability(_))
    }
}

impl From<crate::value_objects::ParticipantIdParseError> for DomainError {
    fn from(err: crate::value_objects::ParticipantIdParseError) -> Self {
        match err {
            crate::value_objects::ParticipantIdParseError::InvalidFormat(raw) => {
                Self::InvalidParticipantId(raw)
            }
        }
    }
}
