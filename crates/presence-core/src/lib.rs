//! # presence-core
//!
//! Domain layer containing the presence state entity, value objects, change
//! events, and the persistence port. This crate has no dependencies on a
//! transport, storage medium, or async runtime.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{PresenceState, SavedPresence, UNSET_STATUS};
pub use error::DomainError;
pub use events::{OwnAvailabilityChangedEvent, OwnStatusChangedEvent, PresenceEvent};
pub use traits::{PersistResult, StatePersistence};
pub use value_objects::{Availability, ParticipantId, ParticipantIdParseError};
