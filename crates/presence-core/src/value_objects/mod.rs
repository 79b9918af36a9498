//! Value objects - immutable types that represent domain concepts

mod availability;
mod participant_id;

pub use availability::Availability;
pub use participant_id::{ParticipantId, ParticipantIdParseError};
