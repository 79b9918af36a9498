//! Domain entities - core business objects

mod presence_state;

pub use presence_state::{PresenceState, SavedPresence, UNSET_STATUS};
