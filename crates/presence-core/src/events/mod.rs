//! Domain events

mod presence_event;

pub use presence_event::{OwnAvailabilityChangedEvent, OwnStatusChangedEvent, PresenceEvent};
