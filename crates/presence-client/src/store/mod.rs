//! Local presence state store

mod presence_store;

pub use presence_store::{OwnStateChange, PresenceStore};
