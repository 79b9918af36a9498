//! Ports implemented by infrastructure adapters

mod persistence;

pub use persistence::{PersistResult, StatePersistence};
