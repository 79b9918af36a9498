//! Own-state publishing

mod publisher;

pub use publisher::Publisher;
