//! Session lifecycle management

mod lifecycle;

pub use lifecycle::{JoinNotice, SessionLifecycle, SessionState};
