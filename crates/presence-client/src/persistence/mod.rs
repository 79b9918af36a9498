//! Persistence adapters for the local participant's last chosen state

mod file;
mod memory;
mod worker;

pub use file::FilePersistence;
pub use memory::MemoryPersistence;
pub use worker::PersistenceWorker;
