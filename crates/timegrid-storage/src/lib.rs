//! # timegrid-storage
//!
//! [`PersistentStore`] implementations for the TimeGrid client: a JSON
//! file-backed store surviving process restarts and an in-memory store for
//! tests and ephemeral sessions.
//!
//! [`PersistentStore`]: timegrid_core::traits::PersistentStore

pub mod file;
pub mod keys;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
