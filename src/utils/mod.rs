//! Utility modules: validation helpers and in-memory storage

pub mod memory_storage;
pub mod validation;

pub use memory_storage::MemoryStore;
pub use validation::*;
