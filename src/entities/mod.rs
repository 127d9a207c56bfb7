//! Data entities - memory records and their sources.

pub mod loader;
pub mod memory;

pub use loader::{MemoryLoader, MemorySource, load_memories, parse_memories};
pub use memory::{MemoryId, MemoryRecord, sample_memories};
