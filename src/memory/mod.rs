// src/memory/mod.rs

//! Long-term, owner-scoped memory, consumed as an opaque remote service.
//! Facts are append-only from this side; deduplication and merging are the
//! service's own business.

pub mod noop;
pub mod remote;
pub mod traits;
pub mod types;

pub use noop::NoopMemoryStore;
pub use remote::RemoteMemoryStore;
pub use traits::MemoryStore;
pub use types::{MemoryFact, MemoryMessage};
