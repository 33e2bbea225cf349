// src/memory/traits.rs

//! Capability trait for the memory backend. All retrieval and distillation
//! goes through this; no direct service calls in business logic.

use async_trait::async_trait;

use crate::error::MemoryError;
use crate::memory::types::{MemoryFact, MemoryMessage};

#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Top `limit` facts about `owner_id` relevant to `query`,
    /// relevance-ranked descending.
    async fn search(
        &self,
        query: &str,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryFact>, MemoryError>;

    /// Hand a completed turn to the service so it can distill new facts.
    async fn append(&self, messages: &[MemoryMessage], owner_id: &str) -> Result<(), MemoryError>;

    /// Drop everything known about an owner.
    async fn clear(&self, owner_id: &str) -> Result<(), MemoryError>;
}
