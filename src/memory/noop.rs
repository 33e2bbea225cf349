// src/memory/noop.rs

//! Fallback MemoryStore selected at startup when the memory service is
//! unreachable. Every turn then runs in degraded, context-free mode, which
//! keeps replies flowing while the service is down.

use async_trait::async_trait;

use crate::error::MemoryError;
use crate::memory::traits::MemoryStore;
use crate::memory::types::{MemoryFact, MemoryMessage};

pub struct NoopMemoryStore;

#[async_trait]
impl MemoryStore for NoopMemoryStore {
    async fn search(
        &self,
        _query: &str,
        _owner_id: &str,
        _limit: usize,
    ) -> Result<Vec<MemoryFact>, MemoryError> {
        Ok(Vec::new())
    }

    async fn append(
        &self,
        _messages: &[MemoryMessage],
        _owner_id: &str,
    ) -> Result<(), MemoryError> {
        Ok(())
    }

    async fn clear(&self, _owner_id: &str) -> Result<(), MemoryError> {
        Ok(())
    }
}
