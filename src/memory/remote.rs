// src/memory/remote.rs

//! Live MemoryStore against the remote memory service's REST surface.
//! No wrapper SDK; just reqwest and typed extraction.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::MemoryError;
use crate::memory::traits::MemoryStore;
use crate::memory::types::{MemoryFact, MemoryMessage};

#[derive(Debug)]
pub struct RemoteMemoryStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<MemoryFact>,
}

impl RemoteMemoryStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MemoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| MemoryError::Unavailable(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a store and probe it once. Startup uses this to decide between
    /// the live adapter and the no-op fallback.
    pub async fn connect(base_url: &str, timeout: Duration) -> Result<Self, MemoryError> {
        let store = Self::new(base_url, timeout)?;
        store.health().await?;
        Ok(store)
    }

    async fn health(&self) -> Result<(), MemoryError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(MemoryError::Unavailable(format!(
                "health check returned {}",
                resp.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl MemoryStore for RemoteMemoryStore {
    async fn search(
        &self,
        query: &str,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryFact>, MemoryError> {
        let body = json!({
            "query": query,
            "user_id": owner_id,
            "limit": limit,
        });

        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(MemoryError::Unavailable(format!(
                "search returned {}",
                resp.status()
            )));
        }

        let parsed: SearchResponse = resp
            .json()
            .await
            .map_err(|err| MemoryError::Unavailable(err.to_string()))?;

        Ok(parsed.results)
    }

    async fn append(&self, messages: &[MemoryMessage], owner_id: &str) -> Result<(), MemoryError> {
        let body = json!({
            "messages": messages,
            "user_id": owner_id,
        });

        let resp = self
            .client
            .post(format!("{}/memories", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(MemoryError::Unavailable(format!(
                "append returned {}",
                resp.status()
            )));
        }

        Ok(())
    }

    async fn clear(&self, owner_id: &str) -> Result<(), MemoryError> {
        let resp = self
            .client
            .delete(format!("{}/memories/{}", self.base_url, owner_id))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(MemoryError::Unavailable(format!(
                "clear returned {}",
                resp.status()
            )));
        }

        Ok(())
    }
}
