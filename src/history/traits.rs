// src/history/traits.rs

//! Capability trait for the conversation log. All turn persistence and
//! history reads go through this; no direct DB calls in the pipeline.

use async_trait::async_trait;

use crate::error::LogError;
use crate::history::types::{LogRecord, Role};

#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Append one message to a session. Unknown session ids simply start a
    /// new session; there is no separate creation call.
    async fn append(
        &self,
        session_id: &str,
        owner_id: &str,
        role: Role,
        content: &str,
    ) -> Result<LogRecord, LogError>;

    /// The most recent `limit` messages of a session, re-ordered to
    /// chronological before returning.
    async fn list(&self, session_id: &str, limit: usize) -> Result<Vec<LogRecord>, LogError>;

    /// Distinct session ids an owner has written to, most recent first.
    async fn sessions(&self, owner_id: &str) -> Result<Vec<String>, LogError>;
}
