// src/chat/orchestrator.rs

//! The core of the system: one stateless pipeline per incoming turn.
//!
//! Four independently-failing remote operations are sequenced here
//! (memory search, generation, log persistence, memory update) and each
//! gets its own failure policy. Only generation failure is terminal for
//! the turn; everything else degrades and the reply still reaches the
//! caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};

use crate::config::EngramConfig;
use crate::error::{LogError, MemoryError, TurnError};
use crate::history::traits::ConversationLog;
use crate::history::types::Role;
use crate::llm::Responder;
use crate::memory::traits::MemoryStore;
use crate::memory::types::{MemoryFact, MemoryMessage};

use super::prompt::build_system_prompt;

/// Returned verbatim when generation fails or times out. The turn is not
/// recorded or learned from in that case.
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request.";

/// Injected pipeline constants. The orchestrator treats these as fixed; it
/// owns no configuration of its own.
#[derive(Debug, Clone)]
pub struct TurnConfig {
    pub recall_limit: usize,
    pub recall_timeout: Duration,
    pub generation_timeout: Duration,
    pub persistence_timeout: Duration,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            recall_limit: 3,
            recall_timeout: Duration::from_secs(10),
            generation_timeout: Duration::from_secs(60),
            persistence_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&EngramConfig> for TurnConfig {
    fn from(config: &EngramConfig) -> Self {
        Self {
            recall_limit: config.recall_limit,
            recall_timeout: config.recall_timeout(),
            generation_timeout: config.generation_timeout(),
            persistence_timeout: config.persistence_timeout(),
        }
    }
}

/// Stateless across requests: holds only capability handles and constants,
/// so concurrent turns need no locking here.
pub struct TurnOrchestrator {
    memory: Arc<dyn MemoryStore>,
    log: Arc<dyn ConversationLog>,
    responder: Arc<dyn Responder>,
    config: TurnConfig,
}

impl TurnOrchestrator {
    pub fn new(
        memory: Arc<dyn MemoryStore>,
        log: Arc<dyn ConversationLog>,
        responder: Arc<dyn Responder>,
        config: TurnConfig,
    ) -> Self {
        Self { memory, log, responder, config }
    }

    /// Run one full turn. Always yields a non-empty reply for validated
    /// input; the only error that crosses this boundary is input validation.
    pub async fn handle_turn(
        &self,
        owner_id: &str,
        session_id: &str,
        user_text: &str,
    ) -> Result<String, TurnError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(TurnError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let facts = self.recall(owner_id, user_text).await;
        let system_prompt = build_system_prompt(&facts);

        let assistant_text = match tokio::time::timeout(
            self.config.generation_timeout,
            self.responder.complete(&system_prompt, user_text),
        )
        .await
        {
            Ok(Ok(text)) => {
                if text.trim().is_empty() {
                    error!("Generation produced an empty reply for session {}", session_id);
                    return Ok(APOLOGY.to_string());
                }
                text
            }
            Ok(Err(err)) => {
                error!("Generation failed for session {}: {}", session_id, err);
                return Ok(APOLOGY.to_string());
            }
            Err(_) => {
                error!(
                    "Generation timed out after {:?} for session {}",
                    self.config.generation_timeout, session_id
                );
                return Ok(APOLOGY.to_string());
            }
        };

        // Persistence and memory update only exist for future turns; they run
        // concurrently and neither may cancel or fail the other.
        let (persisted, remembered) = tokio::join!(
            self.persist_turn(session_id, owner_id, user_text, &assistant_text),
            self.remember_turn(owner_id, user_text, &assistant_text),
        );

        if let Err(err) = persisted {
            warn!("Failed to persist turn for session {}: {}", session_id, err);
        }
        if let Err(err) = remembered {
            warn!("Failed to update long-term memory for owner {}: {}", owner_id, err);
        }

        Ok(assistant_text)
    }

    /// Bounded, best-effort retrieval. A failure or timeout here costs the
    /// turn its context, never its reply.
    async fn recall(&self, owner_id: &str, query: &str) -> Vec<MemoryFact> {
        match tokio::time::timeout(
            self.config.recall_timeout,
            self.memory.search(query, owner_id, self.config.recall_limit),
        )
        .await
        {
            Ok(Ok(facts)) => facts,
            Ok(Err(err)) => {
                warn!("Memory search failed for owner {}, continuing without facts: {}", owner_id, err);
                Vec::new()
            }
            Err(_) => {
                warn!("Memory search timed out for owner {}, continuing without facts", owner_id);
                Vec::new()
            }
        }
    }

    /// A turn is two linked appends, user then assistant; the assistant
    /// record is only written once the user record made it in.
    async fn persist_turn(
        &self,
        session_id: &str,
        owner_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), LogError> {
        let write = async {
            self.log
                .append(session_id, owner_id, Role::User, user_text)
                .await?;
            self.log
                .append(session_id, owner_id, Role::Assistant, assistant_text)
                .await?;
            Ok(())
        };

        match tokio::time::timeout(self.config.persistence_timeout, write).await {
            Ok(result) => result,
            Err(_) => Err(LogError::Unavailable(
                "conversation log append timed out".to_string(),
            )),
        }
    }

    async fn remember_turn(
        &self,
        owner_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), MemoryError> {
        let messages = [
            MemoryMessage::user(user_text),
            MemoryMessage::assistant(assistant_text),
        ];

        match tokio::time::timeout(
            self.config.recall_timeout,
            self.memory.append(&messages, owner_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(MemoryError::Timeout),
        }
    }
}
