// src/state.rs

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::chat::{TurnConfig, TurnOrchestrator};
use crate::config::EngramConfig;
use crate::history::sqlite::SqliteConversationLog;
use crate::history::traits::ConversationLog;
use crate::llm::openai::OpenAIResponder;
use crate::llm::Responder;
use crate::memory::noop::NoopMemoryStore;
use crate::memory::remote::RemoteMemoryStore;
use crate::memory::traits::MemoryStore;

/// Dependency-injected context, built once at process start and handed to
/// every request handler. No global mutable state anywhere else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EngramConfig>,
    pub memory: Arc<dyn MemoryStore>,
    pub log: Arc<dyn ConversationLog>,
    pub responder: Arc<dyn Responder>,
    pub orchestrator: Arc<TurnOrchestrator>,
}

/// Wire up the capability handles and the orchestrator.
///
/// The memory service is probed exactly once here; if it is unreachable the
/// no-op store is substituted and the process serves context-free replies
/// until the next restart.
pub async fn create_app_state(config: EngramConfig, pool: SqlitePool) -> anyhow::Result<AppState> {
    let config = Arc::new(config);

    let log_store = SqliteConversationLog::new(pool);
    log_store.run_migrations().await?;
    let log: Arc<dyn ConversationLog> = Arc::new(log_store);

    let memory: Arc<dyn MemoryStore> =
        match RemoteMemoryStore::connect(&config.memory_url, config.recall_timeout()).await {
            Ok(store) => {
                info!("Memory service connected at {}", config.memory_url);
                Arc::new(store)
            }
            Err(err) => {
                warn!(
                    "Memory service unreachable ({}); continuing without long-term memory",
                    err
                );
                Arc::new(NoopMemoryStore)
            }
        };

    anyhow::ensure!(!config.openai_api_key.is_empty(), "OPENAI_API_KEY not set");
    let responder: Arc<dyn Responder> = Arc::new(OpenAIResponder::new(
        &config.openai_base_url,
        &config.openai_api_key,
        &config.model,
        config.generation_timeout(),
    )?);

    let orchestrator = Arc::new(TurnOrchestrator::new(
        memory.clone(),
        log.clone(),
        responder.clone(),
        TurnConfig::from(config.as_ref()),
    ));

    Ok(AppState { config, memory, log, responder, orchestrator })
}
