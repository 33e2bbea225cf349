// src/history/migration.rs
//! Handles migrations for SQLite: ensures conversation_log matches latest schema.
//! Run this at startup to guarantee schema compatibility.

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

const CREATE_CONVERSATION_LOG: &str = r#"
CREATE TABLE IF NOT EXISTS conversation_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
    content TEXT NOT NULL,
    created_at DATETIME NOT NULL
);
"#;

const CREATE_LOG_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_conversation_log_session ON conversation_log(session_id, id);
CREATE INDEX IF NOT EXISTS idx_conversation_log_owner ON conversation_log(owner_id);
"#;

/// Runs all required migrations for the SQLite backend.
/// Safe to call at every startup (idempotent).
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_CONVERSATION_LOG).await?;
    pool.execute(CREATE_LOG_INDICES).await?;
    Ok(())
}
