// src/history/sqlite.rs

//! Implements ConversationLog over SQLite.

use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use crate::error::LogError;
use crate::history::migration;
use crate::history::traits::ConversationLog;
use crate::history::types::{LogRecord, Role};

pub struct SqliteConversationLog {
    pool: SqlitePool,
}

impl SqliteConversationLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        migration::run_migrations(&self.pool).await
    }
}

#[async_trait]
impl ConversationLog for SqliteConversationLog {
    async fn append(
        &self,
        session_id: &str,
        owner_id: &str,
        role: Role,
        content: &str,
    ) -> Result<LogRecord, LogError> {
        let created_at = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO conversation_log (session_id, owner_id, role, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(session_id)
        .bind(owner_id)
        .bind(role.as_str())
        .bind(content)
        .bind(created_at.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");

        Ok(LogRecord {
            id,
            session_id: session_id.to_string(),
            owner_id: owner_id.to_string(),
            role,
            content: content.to_string(),
            created_at,
        })
    }

    async fn list(&self, session_id: &str, limit: usize) -> Result<Vec<LogRecord>, LogError> {
        // Newest-first at the storage layer; AUTOINCREMENT ids are the
        // per-session submission order.
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, owner_id, role, content, created_at
            FROM conversation_log
            WHERE session_id = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let id: i64 = row.get("id");
            let session_id: String = row.get("session_id");
            let owner_id: String = row.get("owner_id");
            let role: String = row.get("role");
            let content: String = row.get("content");
            let created_at: NaiveDateTime = row.get("created_at");

            let role = role.parse::<Role>().map_err(LogError::Unavailable)?;

            records.push(LogRecord {
                id,
                session_id,
                owner_id,
                role,
                content,
                created_at: Utc.from_utc_datetime(&created_at),
            });
        }

        // Callers want chronological order.
        records.reverse();

        Ok(records)
    }

    async fn sessions(&self, owner_id: &str) -> Result<Vec<String>, LogError> {
        let rows = sqlx::query(
            r#"
            SELECT session_id
            FROM conversation_log
            WHERE owner_id = ?
            GROUP BY session_id
            ORDER BY MAX(id) DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.get::<String, _>("session_id"))
            .collect())
    }
}
