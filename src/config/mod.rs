// src/config/mod.rs
// All tunables load from the environment, with .env support and sane defaults.

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct EngramConfig {
    // ── Model Configuration
    pub model: String,
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub openai_timeout: u64,

    // ── Memory Service Configuration
    pub memory_url: String,
    pub memory_timeout: u64,
    pub recall_limit: usize,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: usize,
    pub database_timeout: u64,

    // ── API Defaults
    pub history_default_limit: usize,
    pub history_max_limit: usize,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and extra whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl EngramConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            model: env_var_or("ENGRAM_MODEL", "gpt-4o-mini".to_string()),
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com/v1".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_timeout: env_var_or("ENGRAM_OPENAI_TIMEOUT", 60),
            memory_url: env_var_or("ENGRAM_MEMORY_URL", "http://localhost:8888".to_string()),
            memory_timeout: env_var_or("ENGRAM_MEMORY_TIMEOUT", 10),
            recall_limit: env_var_or("ENGRAM_RECALL_LIMIT", 3),
            database_url: env_var_or("DATABASE_URL", "sqlite:./engram.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            database_timeout: env_var_or("ENGRAM_DATABASE_TIMEOUT", 5),
            history_default_limit: env_var_or("ENGRAM_HISTORY_DEFAULT_LIMIT", 50),
            history_max_limit: env_var_or("ENGRAM_HISTORY_MAX_LIMIT", 100),
            host: env_var_or("ENGRAM_HOST", "0.0.0.0".to_string()),
            port: env_var_or("ENGRAM_PORT", 8000),
            log_level: env_var_or("ENGRAM_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods for Common Operations ---

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Budget for a single model completion (the dominant blocking point of a turn)
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout)
    }

    /// Budget for memory search/append; never allowed to stall the reply beyond this
    pub fn recall_timeout(&self) -> Duration {
        Duration::from_secs(self.memory_timeout)
    }

    /// Budget for the two conversation-log appends of a turn
    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_secs(self.database_timeout)
    }
}
