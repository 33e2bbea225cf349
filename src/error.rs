// src/error.rs
// Typed failure kinds for the turn pipeline and its collaborators.

use thiserror::Error;

/// Errors that cross the orchestrator boundary to the caller.
///
/// Everything else the pipeline can hit is either absorbed (memory and
/// persistence failures degrade the turn but keep it alive) or converted
/// into the fixed apology reply (generation failures), so this enum stays
/// deliberately small.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failures of the remote memory service.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("memory service unavailable: {0}")]
    Unavailable(String),

    #[error("memory service timed out")]
    Timeout,
}

/// Failures of the durable conversation log.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("conversation log unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the language model backend.
#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("model backend unavailable: {0}")]
    Unavailable(String),

    #[error("model request timed out")]
    Timeout,

    #[error("model backend rate limited")]
    RateLimited,
}

impl From<reqwest::Error> for MemoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MemoryError::Timeout
        } else {
            MemoryError::Unavailable(err.to_string())
        }
    }
}

impl From<reqwest::Error> for ResponderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResponderError::Timeout
        } else {
            ResponderError::Unavailable(err.to_string())
        }
    }
}

impl From<sqlx::Error> for LogError {
    fn from(err: sqlx::Error) -> Self {
        LogError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = TurnError::InvalidInput("message must not be empty".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("message must not be empty"));
    }

    #[test]
    fn test_memory_error_kinds() {
        let err = MemoryError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));
        assert!(MemoryError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn test_responder_error_kinds() {
        assert!(ResponderError::RateLimited.to_string().contains("rate limited"));
        assert!(ResponderError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: LogError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, LogError::Unavailable(_)));
    }
}
