// src/llm/mod.rs

//! Language model boundary. The pipeline only ever sees the Responder
//! capability; which backend answers is wiring decided at startup.

pub mod openai;

pub use openai::OpenAIResponder;

use async_trait::async_trait;

use crate::error::ResponderError;

#[async_trait]
pub trait Responder: Send + Sync {
    /// One completion for the current message under the augmented system
    /// context. No retries at this seam; backoff policy, if any, belongs to
    /// the adapter behind it.
    async fn complete(&self, system_prompt: &str, user_text: &str)
        -> Result<String, ResponderError>;
}
