// src/chat/mod.rs

//! The turn pipeline: retrieve memory, build the augmented context, generate,
//! then record and learn from the exchange.

pub mod orchestrator;
pub mod prompt;

pub use orchestrator::{TurnConfig, TurnOrchestrator, APOLOGY};
pub use prompt::{build_system_prompt, NO_FACTS_SENTINEL};
