// src/chat/prompt.rs

//! Deterministic system-context assembly from retrieved facts.

use crate::memory::types::MemoryFact;

/// Rendered in place of the fact list when retrieval came back empty, so the
/// generation prompt is never ambiguous about whether lookup ran.
pub const NO_FACTS_SENTINEL: &str = "no known facts";

/// Pure and total: same ordered facts in, byte-identical prompt out. Facts
/// render one per line in the order received (relevance-ranked descending by
/// the memory service).
pub fn build_system_prompt(facts: &[MemoryFact]) -> String {
    let rendered = if facts.is_empty() {
        NO_FACTS_SENTINEL.to_string()
    } else {
        facts
            .iter()
            .map(|fact| format!("- {}", fact.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are a helpful assistant with memory. Answer based on the user's message and what is known about them.\nKnown facts about the user:\n{rendered}"
    )
}
