//! Stylist agent - narrates size recommendations through an LLM
//!
//! This crate wraps the deterministic core with the one outbound call the
//! system makes:
//! - `prompt` assembles the stylist prompt from a `RecommendationRequest`
//! - `llm` is the pluggable `LlmClient` seam
//! - `openai` talks to any OpenAI-compatible chat-completions endpoint
//! - `advisor` runs a full recommendation and degrades when the call fails
//!
//! # Safety Principle
//!
//! The LLM only narrates. Its reply reaches the displayed size solely through
//! `extract_size` and the configured `SizePrecedence`.

pub mod advisor;
pub mod llm;
pub mod openai;
pub mod prompt;

pub use advisor::{Recommendation, SizeAdvisor};
pub use llm::{ChatCompletion, LlmClient};
pub use openai::OpenAiCompatibleClient;
