//! Narrative layer: prose about a finished analysis.
//!
//! A [`Narrator`] asks an LLM first when configured and falls back to fixed
//! Markdown on any error, so rendering itself never fails.

pub mod config;
pub mod fallback;
pub mod llm;
mod narrator;
pub mod prompt;

pub use config::{LlmConfig, LlmProvider, NarrativeConfig, NarrativeSource};
pub use llm::{
    create_llm_client, AnthropicClient, CompletionRequest, CompletionResponse, LlmClient,
    LlmError, LlmUsage, OllamaClient,
};
pub use narrator::{Narrative, NarrativeMethod, NarrativeMode, Narrator};
