//! Narrative rendering with LLM-first and deterministic fallback.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::DeckAnalysis;
use crate::metrics;
use crate::reference::ReferenceLists;

use super::config::{NarrativeConfig, NarrativeSource};
use super::fallback;
use super::llm::{create_llm_client, CompletionRequest, LlmClient, LlmError};
use super::prompt;

/// What the narrative should talk about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeMode {
    /// How the deck plays, wins and where it is weak.
    PlayPatterns,
    /// How to move the deck to another bracket.
    AdjustTo { target: u8 },
}

/// How a narrative was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeMethod {
    Llm,
    Fallback,
}

impl NarrativeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeMethod::Llm => "llm",
            NarrativeMethod::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// Markdown text.
    pub text: String,
    pub method: NarrativeMethod,
}

/// Turns a finished analysis into prose.
pub struct Narrator {
    llm: Option<Arc<dyn LlmClient>>,
    lists: Arc<ReferenceLists>,
    max_tokens: u32,
    temperature: f32,
}

impl Narrator {
    /// Narrator that never contacts an LLM.
    pub fn fallback_only() -> Self {
        Self {
            llm: None,
            lists: ReferenceLists::shared(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }

    /// Narrator that asks `client` first.
    pub fn with_llm(client: Arc<dyn LlmClient>) -> Self {
        Self {
            llm: Some(client),
            ..Self::fallback_only()
        }
    }

    /// Build from the `[narrative]` section.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, LlmError> {
        match (config.mode, &config.llm) {
            (NarrativeSource::FallbackOnly, _) => Ok(Self::fallback_only()),
            (NarrativeSource::LlmFirst, Some(llm)) => {
                let mut narrator = Self::with_llm(create_llm_client(llm)?);
                narrator.max_tokens = llm.max_tokens;
                narrator.temperature = llm.temperature;
                Ok(narrator)
            }
            (NarrativeSource::LlmFirst, None) => Err(LlmError::NotConfigured),
        }
    }

    pub fn with_reference_lists(mut self, lists: Arc<ReferenceLists>) -> Self {
        self.lists = lists;
        self
    }

    pub fn source(&self) -> NarrativeSource {
        if self.llm.is_some() {
            NarrativeSource::LlmFirst
        } else {
            NarrativeSource::FallbackOnly
        }
    }

    /// Render a narrative. Never fails: LLM errors fall back to fixed text.
    pub async fn render(&self, analysis: &DeckAnalysis, mode: NarrativeMode) -> Narrative {
        if let Some(llm) = &self.llm {
            match self.ask_llm(llm.as_ref(), analysis, mode).await {
                Ok(text) => return self.finish(text, NarrativeMethod::Llm),
                Err(e) => {
                    warn!("LLM narrative failed ({}), using fallback: {}", llm.provider(), e);
                    metrics::COLLABORATOR_FAILURES
                        .with_label_values(&["llm"])
                        .inc();
                }
            }
        }

        let text = match mode {
            NarrativeMode::PlayPatterns => fallback::play_patterns(analysis),
            NarrativeMode::AdjustTo { target } => fallback::adjust_to(analysis, target),
        };
        self.finish(text, NarrativeMethod::Fallback)
    }

    fn finish(&self, text: String, method: NarrativeMethod) -> Narrative {
        metrics::NARRATIVES_RENDERED
            .with_label_values(&[method.as_str()])
            .inc();
        Narrative { text, method }
    }

    async fn ask_llm(
        &self,
        llm: &dyn LlmClient,
        analysis: &DeckAnalysis,
        mode: NarrativeMode,
    ) -> Result<String, LlmError> {
        let prompt = match mode {
            NarrativeMode::PlayPatterns => {
                prompt::play_patterns_prompt(analysis, &self.lists.well_known)
            }
            NarrativeMode::AdjustTo { target } => {
                prompt::adjustment_prompt(analysis, target, &self.lists.well_known)
            }
        };
        let request = CompletionRequest::new(prompt)
            .with_system(prompt::SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let start = Instant::now();
        let response = llm.complete(request).await;
        metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&[llm.provider(), "complete"])
            .observe(start.elapsed().as_secs_f64());
        let response = response?;

        metrics::LLM_TOKENS
            .with_label_values(&[llm.provider(), "input"])
            .inc_by(response.usage.input_tokens as u64);
        metrics::LLM_TOKENS
            .with_label_values(&[llm.provider(), "output"])
            .inc_by(response.usage.output_tokens as u64);
        debug!(
            "LLM narrative from {} ({} output tokens)",
            response.model, response.usage.output_tokens
        );

        if response.text.trim().is_empty() {
            return Err(LlmError::Json("empty completion".to_string()));
        }
        Ok(response.text)
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("source", &self.source())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
