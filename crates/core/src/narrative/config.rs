//! Narrative layer configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where narrative text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    /// Deterministic text only; never contacts an LLM.
    #[default]
    FallbackOnly,

    /// Ask the LLM first and fall back to deterministic text on any error.
    LlmFirst,
}

impl NarrativeSource {
    /// Returns true if this mode needs an `[narrative.llm]` section.
    pub fn requires_llm(&self) -> bool {
        matches!(self, NarrativeSource::LlmFirst)
    }
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Anthropic Messages API.
    Anthropic,
    /// Local Ollama instance.
    Ollama,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::Ollama => "ollama",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// Model name/identifier.
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (proxies, remote Ollama).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Maximum tokens for a narrative.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

impl LlmConfig {
    pub fn new(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: None,
            api_base: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("LLM model name cannot be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("LLM max_tokens must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("LLM timeout_secs must be greater than 0".to_string());
        }
        // Ollama runs locally without a key; a proxy base URL may not need one either.
        if self.provider == LlmProvider::Anthropic
            && self.api_key.is_none()
            && self.api_base.is_none()
        {
            return Err(format!(
                "LLM provider {} requires api_key or api_base",
                self.provider
            ));
        }
        Ok(())
    }
}

/// Narrative configuration (`[narrative]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default)]
    pub mode: NarrativeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
}

impl NarrativeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.mode.requires_llm() && self.llm.is_none() {
            return Err(format!(
                "Narrative mode {:?} requires a [narrative.llm] section",
                self.mode
            ));
        }
        if let Some(llm) = &self.llm {
            llm.validate()?;
        }
        Ok(())
    }
}
