use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::analysis::ScoringPolicy;
use crate::combos::SpellbookConfig;
use crate::narrative::{NarrativeConfig, NarrativeSource};
use crate::resolver::ScryfallConfig;

/// Root configuration. Every section has defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scryfall: ScryfallConfig,
    #[serde(default)]
    pub spellbook: SpellbookConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
    #[serde(default)]
    pub scoring: ScoringPolicy,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub scryfall: ScryfallConfig,
    pub spellbook: SpellbookConfig,
    pub narrative: SanitizedNarrativeConfig,
    pub scoring: ScoringPolicy,
}

/// Narrative section with the LLM key hidden.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedNarrativeConfig {
    pub mode: NarrativeSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<SanitizedLlmConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedLlmConfig {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            scryfall: config.scryfall.clone(),
            spellbook: config.spellbook.clone(),
            narrative: SanitizedNarrativeConfig {
                mode: config.narrative.mode,
                llm: config.narrative.llm.as_ref().map(|llm| SanitizedLlmConfig {
                    provider: llm.provider.to_string(),
                    model: llm.model.clone(),
                    api_base: llm.api_base.clone(),
                    api_key_configured: llm.api_key.as_deref().is_some_and(|k| !k.is_empty()),
                    max_tokens: llm.max_tokens,
                    timeout_secs: llm.timeout_secs,
                }),
            },
            scoring: config.scoring.clone(),
        }
    }
}
