use std::sync::Arc;

use bracket_core::{Config, DeckAnalyzer, Narrator, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    analyzer: Arc<DeckAnalyzer>,
    narrator: Arc<Narrator>,
}

impl AppState {
    pub fn new(config: Config, analyzer: Arc<DeckAnalyzer>, narrator: Arc<Narrator>) -> Self {
        Self {
            config,
            analyzer,
            narrator,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn analyzer(&self) -> &DeckAnalyzer {
        self.analyzer.as_ref()
    }

    pub fn narrator(&self) -> &Narrator {
        self.narrator.as_ref()
    }
}
