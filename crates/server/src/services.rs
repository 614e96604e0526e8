//! Builds the analyzer and narrator from configuration.
//!
//! Shared by `bracketd` and `analyze-deck` so both binaries load config and
//! wire collaborators the same way.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use bracket_core::{
    load_config, validate_config, ComboDatabase, Config, DeckAnalyzer, NoComboDatabase, Narrator,
    ReferenceLists, ScryfallClient, SpellbookClient,
};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "BRACKET_CONFIG";

/// Config file path from `BRACKET_CONFIG`, defaulting to `config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Load and validate the configuration file.
pub fn load_runtime_config() -> Result<Config> {
    let config_path = config_path();

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Build a [`DeckAnalyzer`] backed by Scryfall and, when enabled, Spellbook.
///
/// With `scryfall.refresh_game_changers` the embedded Game Changer list is
/// extended with Scryfall's current list; a failed refresh keeps the embedded
/// list.
pub async fn build_analyzer(config: &Config) -> Result<DeckAnalyzer> {
    let scryfall =
        ScryfallClient::new(&config.scryfall).context("Failed to create Scryfall client")?;
    info!("Using Scryfall card resolver at {}", config.scryfall.base_url);

    let lists = if config.scryfall.refresh_game_changers {
        match scryfall.game_changers().await {
            Ok(names) => Arc::new(ReferenceLists::embedded().with_extra_game_changers(&names)),
            Err(e) => {
                warn!("Could not refresh Game Changers, using embedded list: {}", e);
                ReferenceLists::shared()
            }
        }
    } else {
        ReferenceLists::shared()
    };

    let combos: Arc<dyn ComboDatabase> = if config.spellbook.enabled {
        info!("Using Commander Spellbook at {}", config.spellbook.base_url);
        Arc::new(
            SpellbookClient::new(&config.spellbook)
                .context("Failed to create Spellbook client")?,
        )
    } else {
        info!("Combo lookup disabled in config");
        Arc::new(NoComboDatabase)
    };

    Ok(DeckAnalyzer::new(Arc::new(scryfall))
        .with_combo_database(combos)
        .with_policy(config.scoring.clone())
        .with_reference_lists(lists))
}

/// Build the [`Narrator`] for the `[narrative]` section, sharing the
/// analyzer's reference lists.
pub fn build_narrator(config: &Config, analyzer: &DeckAnalyzer) -> Result<Narrator> {
    let narrator =
        Narrator::from_config(&config.narrative).context("Failed to create narrator")?;
    info!("Narrative mode: {:?}", narrator.source());
    Ok(narrator.with_reference_lists(Arc::clone(analyzer.reference_lists())))
}
