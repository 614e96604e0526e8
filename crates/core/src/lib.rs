pub mod analysis;
pub mod card;
pub mod combos;
pub mod config;
pub mod decklist;
pub mod metrics;
pub mod narrative;
pub mod reference;
pub mod resolver;
pub mod testing;

pub use analysis::{
    evaluate_deck, AnalysisError, BracketDecision, DeckAnalysis, DeckAnalyzer, ScoringPolicy,
};
pub use card::{Card, CardFace, Color, Rarity};
pub use combos::{
    ComboDatabase, ComboError, ComboResult, ComboTier, DeckCombos, NoComboDatabase,
    SpellbookClient, SpellbookConfig,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use decklist::{parse_decklist, DeckEntry};
pub use narrative::{
    LlmClient, LlmError, Narrative, NarrativeConfig, NarrativeMethod, NarrativeMode, Narrator,
};
pub use reference::{bracket_info, BracketInfo, ReferenceLists, BRACKETS};
pub use resolver::{CardResolver, Resolution, ResolverError, ScryfallClient, ScryfallConfig};
