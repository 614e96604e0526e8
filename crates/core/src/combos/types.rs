use serde::{Deserialize, Serialize};

/// Power tier a combo database assigns to a combo, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboTier {
    Casual,
    PreconAppropriate,
    Oddball,
    Spicy,
    Powerful,
    Ruthless,
}

impl ComboTier {
    /// The tier at which a single combo forces bracket 4.
    pub const TOP: ComboTier = ComboTier::Ruthless;

    /// Parse a bracket tag ("C", "PA", "O", "S", "PW", "R").
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "C" => Some(ComboTier::Casual),
            "PA" => Some(ComboTier::PreconAppropriate),
            "O" => Some(ComboTier::Oddball),
            "S" => Some(ComboTier::Spicy),
            "PW" => Some(ComboTier::Powerful),
            "R" => Some(ComboTier::Ruthless),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ComboTier::Casual => "C",
            ComboTier::PreconAppropriate => "PA",
            ComboTier::Oddball => "O",
            ComboTier::Spicy => "S",
            ComboTier::Powerful => "PW",
            ComboTier::Ruthless => "R",
        }
    }

    /// Bracket the tier suggests on its own.
    pub fn suggested_bracket(&self) -> u8 {
        match self {
            ComboTier::Ruthless => 4,
            ComboTier::Spicy | ComboTier::Powerful => 3,
            ComboTier::Oddball | ComboTier::PreconAppropriate => 2,
            ComboTier::Casual => 1,
        }
    }
}

/// One combo as reported by the combo database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboResult {
    pub id: String,
    pub card_names: Vec<String>,
    /// Effects the combo produces ("Infinite mana", "Win the game").
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<ComboTier>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    /// For near-misses, the pieces the deck lacks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_cards: Vec<String>,
}

impl ComboResult {
    pub fn new(id: impl Into<String>, card_names: &[&str], produces: &[&str]) -> Self {
        Self {
            id: id.into(),
            card_names: card_names.iter().map(|s| s.to_string()).collect(),
            produces: produces.iter().map(|s| s.to_string()).collect(),
            tier: None,
            popularity: 0,
            description: None,
            permalink: None,
            missing_cards: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: ComboTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_popularity(mut self, popularity: u32) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn is_infinite(&self) -> bool {
        self.produces
            .iter()
            .any(|p| p.to_lowercase().contains("infinite"))
    }
}

/// Combos found for a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckCombos {
    /// All pieces present.
    pub confirmed: Vec<ComboResult>,
    /// Missing one or two pieces.
    pub near_miss: Vec<ComboResult>,
}

impl DeckCombos {
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Highest tier among confirmed combos.
    pub fn highest_tier(&self) -> Option<ComboTier> {
        self.confirmed.iter().filter_map(|c| c.tier).max()
    }

    /// Number of confirmed combos at the top tier.
    pub fn top_tier_count(&self) -> usize {
        self.confirmed
            .iter()
            .filter(|c| c.tier == Some(ComboTier::TOP))
            .count()
    }

    pub fn has_top_tier(&self) -> bool {
        self.top_tier_count() > 0
    }

    pub fn has_infinite(&self) -> bool {
        self.confirmed.iter().any(ComboResult::is_infinite)
    }

    /// Order both lists by popularity, most popular first.
    pub fn sort_by_popularity(&mut self) {
        self.confirmed.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        self.near_miss.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    }
}
