//! Analysis result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::{total_quantity, Card, Color};
use crate::combos::DeckCombos;
use crate::reference::{bracket_info, CommanderTier};

// ============================================================================
// Composition
// ============================================================================

/// Primary card type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Land,
    Planeswalker,
    Other,
}

impl Category {
    /// Priority order used to bucket multi-type cards; first match wins.
    pub const PRIORITY: [Category; 7] = [
        Category::Creature,
        Category::Instant,
        Category::Sorcery,
        Category::Artifact,
        Category::Enchantment,
        Category::Land,
        Category::Planeswalker,
    ];

    /// Lowercase type word looked for in the type line.
    pub fn type_word(&self) -> &'static str {
        match self {
            Category::Creature => "creature",
            Category::Instant => "instant",
            Category::Sorcery => "sorcery",
            Category::Artifact => "artifact",
            Category::Enchantment => "enchantment",
            Category::Land => "land",
            Category::Planeswalker => "planeswalker",
            Category::Other => "other",
        }
    }

    /// Plural display name ("creatures", "sorceries").
    pub fn plural(&self) -> &'static str {
        match self {
            Category::Creature => "creatures",
            Category::Instant => "instants",
            Category::Sorcery => "sorceries",
            Category::Artifact => "artifacts",
            Category::Enchantment => "enchantments",
            Category::Land => "lands",
            Category::Planeswalker => "planeswalkers",
            Category::Other => "other",
        }
    }
}

/// Cards partitioned by [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardCategories {
    pub buckets: BTreeMap<Category, Vec<Card>>,
}

impl CardCategories {
    pub fn get(&self, category: Category) -> &[Card] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Quantity-aware size of a bucket.
    pub fn count(&self, category: Category) -> u32 {
        total_quantity(self.get(category))
    }
}

/// Mana value histogram of non-land cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManaCurve {
    /// Mana value (7 means 7+) to number of copies.
    pub histogram: BTreeMap<u8, u32>,
    pub average: f64,
}

/// Land and MDFC-land counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandReport {
    pub land_count: u32,
    pub mdfc_lands: Vec<String>,
    pub effective_land_count: u32,
}

// ============================================================================
// Signals
// ============================================================================

/// Tutors bucketed by efficiency tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorReport {
    pub premium: Vec<String>,
    pub efficient: Vec<String>,
    pub standard: Vec<String>,
    pub slow: Vec<String>,
    pub weighted_score: f64,
}

impl TutorReport {
    pub fn total(&self) -> usize {
        self.premium.len() + self.efficient.len() + self.standard.len() + self.slow.len()
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.premium
            .iter()
            .chain(&self.efficient)
            .chain(&self.standard)
            .chain(&self.slow)
    }
}

/// Membership hits for the competitive card lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerCards {
    pub fast_mana: Vec<String>,
    pub free_interaction: Vec<String>,
    pub staples: Vec<String>,
    pub stax: Vec<String>,
}

/// Aggregated competitive-optimization signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CedhSignals {
    pub total: u32,
    /// Contribution of each signal that fired.
    pub breakdown: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander_tier: Option<CommanderTier>,
    pub is_cedh: bool,
}

/// Kind of deck-building restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    SingleArtist,
    SetRestricted,
    BlockRestricted,
    RarityRestricted,
    AlphabetDeck,
    ManaValueRestricted,
    FrameRestricted,
    NameTheme,
}

impl RestrictionKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RestrictionKind::SingleArtist => "single_artist",
            RestrictionKind::SetRestricted => "set_restricted",
            RestrictionKind::BlockRestricted => "block_restricted",
            RestrictionKind::RarityRestricted => "rarity_restricted",
            RestrictionKind::AlphabetDeck => "alphabet_deck",
            RestrictionKind::ManaValueRestricted => "mana_value_restricted",
            RestrictionKind::FrameRestricted => "frame_restricted",
            RestrictionKind::NameTheme => "name_theme",
        }
    }
}

/// One detected restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionDetection {
    pub kind: RestrictionKind,
    /// Dominant value (artist name, set code, ...).
    pub value: String,
    pub count: usize,
    /// Share of the sample (coverage for alphabet decks).
    pub share: f64,
    pub points: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictionReport {
    pub score: f64,
    pub detections: Vec<RestrictionDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestrictionReport {
    pub fn tags(&self) -> Vec<&'static str> {
        self.detections.iter().map(|d| d.kind.tag()).collect()
    }
}

/// A mechanical theme and how many cards hit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeHit {
    pub theme: String,
    pub cards: usize,
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyReport {
    pub score: f64,
    pub tribal_score: f64,
    pub theme_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tribe: Option<String>,
    /// Themes hit by at least five cards.
    pub themes: Vec<ThemeHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket1Likelihood {
    pub value: f64,
    pub explanation: String,
}

/// Final bracket with the reasons that produced it, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDecision {
    pub bracket: u8,
    pub reasons: Vec<String>,
}

// ============================================================================
// Result
// ============================================================================

/// Complete analysis of one decklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commander: Option<String>,
    /// Quantity-aware card count.
    pub total_cards: u32,
    pub categories: CardCategories,
    pub archetypes: Vec<String>,
    pub color_identity: Vec<Color>,
    pub mana_curve: ManaCurve,
    pub lands: LandReport,
    pub game_changers: Vec<String>,
    pub mass_land_denial: Vec<String>,
    pub extra_turns: Vec<String>,
    pub tutors: TutorReport,
    pub power_cards: PowerCards,
    pub cedh: CedhSignals,
    pub combos: DeckCombos,
    pub synergy: SynergyReport,
    pub restriction: RestrictionReport,
    pub bracket1_likelihood: Bracket1Likelihood,
    /// Names the resolver could not find.
    pub unresolved: Vec<String>,
    pub warnings: Vec<String>,
    pub bracket: u8,
    pub reasons: Vec<String>,
}

impl DeckAnalysis {
    pub fn bracket_name(&self) -> &'static str {
        bracket_info(self.bracket).map(|b| b.name).unwrap_or("Unknown")
    }

    /// Every analysed card, in category order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.categories.buckets.values().flatten()
    }
}
