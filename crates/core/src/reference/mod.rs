//! Curated reference data: card-name membership lists and bracket definitions.
//!
//! Everything here is built once and shared read-only between analyses.

mod brackets;
pub mod lists;

pub use brackets::{bracket_info, BracketInfo, BRACKETS};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::card::Card;

static SHARED: Lazy<Arc<ReferenceLists>> = Lazy::new(|| Arc::new(ReferenceLists::embedded()));

/// Efficiency tier of a tutor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorTier {
    Premium,
    Efficient,
    Standard,
    Slow,
}

/// Competitive-commander tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommanderTier {
    Tier1,
    Tier2,
}

/// A case-insensitive set of card names.
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    names: HashSet<String>,
}

impl NameSet {
    /// Build from list entries. Compound entries (`A // B`) are also indexed
    /// under their front face.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    fn insert(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if let Some((front, _)) = name.split_once(" // ") {
            self.names.insert(front.trim().to_string());
        }
        self.names.insert(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Match by full name, or by front face for double-faced cards.
    pub fn contains_card(&self, card: &Card) -> bool {
        self.names.contains(&card.key())
            || self
                .names
                .contains(&card.front_face_name().to_lowercase())
    }

    /// Names of the deck's cards that belong to this set, in deck order.
    ///
    /// Each physical card is reported once under its full name.
    pub fn members_of(&self, cards: &[Card]) -> Vec<String> {
        cards
            .iter()
            .filter(|c| self.contains_card(c))
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// All curated lists used by the detectors.
#[derive(Debug, Clone)]
pub struct ReferenceLists {
    pub game_changers: NameSet,
    pub mass_land_denial: NameSet,
    pub extra_turns: NameSet,
    pub fast_mana: NameSet,
    pub free_interaction: NameSet,
    pub competitive_stax: NameSet,
    pub high_power_staples: NameSet,
    pub well_known: NameSet,
    pub any_number: NameSet,
    pub basic_lands: NameSet,
    tutor_tiers: HashMap<String, TutorTier>,
    capped_copies: HashMap<String, u32>,
    cedh_tier1: Vec<String>,
    cedh_tier2: Vec<String>,
}

impl ReferenceLists {
    /// Lists compiled into the binary.
    pub fn embedded() -> Self {
        let mut tutor_tiers = HashMap::new();
        // Later inserts never override an earlier, faster tier.
        for (names, tier) in [
            (lists::TUTORS_PREMIUM, TutorTier::Premium),
            (lists::TUTORS_EFFICIENT, TutorTier::Efficient),
            (lists::TUTORS_STANDARD, TutorTier::Standard),
            (lists::TUTORS_SLOW, TutorTier::Slow),
        ] {
            for name in names {
                let name = name.to_lowercase();
                if let Some((front, _)) = name.split_once(" // ") {
                    tutor_tiers.entry(front.to_string()).or_insert(tier);
                }
                tutor_tiers.entry(name).or_insert(tier);
            }
        }

        Self {
            game_changers: NameSet::from_names(lists::GAME_CHANGERS),
            mass_land_denial: NameSet::from_names(lists::MASS_LAND_DENIAL),
            extra_turns: NameSet::from_names(lists::EXTRA_TURNS),
            fast_mana: NameSet::from_names(lists::FAST_MANA),
            free_interaction: NameSet::from_names(lists::FREE_INTERACTION),
            competitive_stax: NameSet::from_names(lists::COMPETITIVE_STAX),
            high_power_staples: NameSet::from_names(lists::HIGH_POWER_STAPLES),
            well_known: NameSet::from_names(lists::WELL_KNOWN_CARDS),
            any_number: NameSet::from_names(lists::ANY_NUMBER_CARDS),
            basic_lands: NameSet::from_names(lists::BASIC_LAND_NAMES),
            tutor_tiers,
            capped_copies: lists::CAPPED_COPY_CARDS
                .iter()
                .map(|(name, limit)| (name.to_lowercase(), *limit))
                .collect(),
            cedh_tier1: lowercase_all(lists::CEDH_COMMANDERS_TIER1),
            cedh_tier2: lowercase_all(lists::CEDH_COMMANDERS_TIER2),
        }
    }

    /// Process-wide instance of the embedded lists.
    pub fn shared() -> Arc<ReferenceLists> {
        Arc::clone(&SHARED)
    }

    /// Add names to the Game Changer list (e.g. from configuration).
    pub fn with_extra_game_changers<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for name in names {
            self.game_changers.insert(name.as_ref());
        }
        self
    }

    /// Curated tier of a tutor, by full or front-face name.
    pub fn tutor_tier(&self, card: &Card) -> Option<TutorTier> {
        self.tutor_tiers
            .get(&card.key())
            .or_else(|| {
                self.tutor_tiers
                    .get(&card.front_face_name().to_lowercase())
            })
            .copied()
    }

    /// Competitive tier of a commander.
    ///
    /// Names match when either contains the other, ignoring case, so partner
    /// pairs and shortened names still hit.
    pub fn commander_tier(&self, commander: &str) -> Option<CommanderTier> {
        let commander = commander.trim().to_lowercase();
        if commander.is_empty() {
            return None;
        }

        let hit = |list: &[String]| {
            list.iter()
                .any(|known| commander.contains(known.as_str()) || known.contains(&commander))
        };

        if hit(&self.cedh_tier1) {
            Some(CommanderTier::Tier1)
        } else if hit(&self.cedh_tier2) {
            Some(CommanderTier::Tier2)
        } else {
            None
        }
    }

    /// Maximum legal copies of a card, `None` when unlimited.
    pub fn copy_limit(&self, card: &Card) -> Option<u32> {
        if card.is_basic_land()
            || self.basic_lands.contains_card(card)
            || self.any_number.contains_card(card)
        {
            return None;
        }
        Some(self.capped_copies.get(&card.key()).copied().unwrap_or(1))
    }
}

impl Default for ReferenceLists {
    fn default() -> Self {
        Self::embedded()
    }
}

fn lowercase_all(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_lowercase()).collect()
}
