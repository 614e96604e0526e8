//! Tutor classifier.

use super::policy::ScoringPolicy;
use super::types::TutorReport;
use crate::card::Card;
use crate::reference::{ReferenceLists, TutorTier};

const SEARCH_PHRASE: &str = "search your library";

/// Ramp and self-reference boilerplate removed before looking for a card type.
/// Longer phrases are stripped before their prefixes.
const BOILERPLATE: &[&str] = &[
    "basic land cards",
    "basic land card",
    "card with a basic land type",
    "forest cards",
    "forest card",
    "island cards",
    "island card",
    "swamp cards",
    "swamp card",
    "mountain cards",
    "mountain card",
    "plains cards",
    "plains card",
    "reveal those cards",
    "reveal that card",
    "discard this card",
    "discard a card",
    "exile a card",
    "shuffle your library",
    "put that card onto the battlefield",
    "card from your hand",
    "card from your library",
    "when this creature",
    "sacrifice this creature",
    "creatures you control",
    "it's an artifact",
    "is an artifact",
    "it's a creature",
    "is a creature",
    "living artifact",
];

const TUTOR_TARGETS: &[&str] = &[
    "creature",
    "artifact",
    "enchantment",
    "instant",
    "sorcery",
    "planeswalker",
    "card",
];

/// Whether a card searches the library for something other than lands.
pub fn is_tutor(card: &Card) -> bool {
    let text = card.rules_text().to_lowercase();
    if !text.contains(SEARCH_PHRASE) {
        return false;
    }

    let mut phrases = BOILERPLATE.to_vec();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let stripped = phrases
        .iter()
        .fold(text, |acc, phrase| acc.replace(phrase, " "));

    TUTOR_TARGETS.iter().any(|t| stripped.contains(t))
}

/// Tier by mana value, used for tutors missing from the curated lists.
pub fn tier_by_mana_value(mana_value: f64) -> TutorTier {
    if mana_value <= 1.0 {
        TutorTier::Premium
    } else if mana_value <= 2.0 {
        TutorTier::Efficient
    } else if mana_value <= 3.0 {
        TutorTier::Standard
    } else {
        TutorTier::Slow
    }
}

/// Find and tier every tutor in the deck.
///
/// Each physical card is recorded once, under its full name.
pub fn classify_tutors(cards: &[Card], lists: &ReferenceLists, policy: &ScoringPolicy) -> TutorReport {
    let mut report = TutorReport::default();

    for card in cards {
        let tier = match lists.tutor_tier(card) {
            Some(tier) => tier,
            None if is_tutor(card) => tier_by_mana_value(card.mana_value),
            None => continue,
        };

        let bucket = match tier {
            TutorTier::Premium => &mut report.premium,
            TutorTier::Efficient => &mut report.efficient,
            TutorTier::Standard => &mut report.standard,
            TutorTier::Slow => &mut report.slow,
        };
        if bucket.contains(&card.name) {
            continue;
        }
        bucket.push(card.name.clone());
        report.weighted_score += policy.tutor_weight(tier);
    }

    report
}
