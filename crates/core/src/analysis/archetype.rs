//! Keyword-based archetype tagging.

use crate::card::Card;

/// Archetype tag the bracket procedure treats as a combo signal.
pub const COMBO_ARCHETYPE: &str = "combo";

/// Cards that must hit an archetype's keywords before it is reported.
const MIN_ARCHETYPE_CARDS: usize = 5;

const ARCHETYPES: &[(&str, &[&str])] = &[
    (
        COMBO_ARCHETYPE,
        &["infinite", "loop", "untap", "goes infinite", "win the game", "combo", "chain", "trigger", "stack"],
    ),
    (
        "control",
        &["counter", "destroy", "exile", "bounce", "stax", "tax", "prison", "lock", "deny", "prevent"],
    ),
    (
        "aggro",
        &["haste", "attack", "combat", "damage", "power", "toughness", "creature", "buff", "pump"],
    ),
    ("midrange", &["value", "synergy", "advantage", "efficient", "flexible"]),
    ("ramp", &["land", "mana", "ramp", "accelerate", "dork", "rock"]),
    ("aristocrats", &["sacrifice", "die", "death", "blood artist", "grave pact"]),
    ("tokens", &["token", "create", "copy", "populate", "swarm"]),
    ("graveyard", &["graveyard", "reanimate", "dredge", "mill", "recursion"]),
    ("voltron", &["equipment", "aura", "commander damage", "protection", "indestructible"]),
    ("spellslinger", &["instant", "sorcery", "magecraft", "prowess", "storm"]),
];

fn searchable_text(card: &Card) -> String {
    let mut text = card.rules_text().to_lowercase();
    for keyword in &card.keywords {
        text.push(' ');
        text.push_str(&keyword.to_lowercase());
    }
    text
}

/// Archetype tags hit by at least five cards, strongest first.
///
/// Ties keep catalogue order.
pub fn detect_archetypes(cards: &[Card]) -> Vec<String> {
    let texts: Vec<String> = cards.iter().map(searchable_text).collect();

    let mut scored: Vec<(&str, usize)> = ARCHETYPES
        .iter()
        .map(|(name, keywords)| {
            let hits = texts
                .iter()
                .filter(|text| keywords.iter().any(|k| text.contains(k)))
                .count();
            (*name, hits)
        })
        .filter(|(_, hits)| *hits >= MIN_ARCHETYPE_CARDS)
        .collect();

    // Stable sort keeps catalogue order among equals.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_below_threshold_reports_nothing() {
        let cards: Vec<Card> = (0..4)
            .map(|i| {
                fixtures::card(&format!("Looper {}", i), "Artifact")
                    .with_oracle_text("Untap target permanent.")
            })
            .collect();
        assert!(detect_archetypes(&cards).is_empty());
    }

    #[test]
    fn test_combo_tag_detected() {
        let cards: Vec<Card> = (0..6)
            .map(|i| {
                fixtures::card(&format!("Looper {}", i), "Artifact")
                    .with_oracle_text("Untap target permanent.")
            })
            .collect();
        assert_eq!(detect_archetypes(&cards), vec![COMBO_ARCHETYPE]);
    }

    #[test]
    fn test_sorted_by_hits() {
        let mut cards: Vec<Card> = (0..5)
            .map(|i| {
                fixtures::card(&format!("Token Maker {}", i), "Sorcery")
                    .with_oracle_text("Populate.")
            })
            .collect();
        cards.extend((0..7).map(|i| {
            fixtures::card(&format!("Reanimator {}", i), "Sorcery")
                .with_oracle_text("Return target card from a graveyard to the battlefield.")
        }));
        assert_eq!(detect_archetypes(&cards), vec!["graveyard", "tokens"]);
    }

    #[test]
    fn test_keywords_count() {
        let cards: Vec<Card> = (0..5)
            .map(|i| {
                let mut card = fixtures::card(&format!("Striker {}", i), "Instant");
                card.keywords = vec!["Prowess".to_string()];
                card
            })
            .collect();
        let tags = detect_archetypes(&cards);
        assert!(tags.contains(&"spellslinger".to_string()));
    }
}
