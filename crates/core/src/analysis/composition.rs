//! Deck composition: commander, colors, mana curve, lands and legality.

use std::collections::BTreeSet;

use super::types::{LandReport, ManaCurve};
use crate::card::{total_quantity, Card, Color};
use crate::reference::ReferenceLists;

/// Commander deck size, commander included.
pub const COMMANDER_DECK_SIZE: u32 = 100;

const CURVE_CAP: u8 = 7;

/// Pick the commander: the explicit name if given, else the first legendary
/// creature or card that says it can be your commander.
pub fn detect_commander(cards: &[Card], explicit: Option<&str>) -> Option<String> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }

    cards
        .iter()
        .find(|card| {
            let type_line = card.type_line.to_lowercase();
            (type_line.contains("legendary") && type_line.contains("creature"))
                || card
                    .rules_text()
                    .to_lowercase()
                    .contains("can be your commander")
        })
        .map(|card| card.name.clone())
}

/// Union of the cards' color identities in WUBRG order.
pub fn color_identity(cards: &[Card]) -> Vec<Color> {
    let colors: BTreeSet<Color> = cards
        .iter()
        .flat_map(|c| c.color_identity.iter().copied())
        .collect();
    Color::ALL
        .into_iter()
        .filter(|c| colors.contains(c))
        .collect()
}

/// Mana value histogram and mean over non-land copies.
pub fn mana_curve(cards: &[Card]) -> ManaCurve {
    let mut curve = ManaCurve::default();
    let mut total_value = 0u64;
    let mut copies = 0u32;

    for card in cards.iter().filter(|c| !c.is_land()) {
        let value = card.mana_value.max(0.0).trunc() as u64;
        let bucket = value.min(CURVE_CAP as u64) as u8;
        let slot = curve.histogram.entry(bucket).or_insert(0);
        *slot = slot.saturating_add(card.quantity);
        total_value = total_value.saturating_add(value.saturating_mul(card.quantity as u64));
        copies = copies.saturating_add(card.quantity);
    }

    if copies > 0 {
        curve.average = round2(total_value as f64 / copies as f64);
    }
    curve
}

/// Whether a card is a modal double-faced card with a land back face.
pub fn is_mdfc_land(card: &Card) -> bool {
    if card.faces.len() < 2 {
        return false;
    }
    let front_is_land = card.faces[0].type_line.contains("Land");
    let back_is_land = card.faces[1..].iter().any(|f| f.type_line.contains("Land"));
    !front_is_land && back_is_land
}

/// Land count including MDFCs that can be played as lands.
pub fn land_report(cards: &[Card]) -> LandReport {
    let lands: Vec<&Card> = cards.iter().filter(|c| c.is_land() && !is_mdfc_land(c)).collect();
    let mdfcs: Vec<&Card> = cards.iter().filter(|c| is_mdfc_land(c)).collect();

    let land_count = total_quantity(lands.iter().copied());
    let mdfc_count = total_quantity(mdfcs.iter().copied());

    LandReport {
        land_count,
        mdfc_lands: mdfcs.iter().map(|c| c.name.clone()).collect(),
        effective_land_count: land_count.saturating_add(mdfc_count),
    }
}

/// Deck-construction problems that never block analysis.
pub fn legality_warnings(cards: &[Card], lists: &ReferenceLists, total_cards: u32) -> Vec<String> {
    let mut warnings = Vec::new();

    for card in cards {
        match lists.copy_limit(card) {
            Some(limit) if card.quantity > limit => {
                if limit == 1 {
                    warnings.push(format!(
                        "{} x{}: Commander decks allow only one copy",
                        card.name, card.quantity
                    ));
                } else {
                    warnings.push(format!(
                        "{} x{}: at most {} copies allowed",
                        card.name, card.quantity, limit
                    ));
                }
            }
            _ => {}
        }
    }

    if total_cards != COMMANDER_DECK_SIZE {
        warnings.push(format!(
            "Deck has {} cards; Commander decks have exactly {}",
            total_cards, COMMANDER_DECK_SIZE
        ));
    }

    warnings
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_detect_commander_explicit_wins() {
        let cards = vec![fixtures::card("Atraxa, Praetors' Voice", "Legendary Creature — Phyrexian Angel Horror")];
        assert_eq!(
            detect_commander(&cards, Some("Kenrith, the Returned King")),
            Some("Kenrith, the Returned King".to_string())
        );
    }

    #[test]
    fn test_detect_commander_first_legend() {
        let cards = vec![
            fixtures::card("Sol Ring", "Artifact"),
            fixtures::card("Teferi, Temporal Archmage", "Legendary Planeswalker — Teferi")
                .with_oracle_text("Teferi, Temporal Archmage can be your commander."),
            fixtures::card("Atraxa, Praetors' Voice", "Legendary Creature — Phyrexian Angel Horror"),
        ];
        assert_eq!(
            detect_commander(&cards, None),
            Some("Teferi, Temporal Archmage".to_string())
        );
        assert_eq!(detect_commander(&cards[..1], Some("  ")), None);
    }

    #[test]
    fn test_color_identity_wubrg_order() {
        let cards = vec![
            fixtures::card("A", "Creature").with_colors(&[Color::G, Color::U]),
            fixtures::card("B", "Creature").with_colors(&[Color::W]),
        ];
        assert_eq!(color_identity(&cards), vec![Color::W, Color::U, Color::G]);
    }

    #[test]
    fn test_mana_curve_caps_and_weights() {
        let cards = vec![
            fixtures::card("Sol Ring", "Artifact").with_mana_value(1.0),
            fixtures::card("Rats", "Creature — Rat").with_mana_value(3.0).with_quantity(3),
            fixtures::card("Emrakul", "Creature — Eldrazi").with_mana_value(15.0),
            fixtures::basic_land("Swamp").with_quantity(30),
        ];
        let curve = mana_curve(&cards);
        assert_eq!(curve.histogram.get(&1), Some(&1));
        assert_eq!(curve.histogram.get(&3), Some(&3));
        assert_eq!(curve.histogram.get(&7), Some(&1));
        assert_eq!(curve.histogram.get(&0), None);
        // (1 + 9 + 15) / 5
        assert_eq!(curve.average, 5.0);
    }

    #[test]
    fn test_mana_curve_empty() {
        let curve = mana_curve(&[fixtures::basic_land("Island")]);
        assert!(curve.histogram.is_empty());
        assert_eq!(curve.average, 0.0);
    }

    #[test]
    fn test_land_report_counts_mdfcs() {
        let cards = vec![
            fixtures::basic_land("Forest").with_quantity(33),
            fixtures::mdfc(
                "Bala Ged Recovery // Bala Ged Sanctuary",
                ("Sorcery", "Return target card from your graveyard to your hand."),
                ("Land", "Bala Ged Sanctuary enters tapped."),
            ),
            fixtures::mdfc(
                "Delver of Secrets // Insectile Aberration",
                ("Creature — Human Wizard", "At the beginning of your upkeep, look at the top card of your library."),
                ("Creature — Human Insect", "Flying"),
            ),
        ];
        let report = land_report(&cards);
        assert_eq!(report.land_count, 33);
        assert_eq!(report.mdfc_lands, vec!["Bala Ged Recovery // Bala Ged Sanctuary"]);
        assert_eq!(report.effective_land_count, 34);
    }

    #[test]
    fn test_legality_warnings() {
        let lists = ReferenceLists::embedded();
        let cards = vec![
            fixtures::card("Sol Ring", "Artifact").with_quantity(2),
            fixtures::card("Relentless Rats", "Creature — Rat").with_quantity(40),
            fixtures::card("Seven Dwarves", "Creature — Dwarf").with_quantity(8),
            fixtures::basic_land("Swamp").with_quantity(50),
        ];
        let warnings = legality_warnings(&cards, &lists, 100);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].starts_with("Sol Ring x2"));
        assert!(warnings[1].contains("at most 7 copies"));
    }

    #[test]
    fn test_size_warning() {
        let lists = ReferenceLists::embedded();
        let warnings = legality_warnings(&[], &lists, 60);
        assert_eq!(warnings, vec!["Deck has 60 cards; Commander decks have exactly 100"]);
    }
}
