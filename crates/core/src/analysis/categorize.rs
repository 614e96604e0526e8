//! Type-line categorizer.

use super::types::{CardCategories, Category};
use crate::card::Card;

/// Bucket of a single card: the first [`Category::PRIORITY`] word its type line contains.
pub fn category_of(card: &Card) -> Category {
    let type_line = card.type_line.to_lowercase();
    Category::PRIORITY
        .into_iter()
        .find(|c| type_line.contains(c.type_word()))
        .unwrap_or(Category::Other)
}

/// Partition cards by primary type, preserving deck order within each bucket.
pub fn categorize(cards: &[Card]) -> CardCategories {
    let mut categories = CardCategories::default();
    for card in cards {
        categories
            .buckets
            .entry(category_of(card))
            .or_default()
            .push(card.clone());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_artifact_creature_is_creature() {
        let card = fixtures::card("Solemn Simulacrum", "Artifact Creature — Golem");
        assert_eq!(category_of(&card), Category::Creature);

        let construct = fixtures::card("Some Construct", "Artifact Creature — Construct");
        let categories = categorize(&[construct]);
        assert_eq!(categories.get(Category::Creature).len(), 1);
        assert!(categories.get(Category::Artifact).is_empty());
    }

    #[test]
    fn test_priority_order() {
        let cases = [
            ("Enchantment Creature — God", Category::Creature),
            ("Tribal Instant — Elf", Category::Instant),
            ("Legendary Sorcery", Category::Sorcery),
            ("Artifact Land", Category::Artifact),
            ("Enchantment Land — Urza's Saga", Category::Enchantment),
            ("Land — Forest Island", Category::Land),
            ("Legendary Planeswalker — Jace", Category::Planeswalker),
            ("Battle — Siege", Category::Other),
            ("Kindred Artifact — Equipment", Category::Artifact),
        ];
        for (type_line, expected) in cases {
            let card = fixtures::card("Test", type_line);
            assert_eq!(category_of(&card), expected, "{}", type_line);
        }
    }

    #[test]
    fn test_categorize_counts_quantities() {
        let cards = vec![
            fixtures::basic_land("Forest").with_quantity(30),
            fixtures::card("Llanowar Elves", "Creature — Elf Druid"),
        ];
        let categories = categorize(&cards);
        assert_eq!(categories.count(Category::Land), 30);
        assert_eq!(categories.get(Category::Land).len(), 1);
        assert_eq!(categories.count(Category::Creature), 1);
        assert_eq!(categories.count(Category::Sorcery), 0);
    }
}
