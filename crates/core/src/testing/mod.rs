//! Testing utilities and mock collaborators.
//!
//! Mocks for every external service trait so analyses, narratives and the
//! HTTP API can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use bracket_core::testing::{fixtures, MockCardResolver, MockComboDatabase};
//!
//! let resolver = MockCardResolver::new();
//! resolver.add_card(fixtures::card("Sol Ring", "Artifact")).await;
//!
//! let combos = MockComboDatabase::new();
//! combos.set_combos(DeckCombos::default()).await;
//! ```

mod mock_combos;
mod mock_llm;
mod mock_resolver;

pub use mock_combos::{MockComboDatabase, RecordedComboLookup};
pub use mock_llm::MockLlmClient;
pub use mock_resolver::MockCardResolver;

/// Card builders for tests.
pub mod fixtures {
    use crate::card::{Card, CardFace};

    /// A single-faced card with no rules text.
    pub fn card(name: &str, type_line: &str) -> Card {
        Card::new(name, type_line)
    }

    /// A basic land of the given name ("Forest", "Snow-Covered Island", ...).
    pub fn basic_land(name: &str) -> Card {
        let subtype = name.rsplit(' ').next().unwrap_or(name);
        Card::new(name, format!("Basic Land — {}", subtype))
    }

    /// A modal double-faced card. `name` is the compound "Front // Back".
    pub fn mdfc(name: &str, front: (&str, &str), back: (&str, &str)) -> Card {
        let (front_name, back_name) = name.split_once(" // ").unwrap_or((name, name));
        let faces = vec![
            CardFace {
                name: front_name.to_string(),
                type_line: front.0.to_string(),
                oracle_text: front.1.to_string(),
                mana_cost: None,
            },
            CardFace {
                name: back_name.to_string(),
                type_line: back.0.to_string(),
                oracle_text: back.1.to_string(),
                mana_cost: None,
            },
        ];
        Card::new(name, format!("{} // {}", front.0, back.0)).with_faces("modal_dfc", faces)
    }

    /// `count` distinct creatures sharing a type line, named "{prefix} 1".. .
    pub fn creatures(prefix: &str, type_line: &str, count: usize) -> Vec<Card> {
        (1..=count)
            .map(|i| Card::new(format!("{} {}", prefix, i), type_line))
            .collect()
    }
}
