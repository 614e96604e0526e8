//! Card name resolution.
//!
//! A [`CardResolver`] turns decklist names into [`Card`] records in one bulk
//! call. Names it cannot find are reported back, never raised as errors.

mod scryfall;

pub use scryfall::{ScryfallClient, ScryfallConfig, MAX_COLLECTION_BATCH};

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::card::Card;

/// Errors that can occur while resolving card names.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resolver not configured.
    #[error("Card resolver not configured: {0}")]
    NotConfigured(String),
}

/// Outcome of a bulk resolution.
///
/// Cards are indexed case-insensitively by full name and, for multi-faced
/// cards, by front-face name.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    cards: HashMap<String, Card>,
    not_found: Vec<String>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, card: Card) {
        let front = card.front_face_name().to_lowercase();
        let full = card.key();
        if front != full {
            self.cards.insert(front, card.clone());
        }
        self.cards.insert(full, card);
    }

    pub fn mark_not_found(&mut self, name: impl Into<String>) {
        self.not_found.push(name.into());
    }

    /// Look up a card by any spelling of its name.
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.get(&name.trim().to_lowercase())
    }

    /// Names the backend explicitly reported as unknown.
    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Resolves card names to card records.
#[async_trait]
pub trait CardResolver: Send + Sync {
    /// Name of the backend ("scryfall", "mock", ...).
    fn name(&self) -> &str;

    /// Resolve all names in one logical call.
    async fn resolve(&self, names: &[String]) -> Result<Resolution, ResolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_resolution_lookup_is_case_insensitive() {
        let mut resolution = Resolution::new();
        resolution.insert(fixtures::card("Sol Ring", "Artifact"));
        assert!(resolution.get("sol ring").is_some());
        assert!(resolution.get("SOL RING ").is_some());
        assert!(resolution.get("Mana Crypt").is_none());
    }

    #[test]
    fn test_resolution_indexes_front_face() {
        let mut resolution = Resolution::new();
        resolution.insert(fixtures::mdfc(
            "Valakut Awakening // Valakut Stoneforge",
            ("Instant", "Put any number of cards from your hand on the bottom of your library, then draw that many cards plus one."),
            ("Land", "As Valakut Stoneforge enters, you may pay 3 life."),
        ));
        let card = resolution.get("Valakut Awakening").unwrap();
        assert_eq!(card.name, "Valakut Awakening // Valakut Stoneforge");
    }

    #[test]
    fn test_resolution_not_found() {
        let mut resolution = Resolution::new();
        resolution.mark_not_found("Not A Card");
        assert_eq!(resolution.not_found(), ["Not A Card".to_string()]);
        assert!(resolution.is_empty());
    }
}
