//! Mock card resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::card::Card;
use crate::resolver::{CardResolver, Resolution, ResolverError};

/// Mock implementation of the CardResolver trait.
///
/// Resolves names against an in-memory card pool, by full name or front
/// face. Names outside the pool are reported as not found.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = MockCardResolver::new();
/// resolver.add_card(fixtures::card("Sol Ring", "Artifact")).await;
///
/// let resolution = resolver.resolve(&["sol ring".to_string()]).await?;
/// assert!(resolution.get("Sol Ring").is_some());
/// assert_eq!(resolver.recorded_calls().await.len(), 1);
/// ```
pub struct MockCardResolver {
    /// Known cards by lowercase full name.
    cards: Arc<RwLock<HashMap<String, Card>>>,
    /// Name lists passed to `resolve`.
    calls: Arc<RwLock<Vec<Vec<String>>>>,
    /// If set, the next resolve will fail with this error.
    next_error: Arc<RwLock<Option<ResolverError>>>,
}

impl std::fmt::Debug for MockCardResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCardResolver")
            .field("cards", &"<cards>")
            .field("calls", &"<calls>")
            .field("next_error", &"<next_error>")
            .finish()
    }
}

impl Default for MockCardResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCardResolver {
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a card to the pool.
    pub async fn add_card(&self, card: Card) {
        self.cards.write().await.insert(card.key(), card);
    }

    pub async fn add_cards(&self, cards: impl IntoIterator<Item = Card>) {
        let mut pool = self.cards.write().await;
        for card in cards {
            pool.insert(card.key(), card);
        }
    }

    /// Make the next resolve fail.
    pub async fn set_next_error(&self, error: ResolverError) {
        *self.next_error.write().await = Some(error);
    }

    /// Name lists received so far.
    pub async fn recorded_calls(&self) -> Vec<Vec<String>> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl CardResolver for MockCardResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, names: &[String]) -> Result<Resolution, ResolverError> {
        self.calls.write().await.push(names.to_vec());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let pool = self.cards.read().await;
        let mut resolution = Resolution::new();
        for name in names {
            let wanted = name.trim().to_lowercase();
            let found = pool.get(&wanted).or_else(|| {
                pool.values()
                    .find(|card| card.front_face_name().to_lowercase() == wanted)
            });
            match found {
                Some(card) => resolution.insert(card.clone()),
                None => resolution.mark_not_found(name.clone()),
            }
        }
        Ok(resolution)
    }
}
