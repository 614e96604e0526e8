//! Mock combo database for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::combos::{ComboDatabase, ComboError, DeckCombos};

/// A recorded combo lookup for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedComboLookup {
    pub card_names: Vec<String>,
    pub commander: Option<String>,
}

/// Mock implementation of the ComboDatabase trait.
///
/// Returns the configured combos for every lookup.
pub struct MockComboDatabase {
    combos: Arc<RwLock<DeckCombos>>,
    calls: Arc<RwLock<Vec<RecordedComboLookup>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<ComboError>>>,
}

impl std::fmt::Debug for MockComboDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockComboDatabase")
            .field("combos", &"<combos>")
            .field("calls", &"<calls>")
            .field("next_error", &"<next_error>")
            .finish()
    }
}

impl Default for MockComboDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MockComboDatabase {
    pub fn new() -> Self {
        Self {
            combos: Arc::new(RwLock::new(DeckCombos::default())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_combos(&self, combos: DeckCombos) {
        *self.combos.write().await = combos;
    }

    pub async fn set_next_error(&self, error: ComboError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedComboLookup> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl ComboDatabase for MockComboDatabase {
    fn name(&self) -> &str {
        "mock"
    }

    async fn find_combos(
        &self,
        card_names: &[String],
        commander: Option<&str>,
    ) -> Result<DeckCombos, ComboError> {
        self.calls.write().await.push(RecordedComboLookup {
            card_names: card_names.to_vec(),
            commander: commander.map(str::to_string),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self.combos.read().await.clone())
    }
}
