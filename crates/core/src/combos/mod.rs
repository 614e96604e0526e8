//! Combo database integration.
//!
//! The analyzer never invents combos: whatever a [`ComboDatabase`] reports is
//! taken as ground truth.

mod spellbook;
mod types;

pub use spellbook::{SpellbookClient, SpellbookConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying a combo database.
#[derive(Debug, Error)]
pub enum ComboError {
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

    /// Database not configured.
    #[error("Combo database not configured: {0}")]
    NotConfigured(String),
}

/// Looks up known combos for a set of card names.
#[async_trait]
pub trait ComboDatabase: Send + Sync {
    /// Name of the backend ("spellbook", "none", ...).
    fn name(&self) -> &str;

    /// Find confirmed and near-miss combos among `card_names`.
    async fn find_combos(
        &self,
        card_names: &[String],
        commander: Option<&str>,
    ) -> Result<DeckCombos, ComboError>;
}

/// Combo database that never finds anything, for offline analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComboDatabase;

#[async_trait]
impl ComboDatabase for NoComboDatabase {
    fn name(&self) -> &str {
        "none"
    }

    async fn find_combos(
        &self,
        _card_names: &[String],
        _commander: Option<&str>,
    ) -> Result<DeckCombos, ComboError> {
        Ok(DeckCombos::default())
    }
}
