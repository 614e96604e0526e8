//! Resolved card records.
//!
//! Cards are produced by a [`CardResolver`](crate::resolver::CardResolver) and
//! are read-only from the analysis point of view.

mod types;

pub use types::*;

/// Count physical cards, honouring per-entry quantities.
///
/// A single entry may stand for 30 copies of an "any number" card or a stack
/// of basic lands, so this is never the same as `cards.len()`.
pub fn total_quantity<'a, I>(cards: I) -> u32
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .fold(0u32, |total, c| total.saturating_add(c.quantity))
}
