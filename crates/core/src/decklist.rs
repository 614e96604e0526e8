//! Line-oriented decklist parsing.
//!
//! Accepts the common `<quantity> <name>` export format:
//!
//! ```text
//! // Commander
//! 1 Atraxa, Praetors' Voice
//! 4x Forest
//! Sol Ring
//! ```

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static QUANTITY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)[xX]?\s+(.+)$").expect("quantity line regex is valid")
});

const SECTION_HEADERS: &[&str] = &["COMMANDER", "SIDEBOARD"];

/// One line of a decklist after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub name: String,
    pub quantity: u32,
}

impl DeckEntry {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Parse decklist text into entries.
///
/// Entries that name the same card (case-insensitively) are merged and their
/// quantities summed; the first spelling and position win.
pub fn parse_decklist(text: &str) -> Vec<DeckEntry> {
    let mut entries: Vec<DeckEntry> = Vec::new();

    for raw in text.lines() {
        let Some(entry) = parse_line(raw) else {
            continue;
        };

        match entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&entry.name))
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(entry.quantity)
            }
            None => entries.push(entry),
        }
    }

    entries
}

fn parse_line(raw: &str) -> Option<DeckEntry> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return None;
    }

    if is_section_header(line) {
        return None;
    }

    if let Some(caps) = QUANTITY_LINE.captures(line) {
        if let Ok(quantity) = caps[1].parse::<u32>() {
            let name = caps[2].trim();
            if !name.is_empty() {
                return Some(DeckEntry::new(name, quantity.max(1)));
            }
        }
    }

    Some(DeckEntry::new(line, 1))
}

/// "Commander", "SIDEBOARD:", "Commander (1)" but not "Commander's Sphere".
fn is_section_header(line: &str) -> bool {
    let upper = line.to_uppercase();
    SECTION_HEADERS.iter().any(|h| match upper.strip_prefix(h) {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.is_empty() || rest.starts_with(':') || rest.starts_with('(')
        }
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantities() {
        let entries = parse_decklist("1 Sol Ring\n4x Forest\n10X Island\n");
        assert_eq!(
            entries,
            vec![
                DeckEntry::new("Sol Ring", 1),
                DeckEntry::new("Forest", 4),
                DeckEntry::new("Island", 10),
            ]
        );
    }

    #[test]
    fn test_parse_line_without_quantity() {
        let entries = parse_decklist("Rhystic Study");
        assert_eq!(entries, vec![DeckEntry::new("Rhystic Study", 1)]);
    }

    #[test]
    fn test_parse_skips_comments_and_headers() {
        let text = r#"
# My deck
// Commander
COMMANDER: Atraxa
Commander
1 Atraxa, Praetors' Voice

SIDEBOARD
"#;
        let entries = parse_decklist(text);
        assert_eq!(entries, vec![DeckEntry::new("Atraxa, Praetors' Voice", 1)]);
    }

    #[test]
    fn test_parse_card_named_like_header() {
        let entries = parse_decklist("Commander's Sphere");
        assert_eq!(entries, vec![DeckEntry::new("Commander's Sphere", 1)]);
    }

    #[test]
    fn test_parse_merges_duplicates() {
        let entries = parse_decklist("20 Swamp\n1 Sol Ring\n10 swamp\n");
        assert_eq!(
            entries,
            vec![DeckEntry::new("Swamp", 30), DeckEntry::new("Sol Ring", 1)]
        );
    }

    #[test]
    fn test_parse_merged_quantity_saturates() {
        let entries = parse_decklist("4000000000 Island\n4000000000 Island\n");
        assert_eq!(entries, vec![DeckEntry::new("Island", u32::MAX)]);
    }

    #[test]
    fn test_parse_number_in_name_kept() {
        // No whitespace after the digits, so the whole line is the name.
        let entries = parse_decklist("1000-Year Storm");
        assert_eq!(entries, vec![DeckEntry::new("1000-Year Storm", 1)]);
    }

    #[test]
    fn test_parse_zero_quantity_counts_as_one() {
        let entries = parse_decklist("0 Sol Ring");
        assert_eq!(entries, vec![DeckEntry::new("Sol Ring", 1)]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_decklist("").is_empty());
        assert!(parse_decklist("\n\n  \n").is_empty());
    }
}
