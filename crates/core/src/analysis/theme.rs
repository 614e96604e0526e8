//! Deck-building restriction detector.
//!
//! Looks for deliberate constraints (one artist, one set, all commons, ...)
//! that mark an exhibition deck. Each check finds the dominant value over the
//! non-basic sample and reports it when its share reaches the check's threshold.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::composition::round2;
use super::types::{RestrictionDetection, RestrictionKind, RestrictionReport};
use crate::card::{Card, Rarity};

/// Smallest sample the detector will judge.
pub const MIN_SAMPLE: usize = 20;

const ARTIST_THRESHOLD: f64 = 0.40;
const SET_THRESHOLD: f64 = 0.60;
const BLOCK_THRESHOLD: f64 = 0.70;
const BLOCK_MIN_MAPPED: f64 = 0.50;
const RARITY_THRESHOLD: f64 = 0.80;
const FRAME_THRESHOLD: f64 = 0.85;
const ALPHABET_SKEW: f64 = 3.0;
const NAME_WORD_MIN_CARDS: usize = 10;

const OLD_FRAMES: &[&str] = &["1993", "1997"];

/// Preconstructed-product sets; cards cluster there without any intent.
const PRECON_SETS: &[&str] = &[
    "plc", "pca", "c13", "c14", "c15", "c16", "c17", "c18", "c19", "c20", "c21", "khc", "afc",
    "mic", "voc", "nec", "ncc", "brc", "orc", "onc", "moc", "woc", "lcc", "pip", "dsc", "fdc",
    "mh3c", "acr",
];

const BLOCKS: &[(&str, &[&str])] = &[
    ("Ravnica", &["rav", "gpt", "dis", "rtr", "gtc", "dgm", "grn", "rna", "war"]),
    ("Innistrad", &["isd", "dka", "avr", "soi", "emn", "mid", "vow"]),
    ("Zendikar", &["zen", "wwk", "roe", "bfz", "ogw", "znr"]),
    ("Mirrodin", &["mrd", "dst", "5dn", "som", "mbs", "nph", "one", "mom"]),
    ("Kamigawa", &["chk", "bok", "sok", "neo"]),
    ("Theros", &["ths", "bng", "jou", "thb"]),
    ("Dominaria", &["dom", "dmu", "bro"]),
    ("Ixalan", &["xln", "rix", "lci"]),
    ("Eldraine", &["eld", "woe"]),
    ("Tarkir", &["ktk", "frf", "dtk"]),
    ("Amonkhet", &["akh", "hou"]),
    ("Kaladesh", &["kld", "aer"]),
    ("Lorwyn", &["lrw", "mor", "shm", "eve"]),
    ("Alara", &["ala", "con", "arb"]),
    ("Time Spiral", &["tsp", "plc", "fut"]),
    ("Ice Age", &["ice", "all", "csp"]),
];

const STOP_WORDS: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "for", "is", "on", "that", "it", "with", "as", "was",
    "at", "be", "this", "from", "or", "an",
];

static NAME_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]{3,}").expect("name word regex is valid"));

/// Base points of each restriction before concentration scaling.
fn base_points(kind: RestrictionKind) -> f64 {
    match kind {
        RestrictionKind::SingleArtist => 35.0,
        RestrictionKind::SetRestricted => 30.0,
        RestrictionKind::BlockRestricted => 25.0,
        RestrictionKind::RarityRestricted => 20.0,
        RestrictionKind::AlphabetDeck => 15.0,
        RestrictionKind::ManaValueRestricted => 50.0,
        RestrictionKind::FrameRestricted => 25.0,
        RestrictionKind::NameTheme => 40.0,
    }
}

/// Most frequent value and its count; ties go to the value seen first.
fn dominant<I>(values: I) -> Option<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    // value -> (count, first-seen index)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, index)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (a_count, a_first)), (_, (b_count, b_first))| {
            a_count.cmp(b_count).then(b_first.cmp(a_first))
        })
        .map(|(value, (count, _))| (value, count))
}

fn detection(kind: RestrictionKind, value: String, count: usize, share: f64, description: String) -> RestrictionDetection {
    RestrictionDetection {
        kind,
        value,
        count,
        share,
        points: base_points(kind) * (0.5 + 0.5 * share),
        description,
    }
}

fn percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

fn check_artist(sample: &[&Card]) -> Option<RestrictionDetection> {
    let artists: Vec<String> = sample.iter().filter_map(|c| c.artist.clone()).collect();
    let total = artists.len();
    let (artist, count) = dominant(artists)?;
    let share = count as f64 / total as f64;
    (share >= ARTIST_THRESHOLD).then(|| {
        let description = format!("{} artist theme ({})", artist, percent(share));
        detection(RestrictionKind::SingleArtist, artist, count, share, description)
    })
}

fn check_set(sample: &[&Card]) -> Option<RestrictionDetection> {
    let sets: Vec<String> = sample
        .iter()
        .map(|c| c.set_code.to_lowercase())
        .filter(|s| !s.is_empty() && !PRECON_SETS.contains(&s.as_str()))
        .collect();
    let total = sets.len();
    let (set, count) = dominant(sets)?;
    let share = count as f64 / total as f64;
    (share >= SET_THRESHOLD).then(|| {
        let description = format!("{} set theme ({})", set.to_uppercase(), percent(share));
        detection(RestrictionKind::SetRestricted, set, count, share, description)
    })
}

fn block_of(set_code: &str) -> Option<&'static str> {
    let set_code = set_code.to_lowercase();
    BLOCKS
        .iter()
        .find(|(_, sets)| sets.contains(&set_code.as_str()))
        .map(|(block, _)| *block)
}

fn check_block(sample: &[&Card]) -> Option<RestrictionDetection> {
    let blocks: Vec<String> = sample
        .iter()
        .filter_map(|c| block_of(&c.set_code))
        .map(str::to_string)
        .collect();
    if (blocks.len() as f64) < sample.len() as f64 * BLOCK_MIN_MAPPED {
        return None;
    }
    let total = blocks.len();
    let (block, count) = dominant(blocks)?;
    let share = count as f64 / total as f64;
    (share >= BLOCK_THRESHOLD).then(|| {
        let description = format!("{} block theme ({})", block, percent(share));
        detection(RestrictionKind::BlockRestricted, block, count, share, description)
    })
}

fn check_rarity(sample: &[&Card]) -> Option<RestrictionDetection> {
    let rarities: Vec<String> = sample
        .iter()
        .filter(|c| c.rarity != Rarity::Unknown)
        .map(|c| c.rarity.as_str().to_string())
        .collect();
    let total = rarities.len();
    let (rarity, count) = dominant(rarities)?;
    let share = count as f64 / total as f64;
    let thematic = rarity == Rarity::Common.as_str() || rarity == Rarity::Uncommon.as_str();
    (thematic && share >= RARITY_THRESHOLD).then(|| {
        let mut label = rarity.clone();
        if let Some(first) = label.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        let description = format!("{} rarity restriction ({})", label, percent(share));
        detection(RestrictionKind::RarityRestricted, rarity, count, share, description)
    })
}

fn check_frame(sample: &[&Card]) -> Option<RestrictionDetection> {
    let frames: Vec<String> = sample.iter().filter_map(|c| c.frame.clone()).collect();
    let total = frames.len();
    let (frame, count) = dominant(frames)?;
    let share = count as f64 / total as f64;
    (OLD_FRAMES.contains(&frame.as_str()) && share >= FRAME_THRESHOLD).then(|| {
        let description = format!("Old Border frame theme ({})", percent(share));
        detection(RestrictionKind::FrameRestricted, frame, count, share, description)
    })
}

fn check_alphabet(sample: &[&Card]) -> Option<RestrictionDetection> {
    let mut letters = [0usize; 26];
    for card in sample {
        if let Some(first) = card.name.chars().next().filter(char::is_ascii_alphabetic) {
            letters[(first.to_ascii_lowercase() as u8 - b'a') as usize] += 1;
        }
    }

    let covered = letters.iter().filter(|&&n| n > 0).count();
    if covered < letters.len() {
        return None;
    }
    let mean = letters.iter().sum::<usize>() as f64 / letters.len() as f64;
    let max = letters.iter().copied().max().unwrap_or(0) as f64;
    if max > ALPHABET_SKEW * mean {
        return None;
    }

    Some(detection(
        RestrictionKind::AlphabetDeck,
        "a-z".to_string(),
        covered,
        1.0,
        "Alphabet deck (100% coverage)".to_string(),
    ))
}

fn check_mana_value(sample: &[&Card]) -> Option<RestrictionDetection> {
    let spells: Vec<&&Card> = sample.iter().filter(|c| !c.is_land()).collect();
    let values = spells
        .iter()
        .map(|c| (c.mana_value.max(0.0).trunc() as u64).to_string());
    let (value, count) = dominant(values)?;
    (count == spells.len()).then(|| {
        let description = format!("Mana value {} restriction (100%)", value);
        detection(RestrictionKind::ManaValueRestricted, value, count, 1.0, description)
    })
}

fn check_name_word(sample: &[&Card]) -> Option<RestrictionDetection> {
    let words = sample.iter().flat_map(|card| {
        let name = card.name.to_lowercase();
        let unique: HashSet<String> = NAME_WORD
            .find_iter(&name)
            .map(|m| m.as_str().to_string())
            .filter(|w| !STOP_WORDS.contains(&w.as_str()))
            .collect();
        // Stable order per card keeps tie-breaking deterministic.
        let mut unique: Vec<String> = unique.into_iter().collect();
        unique.sort();
        unique
    });
    let (word, count) = dominant(words)?;
    let share = count as f64 / sample.len() as f64;
    (count >= NAME_WORD_MIN_CARDS).then(|| {
        let description = format!("'{}' name theme ({} cards, {})", word, count, percent(share));
        detection(RestrictionKind::NameTheme, word, count, share, description)
    })
}

/// Run every restriction check over the non-basic cards.
///
/// Returns an empty report when fewer than [`MIN_SAMPLE`] cards remain.
pub fn detect_restrictions(cards: &[Card]) -> RestrictionReport {
    let sample: Vec<&Card> = cards.iter().filter(|c| !c.type_line.contains("Basic")).collect();
    if sample.len() < MIN_SAMPLE {
        return RestrictionReport::default();
    }

    let detections: Vec<RestrictionDetection> = [
        check_artist(&sample),
        check_set(&sample),
        check_block(&sample),
        check_rarity(&sample),
        check_alphabet(&sample),
        check_mana_value(&sample),
        check_frame(&sample),
        check_name_word(&sample),
    ]
    .into_iter()
    .flatten()
    .collect();

    if detections.is_empty() {
        return RestrictionReport::default();
    }

    let score = round2(detections.iter().map(|d| d.points).sum::<f64>().min(100.0));
    let description = detections
        .iter()
        .map(|d| d.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    RestrictionReport {
        score,
        detections,
        description: Some(description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn filler(count: usize, prefix: &str) -> Vec<Card> {
        (0..count)
            .map(|i| {
                fixtures::card(&format!("{} {}", prefix, i), "Creature — Beast")
                    .with_mana_value((i % 5) as f64 + 1.0)
                    .with_set(format!("s{:02}", i % 10))
                    .with_rarity(if i % 2 == 0 { Rarity::Rare } else { Rarity::Common })
            })
            .collect()
    }

    #[test]
    fn test_small_sample_reports_nothing() {
        let cards: Vec<Card> = filler(10, "Card")
            .into_iter()
            .map(|c| c.with_artist("Rebecca Guay"))
            .collect();
        let report = detect_restrictions(&cards);
        assert_eq!(report.score, 0.0);
        assert!(report.detections.is_empty());
        assert!(report.description.is_none());
    }

    #[test]
    fn test_basics_excluded_from_sample() {
        let mut cards: Vec<Card> = filler(10, "Card")
            .into_iter()
            .map(|c| c.with_artist("Rebecca Guay"))
            .collect();
        cards.push(fixtures::basic_land("Forest").with_quantity(40));
        for i in 0..15 {
            cards.push(fixtures::basic_land(&format!("Forest{}", i)));
        }
        assert!(detect_restrictions(&cards).detections.is_empty());
    }

    #[test]
    fn test_artist_concentration() {
        let mut cards: Vec<Card> = filler(45, "Guay")
            .into_iter()
            .map(|c| c.with_artist("Rebecca Guay"))
            .collect();
        cards.extend(
            filler(8, "Other")
                .into_iter()
                .map(|c| c.with_artist("Somebody Else")),
        );
        let report = detect_restrictions(&cards);
        let artist = report
            .detections
            .iter()
            .find(|d| d.kind == RestrictionKind::SingleArtist)
            .unwrap();
        assert_eq!(artist.value, "Rebecca Guay");
        assert_eq!(artist.count, 45);
        assert!((artist.points - 35.0 * (0.5 + 0.5 * 45.0 / 53.0)).abs() < 1e-9);
        assert!(report.tags().contains(&"single_artist"));
        assert!(report.description.unwrap().starts_with("Rebecca Guay artist theme (85%)"));
    }

    #[test]
    fn test_precon_set_ignored() {
        let cards: Vec<Card> = filler(30, "Precon")
            .into_iter()
            .map(|c| c.with_set("c19"))
            .collect();
        let report = detect_restrictions(&cards);
        assert!(!report.tags().contains(&"set_restricted"));

        let cards: Vec<Card> = filler(30, "Expansion")
            .into_iter()
            .map(|c| c.with_set("ZEN"))
            .collect();
        let report = detect_restrictions(&cards);
        assert!(report.tags().contains(&"set_restricted"));
        assert!(report.tags().contains(&"block_restricted"));
    }

    #[test]
    fn test_set_share_excludes_precon_cards() {
        let mut cards: Vec<Card> = filler(15, "Precon")
            .into_iter()
            .map(|c| c.with_set("c19"))
            .collect();
        cards.extend(filler(15, "Core").into_iter().map(|c| c.with_set("m21")));

        let report = detect_restrictions(&cards);
        let set = report
            .detections
            .iter()
            .find(|d| d.kind == RestrictionKind::SetRestricted)
            .unwrap();
        assert_eq!(set.value, "m21");
        assert_eq!(set.count, 15);
        assert_eq!(set.share, 1.0);
    }

    #[test]
    fn test_block_share_counts_only_mapped_sets() {
        let innistrad = ["isd", "soi", "mid"];
        let mut cards: Vec<Card> = filler(18, "Gothic")
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.with_set(innistrad[i % 3]))
            .collect();
        cards.extend(filler(12, "Loose"));

        let report = detect_restrictions(&cards);
        let block = report
            .detections
            .iter()
            .find(|d| d.kind == RestrictionKind::BlockRestricted)
            .unwrap();
        assert_eq!(block.value, "Innistrad");
        assert_eq!(block.count, 18);
        assert_eq!(block.share, 1.0);
    }

    #[test]
    fn test_block_needs_half_the_sample_mapped() {
        let mut cards: Vec<Card> = filler(10, "Gothic")
            .into_iter()
            .map(|c| c.with_set("isd"))
            .collect();
        cards.extend(filler(20, "Loose"));
        assert!(!detect_restrictions(&cards).tags().contains(&"block_restricted"));
    }

    #[test]
    fn test_dominant_tie_goes_to_first_seen() {
        let values = ["b", "a", "a", "b", "c"].map(String::from);
        assert_eq!(dominant(values), Some(("b".to_string(), 2)));
        assert_eq!(dominant(Vec::<String>::new()), None);
    }

    #[test]
    fn test_rarity_only_for_common_or_uncommon() {
        let rares: Vec<Card> = filler(25, "Rare")
            .into_iter()
            .map(|c| c.with_rarity(Rarity::Rare))
            .collect();
        assert!(!detect_restrictions(&rares).tags().contains(&"rarity_restricted"));

        let commons: Vec<Card> = filler(25, "Common")
            .into_iter()
            .map(|c| c.with_rarity(Rarity::Common))
            .collect();
        let report = detect_restrictions(&commons);
        assert!(report.tags().contains(&"rarity_restricted"));
        assert!(report
            .description
            .unwrap()
            .contains("Common rarity restriction (100%)"));
    }

    #[test]
    fn test_mana_value_restriction_ignores_lands() {
        let mut cards: Vec<Card> = filler(24, "Two Drop")
            .into_iter()
            .map(|c| c.with_mana_value(2.0))
            .collect();
        cards.push(fixtures::card("Command Tower", "Land").with_mana_value(0.0));
        let report = detect_restrictions(&cards);
        let mv = report
            .detections
            .iter()
            .find(|d| d.kind == RestrictionKind::ManaValueRestricted)
            .unwrap();
        assert_eq!(mv.value, "2");
        assert_eq!(mv.points, 50.0);
    }

    #[test]
    fn test_old_frame() {
        let cards: Vec<Card> = filler(20, "Oldie")
            .into_iter()
            .map(|c| c.with_frame("1993"))
            .collect();
        assert!(detect_restrictions(&cards).tags().contains(&"frame_restricted"));

        let cards: Vec<Card> = filler(20, "Modern")
            .into_iter()
            .map(|c| c.with_frame("2015"))
            .collect();
        assert!(!detect_restrictions(&cards).tags().contains(&"frame_restricted"));
    }

    #[test]
    fn test_alphabet_deck() {
        let cards: Vec<Card> = (b'a'..=b'z')
            .map(|letter| {
                let name = format!("{}rchetype", (letter as char).to_ascii_uppercase());
                fixtures::card(&name, "Sorcery").with_mana_value((letter % 4) as f64)
            })
            .collect();
        let report = detect_restrictions(&cards);
        assert!(report.tags().contains(&"alphabet_deck"));
    }

    #[test]
    fn test_name_word_theme() {
        let mut cards: Vec<Card> = (0..12)
            .map(|i| {
                fixtures::card(&format!("Goblin of the Hill {}", i), "Creature — Goblin")
                    .with_mana_value((i % 3) as f64 + 1.0)
            })
            .collect();
        cards.extend(filler(10, "Card"));
        let report = detect_restrictions(&cards);
        let theme = report
            .detections
            .iter()
            .find(|d| d.kind == RestrictionKind::NameTheme)
            .unwrap();
        // "goblin" and "hill" tie at 12; the first word seen wins.
        assert_eq!(theme.value, "goblin");
        assert_eq!(theme.count, 12);
    }

    #[test]
    fn test_score_capped() {
        let cards: Vec<Card> = (0..30)
            .map(|i| {
                fixtures::card(&format!("Goblin Raider {}", i), "Creature — Goblin")
                    .with_artist("Rebecca Guay")
                    .with_set("zen")
                    .with_rarity(Rarity::Common)
                    .with_frame("1993")
                    .with_mana_value(1.0)
            })
            .collect();
        let report = detect_restrictions(&cards);
        assert_eq!(report.score, 100.0);
    }
}
