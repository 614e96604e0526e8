//! Mechanical cohesion scoring: tribal intent and theme concentration.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::composition::round2;
use super::policy::ScoringPolicy;
use super::types::{SynergyReport, ThemeHit};
use crate::card::Card;

/// Smallest non-basic sample worth scoring.
pub const MIN_SAMPLE: usize = 20;

/// Cards a theme needs before it is listed as detected.
const MIN_THEME_CARDS: usize = 5;

const SUB_SCORE_CAP: f64 = 80.0;

/// Tribal types as (singular, plural). The singular is the canonical form.
const TRIBES: &[(&str, &str)] = &[
    ("elf", "elves"),
    ("goblin", "goblins"),
    ("zombie", "zombies"),
    ("human", "humans"),
    ("vampire", "vampires"),
    ("angel", "angels"),
    ("dragon", "dragons"),
    ("demon", "demons"),
    ("merfolk", "merfolk"),
    ("wizard", "wizards"),
    ("soldier", "soldiers"),
    ("knight", "knights"),
    ("cleric", "clerics"),
    ("warrior", "warriors"),
    ("shaman", "shamans"),
    ("druid", "druids"),
    ("beast", "beasts"),
    ("bird", "birds"),
    ("cat", "cats"),
    ("dog", "dogs"),
    ("dinosaur", "dinosaurs"),
    ("elemental", "elementals"),
    ("spirit", "spirits"),
    ("sliver", "slivers"),
    ("ally", "allies"),
    ("pirate", "pirates"),
    ("rat", "rats"),
    ("snake", "snakes"),
    ("spider", "spiders"),
    ("treefolk", "treefolk"),
    ("fungus", "fungi"),
    ("saproling", "saprolings"),
    ("faerie", "faeries"),
    ("giant", "giants"),
    ("kithkin", "kithkin"),
    ("artificer", "artificers"),
    ("rogue", "rogues"),
    ("assassin", "assassins"),
    ("wolf", "wolves"),
    ("werewolf", "werewolves"),
    ("sphinx", "sphinxes"),
    ("horror", "horrors"),
    ("squirrel", "squirrels"),
    ("frog", "frogs"),
    ("tyranid", "tyranids"),
    ("astartes", "astartes"),
    ("phyrexian", "phyrexians"),
    ("ninja", "ninjas"),
    ("samurai", "samurai"),
    ("monk", "monks"),
    ("skeleton", "skeletons"),
    ("insect", "insects"),
];

/// Any spelling of a tribe to its canonical singular.
static TRIBE_FORMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    TRIBES
        .iter()
        .flat_map(|(singular, plural)| [(*singular, *singular), (*plural, *singular)])
        .collect()
});

struct Theme {
    name: &'static str,
    keywords: &'static [&'static str],
    weight: f64,
}

const THEMES: &[Theme] = &[
    Theme {
        name: "counters",
        keywords: &["counter", "counters", "proliferate", "modified", "adapt"],
        weight: 1.0,
    },
    Theme {
        name: "tokens",
        keywords: &["token", "tokens", "populate", "convoke"],
        weight: 0.9,
    },
    Theme {
        name: "sacrifice",
        keywords: &["sacrifice", "sacrificed", "dies", "death", "dying"],
        weight: 1.2,
    },
    Theme {
        name: "graveyard",
        keywords: &["graveyard", "graveyards", "reanimate", "unearth", "flashback", "escape", "dredge", "delve"],
        weight: 1.0,
    },
    Theme {
        name: "etb",
        keywords: &["enters the battlefield", "enters", "blink", "flicker"],
        weight: 1.0,
    },
    Theme {
        name: "artifacts",
        keywords: &["artifact", "artifacts", "equipment", "equip", "vehicle", "crew", "treasure", "clue", "food"],
        weight: 0.9,
    },
    Theme {
        name: "enchantments",
        keywords: &["enchantment", "enchantments", "aura", "constellation", "enchanted"],
        weight: 1.0,
    },
    Theme {
        name: "spells",
        keywords: &["instant", "sorcery", "prowess", "magecraft", "storm"],
        weight: 1.0,
    },
    Theme {
        name: "combat",
        keywords: &["attacks", "attacking", "combat damage", "blocked", "fight", "fights"],
        weight: 0.8,
    },
    Theme {
        name: "lifegain",
        keywords: &["gain life", "gains life", "lifelink"],
        weight: 1.0,
    },
    Theme {
        name: "mill",
        keywords: &["mill", "milled", "mills"],
        weight: 1.3,
    },
    Theme {
        name: "discard",
        keywords: &["discard", "discards", "discarded", "madness", "hellbent"],
        weight: 1.0,
    },
    Theme {
        name: "draw",
        keywords: &["draw a card", "draw cards", "draws a card", "wheel"],
        weight: 0.6,
    },
];

/// Canonical tribes named by whole words of `text`.
fn tribes_in_text(text: &str) -> HashSet<&'static str> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter_map(|word| TRIBE_FORMS.get(word).copied())
        .collect()
}

/// Canonical tribes among a creature's front-face subtypes.
fn tribes_in_type_line(card: &Card) -> HashSet<&'static str> {
    let type_line = card.front_type_line();
    let subtypes = ["—", "–", " - "]
        .iter()
        .find_map(|sep| type_line.split_once(sep).map(|(_, rest)| rest));
    match subtypes {
        Some(subtypes) => tribes_in_text(subtypes),
        None => HashSet::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TribalScore {
    tribe: Option<String>,
    score: f64,
}

/// Tribal density weighted by intent: rules-text mentions prove the type
/// matters, printed subtypes only count once those mentions exist.
fn tribal_density(sample: &[&Card], policy: &ScoringPolicy) -> TribalScore {
    let creatures: Vec<&&Card> = sample.iter().filter(|c| c.is_creature()).collect();
    if creatures.len() < policy.tribal_min_creatures {
        return TribalScore { tribe: None, score: 0.0 };
    }

    let mut mentions: HashMap<&str, usize> = HashMap::new();
    for card in sample {
        for tribe in tribes_in_text(&card.rules_text()) {
            *mentions.entry(tribe).or_insert(0) += 1;
        }
    }

    let mut printed: HashMap<&str, usize> = HashMap::new();
    for card in &creatures {
        for tribe in tribes_in_type_line(card) {
            *printed.entry(tribe).or_insert(0) += 1;
        }
    }

    let creature_count = creatures.len() as f64;
    let mut best = TribalScore { tribe: None, score: 0.0 };
    // Catalogue order makes ties deterministic.
    for (tribe, _) in TRIBES {
        let oracle = mentions.get(tribe).copied().unwrap_or(0);
        let share = printed.get(tribe).copied().unwrap_or(0) as f64 / creature_count;
        let type_line_score = if oracle >= 5 {
            share * 50.0
        } else if oracle >= 2 {
            share * 25.0
        } else {
            0.0
        };
        let score = oracle as f64 * 3.0 + type_line_score;
        if score > best.score {
            best = TribalScore {
                tribe: Some(tribe.to_string()),
                score,
            };
        }
    }

    best.score = best.score.min(SUB_SCORE_CAP);
    best
}

/// Per-theme card counts over the given cards, in catalogue order.
fn theme_hits(cards: &[&Card]) -> Vec<(&'static Theme, usize)> {
    let texts: Vec<String> = cards.iter().map(|c| c.rules_text().to_lowercase()).collect();
    THEMES
        .iter()
        .map(|theme| {
            let hits = texts
                .iter()
                .filter(|text| theme.keywords.iter().any(|k| text.contains(k)))
                .count();
            (theme, hits)
        })
        .collect()
}

fn theme_concentration(spells: &[&Card]) -> f64 {
    if spells.is_empty() {
        return 0.0;
    }

    let size = spells.len() as f64;
    let mut scores: Vec<f64> = theme_hits(spells)
        .into_iter()
        .filter(|(_, hits)| *hits > 0)
        .map(|(theme, hits)| hits as f64 / size * 100.0 * theme.weight)
        .collect();
    scores.sort_by(|a, b| b.total_cmp(a));

    let mut score = match scores.first() {
        Some(top) => *top,
        None => return 0.0,
    };
    if let Some(second) = scores.get(1).filter(|s| **s > 15.0) {
        score += second * 0.2;
    }
    score.min(SUB_SCORE_CAP)
}

/// Themes hit by at least five cards, most cards first.
fn detected_themes(spells: &[&Card]) -> Vec<ThemeHit> {
    if spells.is_empty() {
        return Vec::new();
    }
    let size = spells.len() as f64;
    let mut themes: Vec<ThemeHit> = theme_hits(spells)
        .into_iter()
        .filter(|(_, hits)| *hits >= MIN_THEME_CARDS)
        .map(|(theme, hits)| ThemeHit {
            theme: theme.name.to_string(),
            cards: hits,
            share: round2(hits as f64 / size * 100.0),
        })
        .collect();
    themes.sort_by(|a, b| b.cards.cmp(&a.cards));
    themes
}

/// Score how mechanically cohesive the non-basic cards are (0-100).
///
/// Below [`MIN_SAMPLE`] non-basic cards the report is neutral.
pub fn score_synergy(cards: &[Card], policy: &ScoringPolicy) -> SynergyReport {
    let sample: Vec<&Card> = cards.iter().filter(|c| !c.type_line.contains("Basic")).collect();
    if sample.len() < MIN_SAMPLE {
        return SynergyReport::default();
    }
    let spells: Vec<&Card> = sample.iter().copied().filter(|c| !c.is_land()).collect();

    let tribal = tribal_density(&sample, policy);
    let theme_score = theme_concentration(&spells);

    let primary = tribal.score.max(theme_score);
    let secondary = tribal.score.min(theme_score);
    let mut score = primary;
    if secondary > 20.0 {
        score += secondary * 0.15;
    }

    SynergyReport {
        score: round2(score.min(100.0)),
        tribal_score: round2(tribal.score),
        theme_score: round2(theme_score),
        tribe: tribal.tribe,
        themes: detected_themes(&spells),
    }
}
