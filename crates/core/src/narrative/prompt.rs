//! Prompt construction for LLM narratives.
//!
//! Prompts carry the real rules text of every card that is not a widely known
//! staple so the model reasons from the provided text instead of memory.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::analysis::{Category, DeckAnalysis};
use crate::combos::DeckCombos;
use crate::reference::{bracket_info, NameSet};

/// Tutors listed in the overview before truncating with "...".
const MAX_LISTED_TUTORS: usize = 5;
/// Near-miss combos listed in the combo section.
const MAX_NEAR_MISSES: usize = 5;
/// Width cap of a curve bar.
const MAX_BAR: u32 = 15;

pub const SYSTEM_PROMPT: &str = "You are an expert Magic: The Gathering Commander analyst helping \
players understand their decks under the Commander bracket system. Use only the oracle text \
provided in the card reference to understand what a card does. Only discuss combos listed in \
the verified combos section. Keep the tone friendly, like explaining a deck at a game store.";

/// Oracle text for each distinct non-basic card that is not well known.
pub fn card_reference(analysis: &DeckAnalysis, well_known: &NameSet) -> String {
    let mut seen = HashSet::new();
    let mut out = String::new();

    for card in analysis.cards() {
        if !seen.insert(card.key()) {
            continue;
        }
        if well_known.contains_card(card) || card.is_basic_land() {
            continue;
        }

        out.push_str(&format!("[{}]\n", card.name));
        out.push_str(&format!("Type: {}\n", card.type_line));
        if let Some(cost) = card.mana_cost.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!("Cost: {}\n", cost));
        }
        let text = card.rules_text();
        if text.is_empty() {
            out.push_str("Text: (no rules text)\n");
        } else {
            out.push_str(&format!("Text: {}\n", text));
        }
        out.push('\n');
    }

    if out.is_empty() {
        return "(No detailed card data available, using card names only)".to_string();
    }
    out
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// Colors as "W, U", or "Colorless".
pub fn color_label(analysis: &DeckAnalysis) -> String {
    if analysis.color_identity.is_empty() {
        return "Colorless".to_string();
    }
    analysis
        .color_identity
        .iter()
        .map(|c| c.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Statistics, bracket inputs and the decision with its reasons.
pub fn deck_overview(analysis: &DeckAnalysis) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "**Commander:** {}\n",
        analysis.commander.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!("**Color Identity:** {}\n", color_label(analysis)));
    out.push_str(&format!(
        "**Detected Archetypes:** {}\n",
        if analysis.archetypes.is_empty() {
            "None detected".to_string()
        } else {
            analysis.archetypes.join(", ")
        }
    ));
    out.push_str(&format!(
        "**Average Mana Value:** {:.2}\n\n",
        analysis.mana_curve.average
    ));

    out.push_str("**Bracket-Relevant Stats:**\n");
    out.push_str(&format!(
        "- Game Changers ({}): {}\n",
        analysis.game_changers.len(),
        list_or_none(&analysis.game_changers)
    ));
    out.push_str(&format!(
        "- Mass Land Denial: {}\n",
        list_or_none(&analysis.mass_land_denial)
    ));
    out.push_str(&format!(
        "- Extra Turn Cards: {}\n",
        list_or_none(&analysis.extra_turns)
    ));

    let tutors: Vec<String> = analysis.tutors.all().cloned().collect();
    let mut tutor_line = list_or_none(&tutors[..tutors.len().min(MAX_LISTED_TUTORS)]);
    if tutors.len() > MAX_LISTED_TUTORS {
        tutor_line.push_str("...");
    }
    out.push_str(&format!(
        "- Tutors ({}, score {:.1}): {}\n",
        tutors.len(),
        analysis.tutors.weighted_score,
        tutor_line
    ));
    out.push_str(&format!(
        "- Bracket 1 likelihood: {:.0}%\n",
        analysis.bracket1_likelihood.value
    ));
    if let Some(description) = &analysis.restriction.description {
        out.push_str(&format!("- Deckbuilding restrictions: {}\n", description));
    }
    out.push_str(&format!(
        "- Suggested Bracket: {} ({})\n\n",
        analysis.bracket,
        analysis.bracket_name()
    ));

    out.push_str("**Bracket Reasoning:**\n");
    for reason in &analysis.reasons {
        out.push_str(&format!("- {}\n", reason));
    }
    out.push('\n');

    out.push_str("**Card Counts:**\n");
    for category in Category::PRIORITY {
        out.push_str(&format!(
            "- {}: {}\n",
            capitalize(category.plural()),
            analysis.categories.count(category)
        ));
    }
    out.push_str(&format!(
        "- Effective lands: {} (incl. {} MDFCs)\n\n",
        analysis.lands.effective_land_count,
        analysis.lands.mdfc_lands.len()
    ));

    out.push_str("**Mana Curve (non-land cards):**\n");
    for (value, count) in &analysis.mana_curve.histogram {
        let label = if *value >= 7 {
            format!("{}+", value)
        } else {
            value.to_string()
        };
        out.push_str(&format!(
            "  {}: {} ({})\n",
            label,
            "#".repeat((*count).min(MAX_BAR) as usize),
            count
        ));
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Confirmed and near-miss combos as reported by the combo database.
pub fn combo_section(combos: &DeckCombos) -> String {
    if combos.confirmed.is_empty() && combos.near_miss.is_empty() {
        return "VERIFIED COMBOS:\nNo combos found in the combo database for this deck.\n".to_string();
    }

    let mut out = format!("VERIFIED COMBOS ({} in deck):\n", combos.confirmed.len());
    for combo in &combos.confirmed {
        out.push_str(&format!("- {}", combo.card_names.join(" + ")));
        if !combo.produces.is_empty() {
            out.push_str(&format!(" => {}", combo.produces.join(", ")));
        }
        if let Some(tier) = combo.tier {
            out.push_str(&format!(" [tier {}]", tier.tag()));
        }
        out.push('\n');
        if let Some(description) = &combo.description {
            out.push_str(&format!("  Steps: {}\n", description));
        }
    }

    if !combos.near_miss.is_empty() {
        out.push_str(&format!(
            "\nNEAR-MISS COMBOS ({} total, one card missing):\n",
            combos.near_miss.len()
        ));
        for combo in combos.near_miss.iter().take(MAX_NEAR_MISSES) {
            out.push_str(&format!(
                "- {} (missing: {})\n",
                combo.card_names.join(" + "),
                list_or_none(&combo.missing_cards)
            ));
        }
    }

    out
}

fn context_sections(analysis: &DeckAnalysis, well_known: &NameSet) -> String {
    format!(
        "---\nCARD REFERENCE (use these exact oracle texts):\n---\n\n{}\n---\nDECK OVERVIEW:\n---\n\n{}\n---\n{}---\n\n",
        card_reference(analysis, well_known),
        deck_overview(analysis),
        combo_section(&analysis.combos)
    )
}

/// Prompt asking how the deck plays.
pub fn play_patterns_prompt(analysis: &DeckAnalysis, well_known: &NameSet) -> String {
    let mut prompt = context_sections(analysis, well_known);
    prompt.push_str("ANALYSIS REQUEST:\n\n");
    prompt.push_str(
        "1. **How This Deck Plays**: the gameplan for turns 1-3, 4-6 and the late game, \
and what a good draw looks like (the commander is always available).\n",
    );
    prompt.push_str("2. **Win Conditions**: primary and backup ways to close games.\n");
    prompt.push_str("3. **Key Cards & Synergies**: the 3-5 most important non-land cards.\n");
    prompt.push_str(
        "4. **Combo Analysis**: how the verified combos fit the gameplan. Do not invent combos.\n",
    );
    prompt.push_str("5. **Strengths & Weaknesses**\n");
    prompt.push_str(&format!(
        "6. **Bracket Assessment**: given how the deck actually plays, does Bracket {} seem right?\n",
        analysis.bracket
    ));
    prompt
}

/// Prompt asking how to move the deck to `target`.
pub fn adjustment_prompt(analysis: &DeckAnalysis, target: u8, well_known: &NameSet) -> String {
    let mut prompt = context_sections(analysis, well_known);
    let direction = match target.cmp(&analysis.bracket) {
        Ordering::Less => "moving down".to_string(),
        Ordering::Greater => "moving up".to_string(),
        Ordering::Equal => format!("staying at Bracket {}", target),
    };

    prompt.push_str("ADJUSTMENT REQUEST:\n\n");
    prompt.push_str(&format!(
        "The player wants to move this deck from Bracket {} to Bracket {}.\n\n",
        analysis.bracket, target
    ));
    if let Some(info) = bracket_info(target) {
        prompt.push_str(&format!("Bracket {} ({}) expectations:\n", target, info.name));
        prompt.push_str(&format!(
            "- Game Changers allowed: {}\n",
            info.game_changers_allowed
                .map(|n| n.to_string())
                .unwrap_or_else(|| "Unlimited".to_string())
        ));
        prompt.push_str(&format!("- Combos: {}\n", info.combos));
        prompt.push_str(&format!(
            "- Mass land denial: {}\n",
            if info.mass_land_denial_allowed {
                "Allowed"
            } else {
                "Not allowed"
            }
        ));
        prompt.push_str(&format!("- Extra turns: {}\n", info.extra_turns));
        prompt.push_str(&format!(
            "- Expected game length: {}\n\n",
            info.expected_game_length
        ));
    }
    prompt.push_str(&format!(
        "1. **Cards to Remove** ({}): specific cards from this deck, citing their text.\n",
        direction
    ));
    prompt.push_str("2. **Cards to Consider Adding**: 5-10 replacements that keep the strategy.\n");
    prompt.push_str("3. **Strategy Adjustments** for the target bracket.\n");
    prompt
}
