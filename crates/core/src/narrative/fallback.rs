//! Deterministic Markdown narratives used when no LLM answers.

use crate::analysis::{Category, DeckAnalysis};

use super::prompt::color_label;

const BASIC_MODE_NOTE: &str =
    "*Note: full AI analysis unavailable. Configure an LLM provider for detailed insights.*";

/// Extra-turn count above which lowering advice lists them.
const EXTRA_TURN_ADVICE_MIN: usize = 3;

fn bullet_list(lines: &mut Vec<String>, items: &[String], empty: &str) {
    if items.is_empty() {
        lines.push(empty.to_string());
    } else {
        lines.extend(items.iter().map(|item| format!("- {}", item)));
    }
}

/// Summary of the analysis in plain Markdown.
pub fn play_patterns(analysis: &DeckAnalysis) -> String {
    let mut lines = vec![
        "# Deck Analysis (Basic Mode)".to_string(),
        String::new(),
        BASIC_MODE_NOTE.to_string(),
        String::new(),
        format!(
            "## Commander: {}",
            analysis.commander.as_deref().unwrap_or("Unknown")
        ),
        format!("**Color Identity:** {}", color_label(analysis)),
        format!(
            "**Suggested Bracket:** {} ({})",
            analysis.bracket,
            analysis.bracket_name()
        ),
        String::new(),
        "### Bracket Reasoning:".to_string(),
    ];
    bullet_list(&mut lines, &analysis.reasons, "No reasons recorded");

    lines.push(String::new());
    lines.push("### Detected Archetypes:".to_string());
    if analysis.archetypes.is_empty() {
        lines.push("No strong archetype detected".to_string());
    } else {
        lines.push(analysis.archetypes.join(", "));
    }

    lines.push(String::new());
    lines.push("### Game Changers Found:".to_string());
    bullet_list(&mut lines, &analysis.game_changers, "None");

    if !analysis.combos.confirmed.is_empty() {
        lines.push(String::new());
        lines.push("### Combos:".to_string());
        for combo in &analysis.combos.confirmed {
            lines.push(format!("- {}", combo.card_names.join(" + ")));
        }
    }

    let land_count = analysis.categories.count(Category::Land);
    lines.push(String::new());
    lines.push("### Deck Statistics:".to_string());
    lines.push(format!(
        "- Total Non-Land Cards: {}",
        analysis.total_cards.saturating_sub(land_count)
    ));
    lines.push(format!(
        "- Average Mana Value: {:.2}",
        analysis.mana_curve.average
    ));
    lines.push(format!(
        "- Creatures: {}",
        analysis.categories.count(Category::Creature)
    ));
    lines.push(format!(
        "- Instants and Sorceries: {}",
        analysis.categories.count(Category::Instant) + analysis.categories.count(Category::Sorcery)
    ));
    lines.push(format!(
        "- Lands: {} ({} effective incl. {} MDFCs)",
        land_count,
        analysis.lands.effective_land_count,
        analysis.lands.mdfc_lands.len()
    ));

    lines.join("\n")
}

/// Checklist for moving the deck to `target`.
pub fn adjust_to(analysis: &DeckAnalysis, target: u8) -> String {
    let current = analysis.bracket;
    let mut lines = vec![
        format!("# Adjusting from Bracket {} to Bracket {}", current, target),
        String::new(),
        BASIC_MODE_NOTE.to_string(),
        String::new(),
    ];

    if target == current {
        lines.push("The deck already sits in the requested bracket.".to_string());
    } else if target < current {
        lines.push("## To Lower Your Bracket:".to_string());

        if !analysis.game_changers.is_empty() {
            lines.push(String::new());
            lines.push("### Remove These Game Changers:".to_string());
            bullet_list(&mut lines, &analysis.game_changers, "");
        }
        if !analysis.mass_land_denial.is_empty() {
            lines.push(String::new());
            lines.push("### Remove Mass Land Denial:".to_string());
            bullet_list(&mut lines, &analysis.mass_land_denial, "");
        }
        if analysis.extra_turns.len() >= EXTRA_TURN_ADVICE_MIN {
            lines.push(String::new());
            lines.push("### Consider Removing Extra Turn Cards:".to_string());
            bullet_list(&mut lines, &analysis.extra_turns, "");
        }
        if !analysis.combos.confirmed.is_empty() {
            lines.push(String::new());
            lines.push("### Break Up These Combos:".to_string());
            for combo in &analysis.combos.confirmed {
                lines.push(format!("- {}", combo.card_names.join(" + ")));
            }
        }
        let premium: Vec<String> = analysis
            .tutors
            .premium
            .iter()
            .chain(&analysis.tutors.efficient)
            .cloned()
            .collect();
        if !premium.is_empty() {
            lines.push(String::new());
            lines.push("### Swap Efficient Tutors for Slower Ones:".to_string());
            bullet_list(&mut lines, &premium, "");
        }
    } else {
        lines.push("## To Raise Your Bracket:".to_string());
        lines.push(String::new());
        lines.push("Consider adding:".to_string());
        lines.push("- More efficient tutors".to_string());
        lines.push("- Fast mana artifacts".to_string());
        if target >= 3 {
            lines.push("- Cards from the Game Changers list".to_string());
        }
        lines.push("- Win condition combos".to_string());
    }

    lines.join("\n")
}
