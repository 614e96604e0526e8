//! Analyse a decklist file from the command line.
//!
//! Usage: `analyze-deck <decklist-file> [commander]`
//!
//! Configuration is loaded the same way as `bracketd` (`BRACKET_CONFIG`,
//! default `config.toml`, plus `BRACKET_` environment overrides). Names the
//! bulk lookup misses are retried with Scryfall's fuzzy search and the deck is
//! analysed again with the corrected spellings.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bracket_core::analysis::Category;
use bracket_core::{parse_decklist, AnalysisError, DeckAnalysis, ScryfallClient};
use bracket_server::services::{build_analyzer, load_runtime_config};

#[tokio::main]
async fn main() {
    // Quiet by default so the report is the only thing on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: analyze-deck <decklist-file> [commander]");
    };
    let commander = args.next();

    let decklist = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read decklist {:?}", path))?;

    let config = load_runtime_config()?;
    let analyzer = build_analyzer(&config).await?;

    let mut outcome = analyzer.analyze(&decklist, commander.as_deref()).await;

    let unresolved: Vec<String> = match &outcome {
        Ok(analysis) => analysis.unresolved.clone(),
        Err(AnalysisError::NoCardsResolved { .. }) => {
            parse_decklist(&decklist).into_iter().map(|e| e.name).collect()
        }
        Err(_) => Vec::new(),
    };
    if !unresolved.is_empty() {
        let scryfall =
            ScryfallClient::new(&config.scryfall).context("Failed to create Scryfall client")?;
        let corrections = fuzzy_corrections(&scryfall, &unresolved).await;
        if !corrections.is_empty() {
            let corrected = correct_decklist(&decklist, &corrections);
            outcome = analyzer.analyze(&corrected, commander.as_deref()).await;
        }
    }

    let analysis = outcome.context("Analysis failed")?;
    print!("{}", render_report(&analysis));
    Ok(())
}

/// Fuzzy-match each unresolved name, keyed by the lowercase typed name.
async fn fuzzy_corrections(scryfall: &ScryfallClient, names: &[String]) -> HashMap<String, String> {
    let mut corrections = HashMap::new();
    for name in names {
        match scryfall.fuzzy_lookup(name).await {
            Ok(Some(card)) => {
                eprintln!("Using '{}' for '{}'", card.name, name);
                corrections.insert(name.to_lowercase(), card.name);
            }
            Ok(None) => {}
            Err(e) => warn!("Fuzzy lookup for '{}' failed: {}", name, e),
        }
    }
    corrections
}

/// Rewrite decklist lines whose card name has a correction.
fn correct_decklist(decklist: &str, corrections: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(decklist.len());
    for line in decklist.lines() {
        let entry = parse_decklist(line).into_iter().next();
        match entry.and_then(|e| corrections.get(&e.name.to_lowercase()).map(|c| (e.name, c))) {
            Some((typed, corrected)) => out.push_str(&line.replacen(&typed, corrected, 1)),
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn render_report(analysis: &DeckAnalysis) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(format!(
        "Commander: {}",
        analysis.commander.as_deref().unwrap_or("(none detected)")
    ));
    let colors: String = analysis
        .color_identity
        .iter()
        .map(|c| c.symbol())
        .collect();
    line(format!(
        "Colors: {}",
        if colors.is_empty() { "C" } else { colors.as_str() }
    ));
    line(format!("Total cards: {}", analysis.total_cards));
    line(String::new());

    line("Composition:".to_string());
    for category in Category::PRIORITY.iter().chain([Category::Other].iter()) {
        let count = analysis.categories.count(*category);
        if count == 0 {
            continue;
        }
        if *category == Category::Land {
            let lands = &analysis.lands;
            line(format!(
                "  {}: {} ({} effective incl. {} MDFCs)",
                category.plural(),
                count,
                lands.effective_land_count,
                lands.effective_land_count.saturating_sub(lands.land_count)
            ));
        } else {
            line(format!("  {}: {}", category.plural(), count));
        }
    }
    line(format!(
        "  average mana value: {:.2}",
        analysis.mana_curve.average
    ));
    line(String::new());

    if !analysis.game_changers.is_empty() {
        line(format!(
            "Game Changers ({}): {}",
            analysis.game_changers.len(),
            analysis.game_changers.join(", ")
        ));
    }
    if analysis.tutors.total() > 0 {
        let tutors: Vec<&str> = analysis.tutors.all().map(String::as_str).collect();
        line(format!("Tutors ({}): {}", tutors.len(), tutors.join(", ")));
    }
    for combo in &analysis.combos.confirmed {
        line(format!("Combo: {}", combo.card_names.join(" + ")));
    }
    if !analysis.archetypes.is_empty() {
        line(format!("Archetypes: {}", analysis.archetypes.join(", ")));
    }
    line(String::new());

    line(format!(
        "Bracket {} ({})",
        analysis.bracket,
        analysis.bracket_name()
    ));
    for reason in &analysis.reasons {
        line(format!("  - {}", reason));
    }

    if !analysis.warnings.is_empty() {
        line(String::new());
        line("Warnings:".to_string());
        for warning in &analysis.warnings {
            line(format!("  ! {}", warning));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_core::testing::fixtures;
    use bracket_core::{evaluate_deck, DeckCombos, ReferenceLists, ScoringPolicy};

    #[test]
    fn test_report_lists_effective_lands_and_bracket() {
        let cards = vec![
            fixtures::card("Sol Ring", "Artifact").with_mana_value(1.0),
            fixtures::mdfc(
                "Emeria's Call // Emeria, Shattered Skyclave",
                ("Sorcery", "Create two 4/4 white Angel Warrior creature tokens with flying."),
                ("Land", "{T}: Add {W}."),
            ),
            fixtures::basic_land("Plains").with_quantity(38),
        ];
        let analysis = evaluate_deck(
            &cards,
            None,
            DeckCombos::default(),
            &[],
            &ReferenceLists::embedded(),
            &ScoringPolicy::default(),
        )
        .unwrap();

        let report = render_report(&analysis);
        assert!(report.contains("lands: 38 (39 effective incl. 1 MDFCs)"));
        assert!(report.contains(&format!("Bracket {} (", analysis.bracket)));
        assert!(report.contains("Warnings:"));
    }

    #[test]
    fn test_correct_decklist_rewrites_only_corrected_names() {
        let decklist = "// Commander\n1 Atraxa, Praetors Voice\n1 Sol Ring\n4x lightnig bolt\n";
        let corrections = HashMap::from([
            (
                "atraxa, praetors voice".to_string(),
                "Atraxa, Praetors' Voice".to_string(),
            ),
            ("lightnig bolt".to_string(), "Lightning Bolt".to_string()),
        ]);

        let corrected = correct_decklist(decklist, &corrections);
        assert_eq!(
            corrected,
            "// Commander\n1 Atraxa, Praetors' Voice\n1 Sol Ring\n4x Lightning Bolt\n"
        );
        assert_eq!(
            parse_decklist(&corrected)
                .iter()
                .map(|e| e.quantity)
                .sum::<u32>(),
            6
        );
    }

    #[test]
    fn test_correct_decklist_without_corrections_is_unchanged() {
        let decklist = "1 Sol Ring\n\n1 Island\n";
        assert_eq!(correct_decklist(decklist, &HashMap::new()), decklist);
    }
}
