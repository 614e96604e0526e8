//! End-to-end bracket scenarios.
//!
//! Decks are built from fixtures and run through `evaluate_deck` or the async
//! `DeckAnalyzer` with mock collaborators.

use std::sync::Arc;

use bracket_core::analysis::bracket::DEFAULT_REASON;
use bracket_core::analysis::categorize::category_of;
use bracket_core::analysis::{decide_bracket, BracketInputs, Category};
use bracket_core::card::total_quantity;
use bracket_core::combos::{ComboResult, ComboTier};
use bracket_core::testing::{fixtures, MockCardResolver, MockComboDatabase};
use bracket_core::{
    evaluate_deck, Card, DeckAnalysis, DeckAnalyzer, DeckCombos, ReferenceLists, ScoringPolicy,
};

// Names built from these never repeat a word more than 8 times and only use
// eight initial letters, so the name-word and alphabet checks stay quiet.
const NAME_HEADS: [&str; 8] = [
    "Amber", "Briar", "Cinder", "Dusk", "Ember", "Frost", "Gilded", "Hollow",
];
const NAME_TAILS: [&str; 8] = [
    "Warden", "Sprite", "Oracle", "Drake", "Sentry", "Herald", "Wisp", "Golem",
];

fn distinct_names(count: usize) -> Vec<String> {
    assert!(count <= NAME_HEADS.len() * NAME_TAILS.len());
    (0..count)
        .map(|i| format!("{} {}", NAME_HEADS[i % 8], NAME_TAILS[i / 8]))
        .collect()
}

/// Non-basic cards with varied mana values.
fn spells(count: usize, type_line: &str, oracle_text: &str) -> Vec<Card> {
    distinct_names(count)
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            fixtures::card(&name, type_line)
                .with_oracle_text(oracle_text)
                .with_mana_value((i % 6 + 1) as f64)
        })
        .collect()
}

fn evaluate(cards: &[Card]) -> DeckAnalysis {
    evaluate_deck(
        cards,
        None,
        DeckCombos::default(),
        &[],
        &ReferenceLists::embedded(),
        &ScoringPolicy::default(),
    )
    .unwrap()
}

/// 45 of 53 non-basic cards by one artist, plus 47 basics.
fn guay_deck(with_card: Option<Card>) -> Vec<Card> {
    let mut cards = spells(53, "Enchantment", "");
    if let Some(extra) = with_card {
        cards[0] = extra;
    }
    for (i, card) in cards.iter_mut().enumerate() {
        let artist = if i < 45 {
            "Rebecca Guay".to_string()
        } else {
            format!("Artist {}", i)
        };
        card.artist = Some(artist);
    }
    cards.push(fixtures::basic_land("Forest").with_quantity(47));
    cards
}

async fn resolver_with(cards: Vec<Card>) -> Arc<MockCardResolver> {
    let resolver = MockCardResolver::new();
    resolver.add_cards(cards).await;
    Arc::new(resolver)
}

fn sol_ring_pool() -> Vec<Card> {
    vec![
        fixtures::card("Sol Ring", "Artifact")
            .with_oracle_text("{T}: Add {C}{C}.")
            .with_mana_value(1.0),
        fixtures::card("Demonic Tutor", "Sorcery")
            .with_oracle_text("Search your library for a card, put that card into your hand, then shuffle.")
            .with_mana_value(2.0),
        fixtures::card("Rhystic Study", "Enchantment")
            .with_oracle_text("Whenever an opponent casts a spell, you may draw a card unless that player pays {1}.")
            .with_mana_value(3.0),
        fixtures::card("Cyclonic Rift", "Instant")
            .with_oracle_text("Return target nonland permanent you don't control to its owner's hand.")
            .with_mana_value(2.0),
        fixtures::basic_land("Island"),
    ]
}

const SOL_RING_DECK: &str = "1 Sol Ring\n1 Demonic Tutor\n1 Rhystic Study\n1 Cyclonic Rift\n96 Island\n";

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_sol_ring_deck_is_bracket_three() {
    let analyzer = DeckAnalyzer::new(resolver_with(sol_ring_pool()).await);
    let analysis = analyzer.analyze(SOL_RING_DECK, None).await.unwrap();

    assert_eq!(analysis.total_cards, 100);
    assert_eq!(analysis.game_changers, vec!["Rhystic Study", "Cyclonic Rift"]);
    assert!(analysis.bracket >= 3);
    assert!(analysis
        .reasons
        .iter()
        .any(|r| r.contains("2 Game Changer(s)")));
    assert_eq!(analysis.tutors.premium, vec!["Demonic Tutor"]);
    assert!(!analysis.warnings.iter().any(|w| w.contains("Island")));
}

#[test]
fn test_elf_intent_beats_incidental_subtypes() {
    let mut with_intent = spells(25, "Creature — Elf Warrior", "Other Elf creatures you control get +1/+1.");
    with_intent.push(fixtures::basic_land("Forest").with_quantity(40));

    let mut incidental = spells(25, "Creature — Elf Warrior", "Vigilance");
    incidental.push(fixtures::basic_land("Forest").with_quantity(40));

    let tribal = evaluate(&with_intent).synergy;
    let plain = evaluate(&incidental).synergy;

    assert_eq!(tribal.tribe.as_deref(), Some("elf"));
    assert_eq!(tribal.tribal_score, 80.0);
    assert_eq!(plain.tribal_score, 0.0);
    assert!(tribal.score > plain.score + 50.0);
}

#[test]
fn test_artist_restricted_deck_is_exhibition() {
    let rhystic = fixtures::card("Rhystic Study", "Enchantment").with_mana_value(3.0);
    let analysis = evaluate(&guay_deck(Some(rhystic)));

    assert_eq!(analysis.total_cards, 100);
    assert!(analysis.restriction.tags().contains(&"single_artist"));
    assert!((analysis.restriction.score - 32.36).abs() < 0.01);
    assert!(analysis.synergy.score < 40.0);
    assert_eq!(analysis.bracket1_likelihood.value, 80.0);

    // The Game Changer is accepted as a thematic exception.
    assert_eq!(analysis.game_changers, vec!["Rhystic Study"]);
    assert_eq!(analysis.bracket, 1);
    assert_eq!(analysis.reasons.len(), 1);
}

#[test]
fn test_mass_land_denial_vetoes_exhibition() {
    let armageddon = fixtures::card("Armageddon", "Sorcery")
        .with_oracle_text("Destroy all lands.")
        .with_mana_value(4.0);
    let analysis = evaluate(&guay_deck(Some(armageddon)));

    assert!(analysis.restriction.score > 30.0);
    assert_eq!(analysis.bracket1_likelihood.value, 0.0);
    assert_eq!(analysis.bracket, 4);
    assert!(analysis
        .reasons
        .contains(&"Contains mass land denial (requires Bracket 4+)".to_string()));
}

#[test]
fn test_zero_signal_deck_is_bracket_two() {
    let mut cards = spells(30, "Creature — Bear", "");
    cards.push(fixtures::basic_land("Forest").with_quantity(70));

    let analysis = evaluate(&cards);
    assert_eq!(analysis.tutors.total(), 0);
    assert!(analysis.power_cards.fast_mana.is_empty());
    assert!(analysis.game_changers.is_empty());
    assert!(analysis.restriction.detections.is_empty());
    assert_eq!(analysis.bracket, 2);
    assert_eq!(analysis.reasons.last().map(String::as_str), Some(DEFAULT_REASON));
}

#[tokio::test]
async fn test_ruthless_combo_from_database() {
    let combos = Arc::new(MockComboDatabase::new());
    combos
        .set_combos(DeckCombos {
            confirmed: vec![ComboResult::new(
                "1414-2730",
                &["Thassa's Oracle", "Demonic Consultation"],
                &["Win the game"],
            )
            .with_tier(ComboTier::Ruthless)],
            near_miss: Vec::new(),
        })
        .await;

    let analyzer = DeckAnalyzer::new(resolver_with(sol_ring_pool()).await)
        .with_combo_database(combos);
    let analysis = analyzer.analyze(SOL_RING_DECK, None).await.unwrap();

    assert_eq!(analysis.bracket, 4);
    assert!(analysis.reasons[0].starts_with("Has 1 Ruthless-tier combo(s)"));
    assert_eq!(analysis.cedh.breakdown.get("combos"), Some(&2));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_quantity_counter() {
    let rats = fixtures::card("Relentless Rats", "Creature — Rat").with_quantity(30);
    assert_eq!(total_quantity([&rats]), 30);

    let mut cards = vec![rats];
    cards.push(fixtures::basic_land("Swamp").with_quantity(69));
    cards.push(fixtures::card("Sol Ring", "Artifact").with_quantity(2));

    let analysis = evaluate(&cards);
    assert_eq!(analysis.total_cards, 101);
    assert_eq!(analysis.categories.count(Category::Creature), 30);
    assert!(analysis.warnings.iter().any(|w| w.starts_with("Sol Ring x2")));
    assert!(!analysis.warnings.iter().any(|w| w.contains("Relentless Rats")));
    assert!(analysis.warnings.iter().any(|w| w.starts_with("Deck has 101 cards")));
}

#[test]
fn test_analysis_is_idempotent() {
    let cards = guay_deck(None);
    let first = evaluate(&cards);
    let second = evaluate(&cards);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_analyzer_is_idempotent() {
    let analyzer = DeckAnalyzer::new(resolver_with(sol_ring_pool()).await);
    let first = analyzer.analyze(SOL_RING_DECK, None).await.unwrap();
    let second = analyzer.analyze(SOL_RING_DECK, None).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tutor_weights_strictly_decrease() {
    let policy = ScoringPolicy::default();
    assert!(policy.tutor_premium_weight > policy.tutor_efficient_weight);
    assert!(policy.tutor_efficient_weight > policy.tutor_standard_weight);
    assert!(policy.tutor_standard_weight > policy.tutor_slow_weight);

    let flat = ScoringPolicy {
        tutor_efficient_weight: 3.0,
        ..ScoringPolicy::default()
    };
    assert!(flat.validate().is_err());
}

#[test]
fn test_artifact_creature_is_a_creature() {
    let construct = fixtures::card("Solemn Simulacrum", "Artifact Creature — Golem");
    assert_eq!(category_of(&construct), Category::Creature);
    let construct = fixtures::card("Steel Overseer", "Artifact Creature — Construct");
    assert_eq!(category_of(&construct), Category::Creature);
}

#[test]
fn test_extra_signals_never_lower_the_bracket() {
    let policy = ScoringPolicy::default();
    let bases = [
        BracketInputs::default(),
        BracketInputs {
            game_changers: 2,
            ..Default::default()
        },
        BracketInputs {
            cedh_total: 13,
            ..Default::default()
        },
        BracketInputs {
            extra_turns: 3,
            tutor_score: 7.0,
            ..Default::default()
        },
    ];
    let signals: [fn(&mut BracketInputs); 9] = [
        |i| i.confirmed_combos += 2,
        |i| i.top_tier_combos += 1,
        |i| i.game_changers += 4,
        |i| i.mass_land_denial += 1,
        |i| i.extra_turns += 1,
        |i| i.tutor_score += 6.0,
        |i| i.fast_mana += 2,
        |i| i.staples += 5,
        |i| i.combo_archetype = true,
    ];

    for base in bases {
        let before = decide_bracket(&base, &policy).bracket;
        for add in signals {
            let mut raised = base;
            add(&mut raised);
            let after = decide_bracket(&raised, &policy).bracket;
            assert!(after >= before, "{:?} lowered {} to {}", raised, before, after);
        }
    }
}
