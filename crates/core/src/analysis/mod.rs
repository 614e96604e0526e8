//! Deck analysis: the detectors, the bracket decision procedure and the
//! async shell that feeds them.
//!
//! [`evaluate_deck`] is pure: given resolved cards and a combo result it runs
//! every detector and the decision procedure with no I/O. [`DeckAnalyzer`]
//! wraps it with decklist parsing, card resolution and combo lookup.

pub mod archetype;
pub mod bracket;
pub mod categorize;
pub mod composition;
pub mod likelihood;
mod policy;
pub mod power;
pub mod synergy;
pub mod theme;
pub mod tutors;
mod types;

pub use bracket::{decide_bracket, BracketInputs};
pub use policy::ScoringPolicy;
pub use types::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::card::{total_quantity, Card};
use crate::combos::{ComboDatabase, DeckCombos, NoComboDatabase};
use crate::decklist::{parse_decklist, DeckEntry};
use crate::metrics;
use crate::reference::ReferenceLists;
use crate::resolver::{CardResolver, ResolverError};

use likelihood::LikelihoodInputs;
use power::CedhInputs;

/// Errors that stop an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The decklist had no card lines.
    #[error("Decklist contains no cards")]
    EmptyDecklist,

    /// Not a single name could be resolved.
    #[error("None of the {requested} requested card names could be resolved")]
    NoCardsResolved { requested: usize },

    /// The resolver itself failed.
    #[error("Card resolution failed: {0}")]
    Resolver(#[from] ResolverError),
}

/// Run every detector and the bracket procedure over resolved cards.
///
/// `unresolved` names are reported as a warning; `combos` is taken as given.
pub fn evaluate_deck(
    cards: &[Card],
    commander: Option<&str>,
    combos: DeckCombos,
    unresolved: &[String],
    lists: &ReferenceLists,
    policy: &ScoringPolicy,
) -> Result<DeckAnalysis, AnalysisError> {
    if cards.is_empty() {
        return Err(AnalysisError::NoCardsResolved {
            requested: unresolved.len(),
        });
    }

    let total_cards = total_quantity(cards);
    let commander = composition::detect_commander(cards, commander);
    let mana_curve = composition::mana_curve(cards);
    let lands = composition::land_report(cards);
    let archetypes = archetype::detect_archetypes(cards);

    let game_changers = lists.game_changers.members_of(cards);
    let mass_land_denial = lists.mass_land_denial.members_of(cards);
    let extra_turns = lists.extra_turns.members_of(cards);

    let tutors = tutors::classify_tutors(cards, lists, policy);
    let power_cards = power::power_cards(cards, lists);
    let cedh = power::cedh_signals(
        CedhInputs {
            commander: commander.as_deref(),
            power: &power_cards,
            mana_curve: &mana_curve,
            effective_land_count: lands.effective_land_count,
            combos: &combos,
            tutors: &tutors,
        },
        lists,
        policy,
    );

    let synergy = synergy::score_synergy(cards, policy);
    let restriction = theme::detect_restrictions(cards);
    let bracket1_likelihood = likelihood::bracket1_likelihood(
        LikelihoodInputs {
            restriction_score: restriction.score,
            synergy_score: synergy.score,
            game_changers: game_changers.len(),
            mass_land_denial: mass_land_denial.len(),
            fast_mana: power_cards.fast_mana.len(),
            tutors: tutors.total(),
        },
        policy,
    );

    let decision = decide_bracket(
        &BracketInputs {
            bracket1_likelihood: bracket1_likelihood.value,
            cedh_total: cedh.total,
            confirmed_combos: combos.confirmed_count(),
            top_tier_combos: combos.top_tier_count(),
            game_changers: game_changers.len(),
            mass_land_denial: mass_land_denial.len(),
            extra_turns: extra_turns.len(),
            tutor_score: tutors.weighted_score,
            fast_mana: power_cards.fast_mana.len(),
            staples: power_cards.staples.len(),
            combo_archetype: archetypes.iter().any(|a| a == archetype::COMBO_ARCHETYPE),
        },
        policy,
    );

    let mut warnings = composition::legality_warnings(cards, lists, total_cards);
    if !unresolved.is_empty() {
        warnings.push(format!(
            "Could not find {} card(s): {}",
            unresolved.len(),
            unresolved.join(", ")
        ));
    }

    debug!(
        "Evaluated {} cards: bracket {}, {} reasons",
        total_cards,
        decision.bracket,
        decision.reasons.len()
    );

    Ok(DeckAnalysis {
        commander,
        total_cards,
        categories: categorize::categorize(cards),
        archetypes,
        color_identity: composition::color_identity(cards),
        mana_curve,
        lands,
        game_changers,
        mass_land_denial,
        extra_turns,
        tutors,
        power_cards,
        cedh,
        combos,
        synergy,
        restriction,
        bracket1_likelihood,
        unresolved: unresolved.to_vec(),
        warnings,
        bracket: decision.bracket,
        reasons: decision.reasons,
    })
}

/// Turns decklist text into a [`DeckAnalysis`] using injected collaborators.
///
/// Safe to share between concurrent requests; all state is read-only.
pub struct DeckAnalyzer {
    resolver: Arc<dyn CardResolver>,
    combos: Arc<dyn ComboDatabase>,
    lists: Arc<ReferenceLists>,
    policy: ScoringPolicy,
}

impl DeckAnalyzer {
    /// Analyzer with no combo database and the embedded reference lists.
    pub fn new(resolver: Arc<dyn CardResolver>) -> Self {
        Self {
            resolver,
            combos: Arc::new(NoComboDatabase),
            lists: ReferenceLists::shared(),
            policy: ScoringPolicy::default(),
        }
    }

    pub fn with_combo_database(mut self, combos: Arc<dyn ComboDatabase>) -> Self {
        self.combos = combos;
        self
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reference_lists(mut self, lists: Arc<ReferenceLists>) -> Self {
        self.lists = lists;
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn reference_lists(&self) -> &Arc<ReferenceLists> {
        &self.lists
    }

    /// Parse, resolve and analyse a decklist.
    pub async fn analyze(
        &self,
        decklist: &str,
        commander: Option<&str>,
    ) -> Result<DeckAnalysis, AnalysisError> {
        let entries = parse_decklist(decklist);
        self.analyze_entries(&entries, commander).await
    }

    /// Resolve and analyse already-parsed entries.
    pub async fn analyze_entries(
        &self,
        entries: &[DeckEntry],
        commander: Option<&str>,
    ) -> Result<DeckAnalysis, AnalysisError> {
        let start = Instant::now();
        let result = self.run(entries, commander).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        metrics::ANALYSIS_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());
        if let Ok(analysis) = &result {
            metrics::ANALYSES_TOTAL
                .with_label_values(&[&analysis.bracket.to_string()])
                .inc();
            info!(
                "Deck analysed: {} cards, bracket {} ({}), {} reasons",
                analysis.total_cards,
                analysis.bracket,
                analysis.bracket_name(),
                analysis.reasons.len()
            );
        }
        result
    }

    async fn run(
        &self,
        entries: &[DeckEntry],
        commander: Option<&str>,
    ) -> Result<DeckAnalysis, AnalysisError> {
        if entries.is_empty() {
            return Err(AnalysisError::EmptyDecklist);
        }

        let (cards, unresolved) = self.resolve(entries).await?;
        if cards.is_empty() {
            return Err(AnalysisError::NoCardsResolved {
                requested: entries.len(),
            });
        }

        let commander_name = composition::detect_commander(&cards, commander);
        let combos = self.lookup_combos(&cards, commander_name.as_deref()).await;

        let mut analysis = evaluate_deck(
            &cards,
            commander,
            combos.result,
            &unresolved,
            &self.lists,
            &self.policy,
        )?;
        if let Some(warning) = combos.warning {
            analysis.warnings.push(warning);
        }
        Ok(analysis)
    }

    /// Resolve every entry in one bulk call; unknown names are returned, not raised.
    async fn resolve(&self, entries: &[DeckEntry]) -> Result<(Vec<Card>, Vec<String>), AnalysisError> {
        let names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();

        let timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&[self.resolver.name(), "resolve"])
            .start_timer();
        let resolution = self.resolver.resolve(&names).await;
        timer.observe_duration();

        let resolution = resolution.map_err(|e| {
            metrics::COLLABORATOR_FAILURES
                .with_label_values(&["resolver"])
                .inc();
            warn!("Card resolver '{}' failed: {}", self.resolver.name(), e);
            e
        })?;

        let mut cards: Vec<Card> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut unresolved = Vec::new();

        for entry in entries {
            match resolution.get(&entry.name) {
                // Two spellings of one card (front face and full name) merge.
                Some(card) => match positions.get(&card.key()) {
                    Some(&index) => {
                        cards[index].quantity = cards[index].quantity.saturating_add(entry.quantity)
                    }
                    None => {
                        positions.insert(card.key(), cards.len());
                        cards.push(card.clone().with_quantity(entry.quantity));
                    }
                },
                None => unresolved.push(entry.name.clone()),
            }
        }

        if !unresolved.is_empty() {
            metrics::UNRESOLVED_CARDS.inc_by(unresolved.len() as u64);
            warn!(
                "{} of {} card names could not be resolved",
                unresolved.len(),
                entries.len()
            );
        }

        Ok((cards, unresolved))
    }

    /// Combo lookup; a failing database yields no combos and a warning.
    async fn lookup_combos(&self, cards: &[Card], commander: Option<&str>) -> ComboLookup {
        let names: Vec<String> = cards.iter().map(|c| c.name.clone()).collect();

        let timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&[self.combos.name(), "find_combos"])
            .start_timer();
        let result = self.combos.find_combos(&names, commander).await;
        timer.observe_duration();

        match result {
            Ok(result) => ComboLookup {
                result,
                warning: None,
            },
            Err(e) => {
                metrics::COLLABORATOR_FAILURES
                    .with_label_values(&["combos"])
                    .inc();
                warn!("Combo database '{}' failed: {}", self.combos.name(), e);
                ComboLookup {
                    result: DeckCombos::default(),
                    warning: Some(format!(
                        "Combo lookup unavailable ({}); bracket computed without combo data",
                        self.combos.name()
                    )),
                }
            }
        }
    }
}

struct ComboLookup {
    result: DeckCombos,
    warning: Option<String>,
}
