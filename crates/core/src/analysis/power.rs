//! Power-card membership and the competitive (cEDH) signal scorer.

use std::collections::BTreeMap;

use tracing::debug;

use super::policy::ScoringPolicy;
use super::types::{CedhSignals, ManaCurve, PowerCards, TutorReport};
use crate::card::Card;
use crate::combos::DeckCombos;
use crate::reference::{CommanderTier, ReferenceLists};

/// Cards on the fast mana, free interaction, staple and stax lists.
pub fn power_cards(cards: &[Card], lists: &ReferenceLists) -> PowerCards {
    PowerCards {
        fast_mana: lists.fast_mana.members_of(cards),
        free_interaction: lists.free_interaction.members_of(cards),
        staples: lists.high_power_staples.members_of(cards),
        stax: lists.competitive_stax.members_of(cards),
    }
}

/// Everything the cEDH scorer looks at.
#[derive(Debug, Clone, Copy)]
pub struct CedhInputs<'a> {
    pub commander: Option<&'a str>,
    pub power: &'a PowerCards,
    pub mana_curve: &'a ManaCurve,
    pub effective_land_count: u32,
    pub combos: &'a DeckCombos,
    pub tutors: &'a TutorReport,
}

/// Sum the competitive-optimization signals.
///
/// Every contribution is non-negative; the breakdown only lists signals that fired.
pub fn cedh_signals(inputs: CedhInputs<'_>, lists: &ReferenceLists, policy: &ScoringPolicy) -> CedhSignals {
    let mut breakdown = BTreeMap::new();
    let mut add = |signal: &str, points: u32| {
        if points > 0 {
            breakdown.insert(signal.to_string(), points);
        }
    };

    let commander_tier = inputs.commander.and_then(|c| lists.commander_tier(c));
    add(
        "commander",
        match commander_tier {
            Some(CommanderTier::Tier1) => 4,
            Some(CommanderTier::Tier2) => 2,
            None => 0,
        },
    );

    let fast_mana = inputs.power.fast_mana.len() as u32;
    add(
        "fast_mana",
        if fast_mana >= policy.cedh_fast_mana_threshold {
            fast_mana
        } else if fast_mana >= 3 {
            fast_mana - 2
        } else {
            0
        },
    );

    let free = inputs.power.free_interaction.len() as u32;
    if free >= policy.cedh_free_interaction_threshold {
        add("free_interaction", free);
    }

    // An all-land deck has no curve to speak of.
    if !inputs.mana_curve.histogram.is_empty() {
        let average = inputs.mana_curve.average;
        add(
            "low_curve",
            if average < policy.cedh_low_curve {
                2
            } else if average < policy.cedh_mid_curve {
                1
            } else {
                0
            },
        );
    }

    if inputs.effective_land_count <= policy.cedh_max_lands {
        add("low_land_count", 1);
    }

    let top_tier = inputs.combos.top_tier_count() as u32;
    add("combos", (2 * top_tier).min(policy.cedh_combo_cap));

    let tutor_score = inputs.tutors.weighted_score;
    add(
        "tutors",
        if tutor_score >= policy.cedh_tutor_score_high {
            2
        } else if tutor_score >= policy.cedh_tutor_score_low {
            1
        } else {
            0
        },
    );

    let stax = inputs.power.stax.len() as u32;
    add(
        "stax",
        if stax >= policy.cedh_stax_high {
            2
        } else if stax >= policy.cedh_stax_low {
            1
        } else {
            0
        },
    );

    let total: u32 = breakdown.values().sum();
    let is_cedh = total >= policy.cedh_signal_threshold;
    debug!(total, is_cedh, ?breakdown, "cEDH signals");

    CedhSignals {
        total,
        breakdown,
        commander_tier,
        is_cedh,
    }
}
