//! The bracket decision procedure.
//!
//! Starts from bracket 2 and walks a fixed list of steps. A step may only
//! raise the running bracket and appends its reason when it fires, so the
//! reason list reads in evaluation order.

use super::policy::ScoringPolicy;
use super::types::BracketDecision;

/// Precon-equivalent baseline.
pub const BASELINE_BRACKET: u8 = 2;

pub const DEFAULT_REASON: &str =
    "No Game Changers, combo pieces, or problematic cards found; deck appears to be at precon power level";

/// Detector outputs the procedure consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BracketInputs {
    pub bracket1_likelihood: f64,
    pub cedh_total: u32,
    pub confirmed_combos: usize,
    pub top_tier_combos: usize,
    pub game_changers: usize,
    pub mass_land_denial: usize,
    pub extra_turns: usize,
    pub tutor_score: f64,
    pub fast_mana: usize,
    pub staples: usize,
    pub combo_archetype: bool,
}

struct Running {
    bracket: u8,
    raised: bool,
    reasons: Vec<String>,
}

impl Running {
    fn raise(&mut self, floor: u8, reason: String) {
        self.bracket = self.bracket.max(floor);
        self.raised = true;
        self.reasons.push(reason);
    }

    fn note(&mut self, reason: String) {
        self.reasons.push(reason);
    }
}

/// Decide the final bracket.
pub fn decide_bracket(inputs: &BracketInputs, policy: &ScoringPolicy) -> BracketDecision {
    let mut run = Running {
        bracket: BASELINE_BRACKET,
        raised: false,
        reasons: Vec::new(),
    };

    // 1. Exhibition override. Mass land denial disables it.
    if inputs.mass_land_denial == 0 {
        let likelihood = inputs.bracket1_likelihood;
        if likelihood >= policy.bracket1_override_threshold {
            return BracketDecision {
                bracket: 1,
                reasons: vec![format!(
                    "Bracket 1 likelihood {:.0}% (>= {:.0}%): deliberate theme restrictions mark this as an exhibition deck",
                    likelihood, policy.bracket1_override_threshold
                )],
            };
        }
        if likelihood >= policy.bracket1_advisory_threshold {
            run.note(format!(
                "Bracket 1 likelihood {:.0}%: possible theme deck, below the {:.0}% needed to override",
                likelihood, policy.bracket1_override_threshold
            ));
        }
    }

    // 2. cEDH
    if inputs.cedh_total >= policy.cedh_signal_threshold {
        run.raise(
            5,
            format!(
                "cEDH signals total {} (>= {} indicates competitive optimization)",
                inputs.cedh_total, policy.cedh_signal_threshold
            ),
        );
    }

    // 3. Combos
    if inputs.top_tier_combos > 0 {
        run.raise(
            4,
            format!(
                "Has {} Ruthless-tier combo(s) (requires Bracket 4+)",
                inputs.top_tier_combos
            ),
        );
    } else if inputs.confirmed_combos >= 2 {
        run.raise(
            3,
            format!(
                "Has {} confirmed combos (multiple combos require Bracket 3+)",
                inputs.confirmed_combos
            ),
        );
    } else if inputs.confirmed_combos == 1 {
        run.note("Has 1 confirmed combo (a single combo does not set a bracket floor)".to_string());
    }

    // 4. Game Changers
    if inputs.game_changers > 3 {
        run.raise(
            4,
            format!(
                "Has {} Game Changers (>3 requires Bracket 4+)",
                inputs.game_changers
            ),
        );
    } else if inputs.game_changers > 0 {
        run.raise(
            3,
            format!(
                "Has {} Game Changer(s) (requires Bracket 3+)",
                inputs.game_changers
            ),
        );
    }

    // 5. Mass land denial
    if inputs.mass_land_denial > 0 {
        run.raise(4, "Contains mass land denial (requires Bracket 4+)".to_string());
    }

    // 6. Extra turns
    if inputs.extra_turns >= 3 {
        run.raise(
            4,
            format!(
                "Has {} extra turn cards (high density requires Bracket 4+)",
                inputs.extra_turns
            ),
        );
    } else if inputs.extra_turns > 0 {
        run.raise(
            3,
            format!("Has {} extra turn card(s)", inputs.extra_turns),
        );
    }

    // 7. Tutors
    if inputs.tutor_score >= policy.tutor_high_threshold {
        run.raise(
            4,
            format!(
                "Tutor score {:.1} (>= {:.0} requires Bracket 4+)",
                inputs.tutor_score, policy.tutor_high_threshold
            ),
        );
    } else if inputs.tutor_score >= policy.tutor_low_threshold {
        run.raise(
            3,
            format!(
                "Tutor score {:.1} (>= {:.0} requires Bracket 3+)",
                inputs.tutor_score, policy.tutor_low_threshold
            ),
        );
    }

    // 8. Fast mana
    if inputs.fast_mana >= policy.fast_mana_high_threshold as usize {
        run.raise(
            4,
            format!("Has {} fast mana sources (requires Bracket 4+)", inputs.fast_mana),
        );
    } else if inputs.fast_mana >= policy.fast_mana_low_threshold as usize {
        run.raise(
            3,
            format!("Has {} fast mana sources (requires Bracket 3+)", inputs.fast_mana),
        );
    }

    // 9. High-power staples
    if inputs.staples >= policy.staples_high_threshold as usize {
        run.raise(
            4,
            format!("Has {} high-power staples (requires Bracket 4+)", inputs.staples),
        );
    } else if inputs.staples >= policy.staples_low_threshold as usize {
        run.raise(
            3,
            format!("Has {} high-power staples (requires Bracket 3+)", inputs.staples),
        );
    }

    // 10. Keyword-detected combo archetype
    if inputs.combo_archetype && run.bracket < 3 {
        run.raise(3, "Combo-oriented archetype detected (requires Bracket 3+)".to_string());
    }

    if !run.raised {
        run.note(DEFAULT_REASON.to_string());
    }

    BracketDecision {
        bracket: run.bracket,
        reasons: run.reasons,
    }
}
