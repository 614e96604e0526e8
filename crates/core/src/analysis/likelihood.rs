//! Bracket 1 (exhibition) likelihood.

use super::policy::ScoringPolicy;
use super::types::Bracket1Likelihood;

/// Restriction score worth the larger base contribution.
const STRONG_RESTRICTION: f64 = 50.0;
/// Restriction score that, with low synergy, reads as intent.
const SOME_RESTRICTION: f64 = 15.0;
/// Below this restriction score, Game Changers count against exhibition.
const THEMATIC_POWER_FLOOR: f64 = 25.0;

const MLD_VETO: &str = "Has Mass Land Denial - cannot be Bracket 1 (no thematic exceptions)";

/// Signals the estimator combines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikelihoodInputs {
    pub restriction_score: f64,
    pub synergy_score: f64,
    pub game_changers: usize,
    pub mass_land_denial: usize,
    pub fast_mana: usize,
    pub tutors: usize,
}

/// Confidence (0-100) that the deck is an intentionally restricted exhibition build.
pub fn bracket1_likelihood(inputs: LikelihoodInputs, policy: &ScoringPolicy) -> Bracket1Likelihood {
    if inputs.mass_land_denial > 0 {
        return Bracket1Likelihood {
            value: 0.0,
            explanation: MLD_VETO.to_string(),
        };
    }

    let mut value = 0.0;
    let mut reasons: Vec<String> = Vec::new();
    let low_synergy = inputs.synergy_score < policy.low_synergy_threshold;

    if inputs.restriction_score >= STRONG_RESTRICTION {
        value += 60.0;
        reasons.push(format!(
            "Strong deck-building restriction ({:.0})",
            inputs.restriction_score
        ));
    } else {
        value += 40.0;
        reasons.push(format!(
            "Restriction score {:.0} (base contribution)",
            inputs.restriction_score
        ));
    }

    if low_synergy {
        value += 10.0;
        reasons.push(format!("Low mechanical synergy ({:.0})", inputs.synergy_score));
    }

    if inputs.restriction_score >= SOME_RESTRICTION && low_synergy {
        value += 20.0;
        reasons.push("Restriction with low synergy suggests a theme deck".to_string());
    }

    if inputs.fast_mana == 0 {
        value += 5.0;
        reasons.push("No fast mana".to_string());
    }

    if inputs.tutors == 0 {
        value += 5.0;
        reasons.push("No tutors".to_string());
    }

    if inputs.game_changers > 0 && inputs.restriction_score < THEMATIC_POWER_FLOOR {
        let penalty = (inputs.game_changers as f64 * 10.0).min(30.0);
        value -= penalty;
        reasons.push(format!(
            "{} Game Changer(s) without a theme (-{:.0})",
            inputs.game_changers, penalty
        ));
    }

    Bracket1Likelihood {
        value: value.clamp(0.0, 100.0),
        explanation: reasons.join("; "),
    }
}
