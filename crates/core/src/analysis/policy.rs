//! Tunable scoring policy.
//!
//! Every threshold and weight the bracket engine uses lives here so a deployment
//! can adjust them from the `[scoring]` config section.

use serde::{Deserialize, Serialize};

use crate::reference::TutorTier;

/// Weights and thresholds for the detectors and the bracket procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    // Tutor weights, strictly decreasing.
    pub tutor_premium_weight: f64,
    pub tutor_efficient_weight: f64,
    pub tutor_standard_weight: f64,
    pub tutor_slow_weight: f64,

    /// Weighted tutor score raising the deck to bracket 3.
    pub tutor_low_threshold: f64,
    /// Weighted tutor score raising the deck to bracket 4.
    pub tutor_high_threshold: f64,

    pub fast_mana_low_threshold: u32,
    pub fast_mana_high_threshold: u32,
    pub staples_low_threshold: u32,
    pub staples_high_threshold: u32,

    // cEDH signals
    pub cedh_signal_threshold: u32,
    pub cedh_fast_mana_threshold: u32,
    pub cedh_free_interaction_threshold: u32,
    pub cedh_low_curve: f64,
    pub cedh_mid_curve: f64,
    pub cedh_max_lands: u32,
    pub cedh_tutor_score_high: f64,
    pub cedh_tutor_score_low: f64,
    pub cedh_stax_high: u32,
    pub cedh_stax_low: u32,
    pub cedh_combo_cap: u32,

    // Exhibition (bracket 1)
    pub bracket1_override_threshold: f64,
    pub bracket1_advisory_threshold: f64,
    pub low_synergy_threshold: f64,

    /// Creatures needed before tribal density is scored.
    pub tribal_min_creatures: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            tutor_premium_weight: 3.0,
            tutor_efficient_weight: 2.0,
            tutor_standard_weight: 1.0,
            tutor_slow_weight: 0.5,
            tutor_low_threshold: 6.0,
            tutor_high_threshold: 12.0,
            fast_mana_low_threshold: 2,
            fast_mana_high_threshold: 4,
            staples_low_threshold: 5,
            staples_high_threshold: 10,
            cedh_signal_threshold: 12,
            cedh_fast_mana_threshold: 6,
            cedh_free_interaction_threshold: 3,
            cedh_low_curve: 2.0,
            cedh_mid_curve: 2.5,
            cedh_max_lands: 31,
            cedh_tutor_score_high: 15.0,
            cedh_tutor_score_low: 10.0,
            cedh_stax_high: 5,
            cedh_stax_low: 3,
            cedh_combo_cap: 4,
            bracket1_override_threshold: 70.0,
            bracket1_advisory_threshold: 50.0,
            low_synergy_threshold: 40.0,
            tribal_min_creatures: 10,
        }
    }
}

impl ScoringPolicy {
    pub fn tutor_weight(&self, tier: TutorTier) -> f64 {
        match tier {
            TutorTier::Premium => self.tutor_premium_weight,
            TutorTier::Efficient => self.tutor_efficient_weight,
            TutorTier::Standard => self.tutor_standard_weight,
            TutorTier::Slow => self.tutor_slow_weight,
        }
    }

    /// Validate the policy.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            self.tutor_premium_weight,
            self.tutor_efficient_weight,
            self.tutor_standard_weight,
            self.tutor_slow_weight,
        ];
        if weights.iter().any(|w| *w <= 0.0) {
            return Err("tutor weights must be positive".to_string());
        }
        if !weights.windows(2).all(|w| w[0] > w[1]) {
            return Err(format!(
                "tutor weights must be strictly decreasing premium > efficient > standard > slow, got {:?}",
                weights
            ));
        }

        check_pair("tutor", self.tutor_low_threshold, self.tutor_high_threshold)?;
        check_pair(
            "fast_mana",
            self.fast_mana_low_threshold as f64,
            self.fast_mana_high_threshold as f64,
        )?;
        check_pair(
            "staples",
            self.staples_low_threshold as f64,
            self.staples_high_threshold as f64,
        )?;
        check_pair("cedh_curve", self.cedh_low_curve, self.cedh_mid_curve)?;
        check_pair(
            "cedh_tutor_score",
            self.cedh_tutor_score_low,
            self.cedh_tutor_score_high,
        )?;
        check_pair(
            "cedh_stax",
            self.cedh_stax_low as f64,
            self.cedh_stax_high as f64,
        )?;
        check_pair(
            "bracket1",
            self.bracket1_advisory_threshold,
            self.bracket1_override_threshold,
        )?;

        if self.cedh_signal_threshold == 0 {
            return Err("cedh_signal_threshold cannot be 0".to_string());
        }
        if !(0.0..=100.0).contains(&self.bracket1_override_threshold) {
            return Err(format!(
                "bracket1_override_threshold must be between 0 and 100, got {}",
                self.bracket1_override_threshold
            ));
        }

        Ok(())
    }
}

fn check_pair(name: &str, low: f64, high: f64) -> Result<(), String> {
    if low > high {
        return Err(format!(
            "{} low threshold ({}) exceeds high threshold ({})",
            name, low, high
        ));
    }
    Ok(())
}
