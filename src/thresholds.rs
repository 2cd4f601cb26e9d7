//! Threshold blending
//!
//! Effective thresholds interpolate between fixed global priors and the user's
//! own statistics, weighted by confidence:
//!
//! ```text
//! effective = (1 - confidence) * prior + confidence * personal
//! ```
//!
//! `sleep_high` blends toward `avg_sleep + std_sleep` so the upper bound widens
//! with observed variability.

use crate::error::AnalysisError;
use crate::types::{EffectiveThresholds, GlobalPriors, PersonalStats};

/// Blends priors with personal statistics
#[derive(Debug, Clone, Default)]
pub struct ThresholdBlender {
    priors: GlobalPriors,
}

impl ThresholdBlender {
    pub fn new(priors: GlobalPriors) -> Self {
        Self { priors }
    }

    pub fn priors(&self) -> &GlobalPriors {
        &self.priors
    }

    /// Blend pointwise; confidence is clamped to [0, 1]
    pub fn blend(&self, stats: &PersonalStats, confidence: f64) -> EffectiveThresholds {
        let c = confidence.clamp(0.0, 1.0);
        let p = &self.priors;

        EffectiveThresholds {
            sleep_low: lerp(p.sleep_low, stats.avg_sleep, c),
            sleep_high: lerp(p.sleep_high, stats.avg_sleep + stats.std_sleep, c),
            screen_max: lerp(p.screen_max, stats.avg_screen, c),
            activity_min: lerp(p.activity_min, stats.avg_activity, c),
        }
    }
}

fn lerp(prior: f64, personal: f64, confidence: f64) -> f64 {
    (1.0 - confidence) * prior + confidence * personal
}

/// Reject priors that would make blending meaningless
pub fn validate_priors(priors: &GlobalPriors) -> Result<(), AnalysisError> {
    let fields = [
        ("sleep_low", priors.sleep_low),
        ("sleep_high", priors.sleep_high),
        ("screen_max", priors.screen_max),
        ("activity_min", priors.activity_min),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalysisError::Config(format!(
                "prior {} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    if priors.sleep_low > priors.sleep_high {
        return Err(AnalysisError::Config(format!(
            "prior sleep_low ({}) exceeds sleep_high ({})",
            priors.sleep_low, priors.sleep_high
        )));
    }
    Ok(())
}
