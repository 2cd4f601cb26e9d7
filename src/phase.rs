//! Phase classification and confidence scoring
//!
//! Both are pure functions of the number of distinct days with data and share
//! the same 30-day scale: confidence reaches 1.0 exactly where the Warm-up →
//! Personalized boundary sits.

use crate::types::Phase;

/// Days of data at which Warm-up begins
pub const WARM_UP_DAYS: usize = 7;

/// Days of data at which Personalized begins and confidence saturates
pub const PERSONALIZED_DAYS: usize = 30;

impl Phase {
    /// Classify data maturity from a distinct-day count
    pub fn from_day_count(days_of_data: usize) -> Self {
        if days_of_data < WARM_UP_DAYS {
            Phase::ColdStart
        } else if days_of_data < PERSONALIZED_DAYS {
            Phase::WarmUp
        } else {
            Phase::Personalized
        }
    }
}

/// Linear confidence ramp, `min(days / 30, 1.0)`
pub fn compute_confidence(days_of_data: usize) -> f64 {
    (days_of_data as f64 / PERSONALIZED_DAYS as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_detect_phase_cold_start() {
        assert_eq!(Phase::from_day_count(0), Phase::ColdStart);
        assert_eq!(Phase::from_day_count(1), Phase::ColdStart);
        assert_eq!(Phase::from_day_count(6), Phase::ColdStart);
    }

    #[test]
    fn test_detect_phase_warm_up() {
        assert_eq!(Phase::from_day_count(7), Phase::WarmUp);
        assert_eq!(Phase::from_day_count(15), Phase::WarmUp);
        assert_eq!(Phase::from_day_count(29), Phase::WarmUp);
    }

    #[test]
    fn test_detect_phase_personalized() {
        assert_eq!(Phase::from_day_count(30), Phase::Personalized);
        assert_eq!(Phase::from_day_count(45), Phase::Personalized);
        assert_eq!(Phase::from_day_count(100), Phase::Personalized);
    }

    #[test]
    fn test_compute_confidence() {
        assert_eq!(compute_confidence(0), 0.0);
        assert_eq!(compute_confidence(15), 0.5);
        assert_eq!(compute_confidence(30), 1.0);
        assert_eq!(compute_confidence(45), 1.0);
        assert!((compute_confidence(1) - 1.0 / 30.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_phase_bands(days in 0usize..10_000) {
            let phase = Phase::from_day_count(days);
            prop_assert_eq!(phase == Phase::ColdStart, days < 7);
            prop_assert_eq!(phase == Phase::WarmUp, (7..30).contains(&days));
            prop_assert_eq!(phase == Phase::Personalized, days >= 30);
        }

        #[test]
        fn prop_confidence_formula(days in 0usize..10_000) {
            let expected = (days as f64 / 30.0).min(1.0);
            prop_assert_eq!(compute_confidence(days), expected);
            prop_assert!((0.0..=1.0).contains(&compute_confidence(days)));
        }

        #[test]
        fn prop_confidence_monotonic(days in 0usize..10_000) {
            prop_assert!(compute_confidence(days + 1) >= compute_confidence(days));
        }
    }
}
