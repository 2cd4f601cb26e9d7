//! Personal statistics
//!
//! Reduces a metric history to per-metric mean and sample standard deviation
//! plus a descriptive sleep-pattern label.

use crate::error::AnalysisError;
use crate::types::{MetricEntry, PersonalStats, SleepPattern};

/// Computer for personal baseline statistics
pub struct PersonalStatsComputer;

impl PersonalStatsComputer {
    /// Compute statistics over the full history.
    ///
    /// An empty history yields all zeros and [`SleepPattern::NoData`].
    pub fn compute(metrics: &[MetricEntry]) -> Result<PersonalStats, AnalysisError> {
        if metrics.is_empty() {
            return Ok(PersonalStats::empty());
        }

        let sleep: Vec<f64> = metrics.iter().map(|m| m.sleep_duration).collect();
        let screen: Vec<f64> = metrics.iter().map(|m| m.screen_time).collect();
        let activity: Vec<f64> = metrics.iter().map(|m| m.activity_minutes as f64).collect();

        let stats = PersonalStats {
            avg_sleep: mean(&sleep),
            std_sleep: sample_std(&sleep),
            avg_screen: mean(&screen),
            std_screen: sample_std(&screen),
            avg_activity: mean(&activity),
            std_activity: sample_std(&activity),
            sleep_pattern: SleepPattern::from_average(mean(&sleep)),
        };

        let values = [
            stats.avg_sleep,
            stats.std_sleep,
            stats.avg_screen,
            stats.std_screen,
            stats.avg_activity,
            stats.std_activity,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::Computation(format!(
                "non-finite statistics over {} entries",
                metrics.len()
            )));
        }

        Ok(stats)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased (n-1) standard deviation; 0.0 for fewer than two values
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
