//! Suggestion generation
//!
//! Suggestions are produced by an ordered list of independent rules evaluated
//! against the latest entry. Each rule contributes at most one message, and the
//! output order always follows rule order:
//!
//! 1. low sleep
//! 2. high sleep (only when low sleep did not fire)
//! 3. high screen time
//! 4. low activity
//! 5. day of week (weekend variation or Monday)
//! 6. phase context

use crate::history::{is_weekend, latest_entry, weekend_weekday_sleep};
use crate::types::{EffectiveThresholds, MetricEntry, PersonalStats, Phase};
use chrono::{Datelike, Weekday};
use tracing::debug;

/// Sole suggestion for an empty history
pub const NO_METRICS_MESSAGE: &str = "No metrics available for analysis.";

pub const WEEKEND_VARIATION_MESSAGE: &str = "Your sleep schedule shows significant weekend variation. \
     Try to maintain a more consistent sleep pattern.";

pub const MONDAY_MESSAGE: &str = "It's Monday! A great day to start with some physical activity.";

pub const COLD_START_MESSAGE: &str =
    "Keep tracking your daily metrics to receive more personalized insights.";

pub const WARM_UP_MESSAGE: &str =
    "Your patterns are becoming clearer. Continue logging for better recommendations.";

/// Weekend sleep must exceed weekday sleep by more than this many hours
pub const WEEKEND_VARIATION_HOURS: f64 = 1.5;

/// Inputs available to every rule
pub struct RuleContext<'a> {
    pub history: &'a [MetricEntry],
    pub latest: &'a MetricEntry,
    pub stats: &'a PersonalStats,
    pub thresholds: &'a EffectiveThresholds,
    pub phase: Phase,
}

/// A predicate → message rule
pub trait SuggestionRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Message to append, or `None` if the rule does not fire
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String>;
}

pub struct LowSleepRule;

impl SuggestionRule for LowSleepRule {
    fn name(&self) -> &'static str {
        "low_sleep"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let sleep = ctx.latest.sleep_duration;
        if sleep >= ctx.thresholds.sleep_low {
            return None;
        }
        let basis = if ctx.phase.has_personal_data() {
            "typical"
        } else {
            "recommended"
        };
        Some(format!(
            "You slept {:.1} hours, which is less than your {} minimum of {:.1} hours. \
             Consider resting more today.",
            sleep, basis, ctx.thresholds.sleep_low
        ))
    }
}

/// Mutually exclusive with [`LowSleepRule`]
pub struct HighSleepRule;

impl SuggestionRule for HighSleepRule {
    fn name(&self) -> &'static str {
        "high_sleep"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let sleep = ctx.latest.sleep_duration;
        if sleep < ctx.thresholds.sleep_low || sleep <= ctx.thresholds.sleep_high {
            return None;
        }
        Some(format!(
            "You slept {:.1} hours, which is more than usual. \
             Ensure you're maintaining a consistent sleep schedule.",
            sleep
        ))
    }
}

pub struct ScreenTimeRule;

impl SuggestionRule for ScreenTimeRule {
    fn name(&self) -> &'static str {
        "screen_time"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let screen = ctx.latest.screen_time;
        if screen <= ctx.thresholds.screen_max {
            return None;
        }
        let basis = if ctx.phase.has_personal_data() {
            "average"
        } else {
            "recommended"
        };
        Some(format!(
            "Your screen time of {:.1} hours exceeds the {} limit of {:.1} hours. \
             Consider taking breaks to reduce eye strain.",
            screen, basis, ctx.thresholds.screen_max
        ))
    }
}

pub struct ActivityRule;

impl SuggestionRule for ActivityRule {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let minutes = ctx.latest.activity_minutes;
        if minutes as f64 >= ctx.thresholds.activity_min {
            return None;
        }
        let basis = if ctx.phase.has_personal_data() {
            "your average"
        } else {
            "the recommended"
        };
        Some(format!(
            "Your activity of {} minutes is below {} {:.0} minutes. \
             Try increasing your activity today with a short walk or stretch.",
            minutes, basis, ctx.thresholds.activity_min
        ))
    }
}

/// Weekend sleep variation on Saturday/Sunday, motivation on Monday
pub struct DayOfWeekRule {
    pub variation_hours: f64,
}

impl Default for DayOfWeekRule {
    fn default() -> Self {
        Self {
            variation_hours: WEEKEND_VARIATION_HOURS,
        }
    }
}

impl SuggestionRule for DayOfWeekRule {
    fn name(&self) -> &'static str {
        "day_of_week"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        let date = ctx.latest.date;

        if is_weekend(date) {
            // Both sides need data; otherwise the comparison is undefined
            return match weekend_weekday_sleep(ctx.history) {
                (Some(weekend), Some(weekday)) if weekend - weekday > self.variation_hours => {
                    Some(WEEKEND_VARIATION_MESSAGE.to_string())
                }
                _ => None,
            };
        }

        if date.weekday() == Weekday::Mon {
            return Some(MONDAY_MESSAGE.to_string());
        }

        None
    }
}

pub struct PhaseContextRule;

impl SuggestionRule for PhaseContextRule {
    fn name(&self) -> &'static str {
        "phase_context"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        match ctx.phase {
            Phase::ColdStart => Some(COLD_START_MESSAGE.to_string()),
            Phase::WarmUp => Some(WARM_UP_MESSAGE.to_string()),
            Phase::Personalized => None,
        }
    }
}

/// Evaluates rules in order against the latest entry
pub struct SuggestionGenerator {
    rules: Vec<Box<dyn SuggestionRule>>,
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionGenerator {
    /// Generator with the standard six rules
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(LowSleepRule),
            Box::new(HighSleepRule),
            Box::new(ScreenTimeRule),
            Box::new(ActivityRule),
            Box::new(DayOfWeekRule::default()),
            Box::new(PhaseContextRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn SuggestionRule>>) -> Self {
        Self { rules }
    }

    /// Append a rule after the existing ones
    pub fn push_rule(&mut self, rule: Box<dyn SuggestionRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn generate(
        &self,
        history: &[MetricEntry],
        stats: &PersonalStats,
        thresholds: &EffectiveThresholds,
        phase: Phase,
    ) -> Vec<String> {
        let Some(latest) = latest_entry(history) else {
            return vec![NO_METRICS_MESSAGE.to_string()];
        };

        let ctx = RuleContext {
            history,
            latest,
            stats,
            thresholds,
            phase,
        };

        self.rules
            .iter()
            .filter_map(|rule| {
                let message = rule.evaluate(&ctx);
                if message.is_some() {
                    debug!(rule = rule.name(), date = %latest.date, "suggestion rule fired");
                }
                message
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SleepPattern;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn entry(y: i32, m: u32, d: u32, sleep: f64, screen: f64, activity: u32) -> MetricEntry {
        MetricEntry::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), sleep, screen, activity)
    }

    fn thresholds(sleep_low: f64, sleep_high: f64, screen_max: f64, activity_min: f64) -> EffectiveThresholds {
        EffectiveThresholds {
            sleep_low,
            sleep_high,
            screen_max,
            activity_min,
        }
    }

    fn stats() -> PersonalStats {
        PersonalStats {
            avg_sleep: 7.0,
            std_sleep: 0.5,
            avg_screen: 5.0,
            std_screen: 1.0,
            avg_activity: 30.0,
            std_activity: 5.0,
            sleep_pattern: SleepPattern::Moderate,
        }
    }

    #[test]
    fn test_empty_history_single_message() {
        let suggestions = SuggestionGenerator::new().generate(
            &[],
            &stats(),
            &thresholds(7.0, 9.0, 8.0, 30.0),
            Phase::ColdStart,
        );
        assert_eq!(suggestions, vec![NO_METRICS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_low_sleep_excludes_high_sleep() {
        // 2024-01-02 is a Tuesday
        let history = vec![entry(2024, 1, 2, 5.0, 5.0, 30)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(6.0, 8.0, 8.0, 30.0),
            Phase::WarmUp,
        );

        assert_eq!(
            suggestions,
            vec![
                "You slept 5.0 hours, which is less than your typical minimum of 6.0 hours. \
                 Consider resting more today."
                    .to_string(),
                WARM_UP_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_low_sleep_rule_fires_even_with_inverted_thresholds() {
        // sleep_high below sleep_low: only the low-sleep message may appear
        let history = vec![entry(2024, 1, 2, 5.0, 5.0, 30)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(6.0, 4.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("less than your typical minimum"));
    }

    #[test]
    fn test_high_sleep_message() {
        let history = vec![entry(2024, 1, 3, 9.5, 5.0, 30)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(7.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert_eq!(
            suggestions,
            vec!["You slept 9.5 hours, which is more than usual. \
                  Ensure you're maintaining a consistent sleep schedule."
                .to_string()]
        );
    }

    #[test]
    fn test_cold_start_wording_and_monday_order() {
        // 2024-01-08 is a Monday
        let history = vec![entry(2024, 1, 8, 5.0, 10.0, 10)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(7.0, 9.0, 8.0, 30.0),
            Phase::ColdStart,
        );

        assert_eq!(
            suggestions,
            vec![
                "You slept 5.0 hours, which is less than your recommended minimum of 7.0 hours. \
                 Consider resting more today."
                    .to_string(),
                "Your screen time of 10.0 hours exceeds the recommended limit of 8.0 hours. \
                 Consider taking breaks to reduce eye strain."
                    .to_string(),
                "Your activity of 10 minutes is below the recommended 30 minutes. \
                 Try increasing your activity today with a short walk or stretch."
                    .to_string(),
                MONDAY_MESSAGE.to_string(),
                COLD_START_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_personal_wording() {
        let history = vec![entry(2024, 1, 3, 7.5, 9.3, 20)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(7.0, 9.0, 6.4, 42.6),
            Phase::Personalized,
        );

        assert_eq!(
            suggestions,
            vec![
                "Your screen time of 9.3 hours exceeds the average limit of 6.4 hours. \
                 Consider taking breaks to reduce eye strain."
                    .to_string(),
                "Your activity of 20 minutes is below your average 43 minutes. \
                 Try increasing your activity today with a short walk or stretch."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_weekend_variation() {
        let history = vec![
            entry(2024, 1, 3, 6.0, 5.0, 30),  // Wed
            entry(2024, 1, 4, 6.0, 5.0, 30),  // Thu
            entry(2024, 1, 5, 6.0, 5.0, 30),  // Fri
            entry(2024, 1, 6, 8.0, 5.0, 30),  // Sat
        ];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(5.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert_eq!(suggestions, vec![WEEKEND_VARIATION_MESSAGE.to_string()]);
    }

    #[test]
    fn test_weekend_variation_on_sunday() {
        let history = vec![
            entry(2024, 1, 4, 6.5, 5.0, 30),  // Thu
            entry(2024, 1, 5, 6.5, 5.0, 30),  // Fri
            entry(2024, 1, 6, 8.5, 5.0, 30),  // Sat
            entry(2024, 1, 7, 8.5, 5.0, 30),  // Sun
        ];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(5.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert_eq!(suggestions, vec![WEEKEND_VARIATION_MESSAGE.to_string()]);
    }

    #[test]
    fn test_weekend_variation_must_exceed_margin() {
        let history = vec![
            entry(2024, 1, 5, 6.0, 5.0, 30), // Fri
            entry(2024, 1, 6, 7.5, 5.0, 30), // Sat, exactly 1.5 more
        ];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(5.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_weekend_without_weekday_data() {
        let history = vec![entry(2024, 1, 6, 8.0, 5.0, 30), entry(2024, 1, 7, 8.5, 5.0, 30)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(5.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_latest_entry_decides_day_of_week() {
        // Monday listed first, but Tuesday is the latest date
        let history = vec![entry(2024, 1, 9, 7.5, 5.0, 30), entry(2024, 1, 8, 7.5, 5.0, 30)];
        let suggestions = SuggestionGenerator::new().generate(
            &history,
            &stats(),
            &thresholds(7.0, 9.0, 8.0, 30.0),
            Phase::Personalized,
        );
        assert!(suggestions.is_empty());
    }

    struct HydrationRule;

    impl SuggestionRule for HydrationRule {
        fn name(&self) -> &'static str {
            "hydration"
        }

        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Option<String> {
            Some("Drink water.".to_string())
        }
    }

    #[test]
    fn test_pushed_rule_runs_last() {
        let mut generator = SuggestionGenerator::new();
        generator.push_rule(Box::new(HydrationRule));

        assert_eq!(
            generator.rule_names(),
            vec![
                "low_sleep",
                "high_sleep",
                "screen_time",
                "activity",
                "day_of_week",
                "phase_context",
                "hydration"
            ]
        );

        let history = vec![entry(2024, 1, 8, 7.5, 5.0, 30)];
        let suggestions = generator.generate(
            &history,
            &stats(),
            &thresholds(7.0, 9.0, 8.0, 30.0),
            Phase::WarmUp,
        );
        assert_eq!(
            suggestions,
            vec![
                MONDAY_MESSAGE.to_string(),
                WARM_UP_MESSAGE.to_string(),
                "Drink water.".to_string(),
            ]
        );
    }
}
