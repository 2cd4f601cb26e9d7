//! Core data types
//!
//! These types flow through the analysis pipeline:
//! metric history → day count → phase/confidence → personal stats →
//! effective thresholds → suggestions → analysis result.
//!
//! Every derived type is recomputed per request and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One calendar day's observation, after boundary validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Hours of sleep (0-24)
    pub sleep_duration: f64,
    /// Hours of screen time (0-24)
    pub screen_time: f64,
    /// Minutes of physical activity (0-1440)
    pub activity_minutes: u32,
}

impl MetricEntry {
    pub fn new(date: NaiveDate, sleep_duration: f64, screen_time: f64, activity_minutes: u32) -> Self {
        Self {
            date,
            sleep_duration,
            screen_time,
            activity_minutes,
        }
    }
}

/// Data maturity phase.
///
/// Serialized as its integer code (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    /// Fewer than 7 days of data; global priors dominate
    ColdStart,
    /// 7-29 days of data; priors and personal pattern are blended
    WarmUp,
    /// 30+ days of data; personal pattern only
    Personalized,
}

impl Phase {
    pub fn code(self) -> u8 {
        match self {
            Phase::ColdStart => 0,
            Phase::WarmUp => 1,
            Phase::Personalized => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::ColdStart => "cold_start",
            Phase::WarmUp => "warm_up",
            Phase::Personalized => "personalized",
        }
    }

    /// Whether personal data has started to shape thresholds
    pub fn has_personal_data(self) -> bool {
        self >= Phase::WarmUp
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.code()
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Phase::ColdStart),
            1 => Ok(Phase::WarmUp),
            2 => Ok(Phase::Personalized),
            other => Err(format!("Invalid phase code: {}", other)),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive label for the average sleep duration.
///
/// Metadata only; it never feeds threshold blending or suggestion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepPattern {
    NoData,
    ConsistentGood,
    Moderate,
    BelowAverage,
    Insufficient,
}

impl SleepPattern {
    /// Label bands are inclusive on their lower bound, evaluated top-down.
    pub fn from_average(avg_sleep: f64) -> Self {
        if avg_sleep >= 7.5 {
            SleepPattern::ConsistentGood
        } else if avg_sleep >= 6.5 {
            SleepPattern::Moderate
        } else if avg_sleep >= 5.5 {
            SleepPattern::BelowAverage
        } else {
            SleepPattern::Insufficient
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SleepPattern::NoData => "No data available",
            SleepPattern::ConsistentGood => "Consistent good sleep (7.5+ hours)",
            SleepPattern::Moderate => "Moderate sleep (6.5-7.5 hours)",
            SleepPattern::BelowAverage => "Below average sleep (5.5-6.5 hours)",
            SleepPattern::Insufficient => "Insufficient sleep (< 5.5 hours)",
        }
    }
}

impl fmt::Display for SleepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Personal baseline statistics computed from a metric history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalStats {
    pub avg_sleep: f64,
    /// Sample standard deviation (n-1); 0.0 when fewer than two entries
    pub std_sleep: f64,
    pub avg_screen: f64,
    pub std_screen: f64,
    pub avg_activity: f64,
    pub std_activity: f64,
    pub sleep_pattern: SleepPattern,
}

impl PersonalStats {
    /// Statistics for an empty history
    pub fn empty() -> Self {
        Self {
            avg_sleep: 0.0,
            std_sleep: 0.0,
            avg_screen: 0.0,
            std_screen: 0.0,
            avg_activity: 0.0,
            std_activity: 0.0,
            sleep_pattern: SleepPattern::NoData,
        }
    }

    /// Rounded summary exposed in the analysis result
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            avg_sleep: round2(self.avg_sleep),
            avg_screen: round2(self.avg_screen),
            avg_activity: round2(self.avg_activity),
        }
    }
}

/// Population-level default thresholds used when personal data is scarce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalPriors {
    pub sleep_low: f64,
    pub sleep_high: f64,
    pub screen_max: f64,
    pub activity_min: f64,
}

pub const GLOBAL_SLEEP_LOW: f64 = 7.0;
pub const GLOBAL_SLEEP_HIGH: f64 = 9.0;
pub const GLOBAL_SCREEN_MAX: f64 = 8.0;
pub const GLOBAL_ACTIVITY_MIN: f64 = 30.0;

impl Default for GlobalPriors {
    fn default() -> Self {
        Self {
            sleep_low: GLOBAL_SLEEP_LOW,
            sleep_high: GLOBAL_SLEEP_HIGH,
            screen_max: GLOBAL_SCREEN_MAX,
            activity_min: GLOBAL_ACTIVITY_MIN,
        }
    }
}

/// Confidence-blended decision boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveThresholds {
    pub sleep_low: f64,
    pub sleep_high: f64,
    pub screen_max: f64,
    pub activity_min: f64,
}

impl From<GlobalPriors> for EffectiveThresholds {
    fn from(priors: GlobalPriors) -> Self {
        Self {
            sleep_low: priors.sleep_low,
            sleep_high: priors.sleep_high,
            screen_max: priors.screen_max,
            activity_min: priors.activity_min,
        }
    }
}

/// Averages rounded to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub avg_sleep: f64,
    pub avg_screen: f64,
    pub avg_activity: f64,
}

/// Output of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Maturity phase (0-2)
    pub phase: Phase,
    /// Blend weight between priors and personal pattern (0-1, unrounded)
    pub confidence: f64,
    /// Suggestions in rule evaluation order
    pub suggestions: Vec<String>,
    pub stats: StatsSummary,
}

/// Two decimals, exact halves to even (7.125 → 7.12)
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
