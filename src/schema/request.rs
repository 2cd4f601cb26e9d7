//! Analyze request schema and boundary validation
//!
//! Dates may arrive as ISO-8601 strings (`"2024-01-15"`) or as structured
//! `{ "year", "month", "day" }` objects. Both normalize to one [`NaiveDate`] so
//! that duplicates collapse regardless of representation.

use crate::error::AnalysisError;
use crate::types::MetricEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Valid range for sleep duration and screen time (hours)
pub const HOURS_RANGE: (f64, f64) = (0.0, 24.0);

/// Valid range for activity minutes
pub const ACTIVITY_MINUTES_RANGE: (i64, i64) = (0, 1440);

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A date as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
    Parts { year: i32, month: u32, day: u32 },
}

impl DateInput {
    /// Parse into a canonical calendar date
    ///
    /// `index` identifies the owning entry in error messages.
    pub fn normalize(&self, index: usize) -> Result<NaiveDate, ValidationError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(text) => NaiveDate::parse_from_str(text.trim(), ISO_DATE_FORMAT)
                .map_err(|_| ValidationError::InvalidDate {
                    index,
                    value: text.clone(),
                }),
            DateInput::Parts { year, month, day } => NaiveDate::from_ymd_opt(*year, *month, *day)
                .ok_or_else(|| ValidationError::InvalidDate {
                    index,
                    value: format!("{:04}-{:02}-{:02}", year, month, day),
                }),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

/// One metric entry before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetricEntry {
    pub date: DateInput,
    pub sleep_duration: f64,
    pub screen_time: f64,
    pub activity_minutes: i64,
}

impl RawMetricEntry {
    pub fn new(
        date: impl Into<DateInput>,
        sleep_duration: f64,
        screen_time: f64,
        activity_minutes: i64,
    ) -> Self {
        Self {
            date: date.into(),
            sleep_duration,
            screen_time,
            activity_minutes,
        }
    }

    /// Check field ranges and normalize the date
    pub fn validate(&self, index: usize) -> Result<MetricEntry, ValidationError> {
        let date = self.date.normalize(index)?;
        check_hours(index, "sleep_duration", self.sleep_duration)?;
        check_hours(index, "screen_time", self.screen_time)?;

        let (min, max) = ACTIVITY_MINUTES_RANGE;
        if !(min..=max).contains(&self.activity_minutes) {
            return Err(ValidationError::OutOfRange {
                index,
                field: "activity_minutes",
                value: self.activity_minutes as f64,
                min: min as f64,
                max: max as f64,
            });
        }

        Ok(MetricEntry {
            date,
            sleep_duration: self.sleep_duration,
            screen_time: self.screen_time,
            activity_minutes: self.activity_minutes as u32,
        })
    }
}

fn check_hours(index: usize, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { index, field });
    }
    let (min, max) = HOURS_RANGE;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            index,
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Body of an analyze request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Caller-supplied user identifier
    pub user_id: String,
    /// Daily metric entries, at least one
    pub metrics: Vec<RawMetricEntry>,
}

/// A request that passed boundary validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub user_id: String,
    pub metrics: Vec<MetricEntry>,
}

impl AnalyzeRequest {
    /// Parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let request: AnalyzeRequest = serde_json::from_str(json)?;
        Ok(request)
    }

    /// Validate the request, stopping at the first failure
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingUserId);
        }
        if self.metrics.is_empty() {
            return Err(ValidationError::EmptyMetrics);
        }

        let metrics = self
            .metrics
            .iter()
            .enumerate()
            .map(|(idx, entry)| entry.validate(idx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedRequest {
            user_id: self.user_id.clone(),
            metrics,
        })
    }

    /// Collect every validation failure instead of stopping at the first
    pub fn validation_failures(&self) -> Vec<ValidationError> {
        let mut failures = Vec::new();
        if self.user_id.trim().is_empty() {
            failures.push(ValidationError::MissingUserId);
        }
        if self.metrics.is_empty() {
            failures.push(ValidationError::EmptyMetrics);
        }
        failures.extend(
            self.metrics
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| entry.validate(idx).err()),
        );
        failures
    }
}

/// Validation errors raised at the request boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("A non-empty user_id is required")]
    MissingUserId,

    #[error("At least one metric entry is required")]
    EmptyMetrics,

    #[error("Entry {index}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { index: usize, value: String },

    #[error("Entry {index}: {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Entry {index}: {field} must be a finite number")]
    NonFiniteValue { index: usize, field: &'static str },
}

impl ValidationError {
    /// Index of the offending entry, when the error concerns a single entry
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            ValidationError::InvalidDate { index, .. }
            | ValidationError::OutOfRange { index, .. }
            | ValidationError::NonFiniteValue { index, .. } => Some(*index),
            ValidationError::MissingUserId | ValidationError::EmptyMetrics => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_string_and_structured_dates_normalize_equal() {
        let text: DateInput = serde_json::from_str(r#""2024-01-15""#).unwrap();
        let parts: DateInput =
            serde_json::from_str(r#"{"year": 2024, "month": 1, "day": 15}"#).unwrap();

        assert_eq!(text.normalize(0).unwrap(), date(2024, 1, 15));
        assert_eq!(parts.normalize(1).unwrap(), date(2024, 1, 15));
    }

    #[test]
    fn test_malformed_date_names_entry_index() {
        let entry = RawMetricEntry::new("2024-13-40", 7.0, 5.0, 30);
        let err = entry.validate(3).unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidDate {
                index: 3,
                value: "2024-13-40".to_string()
            }
        );
        assert_eq!(err.entry_index(), Some(3));
        assert!(err.to_string().contains("Entry 3"));
    }

    #[test]
    fn test_impossible_structured_date() {
        let input = DateInput::Parts {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert!(matches!(
            input.normalize(0),
            Err(ValidationError::InvalidDate { index: 0, .. })
        ));
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        assert!(RawMetricEntry::new("2024-01-01", 0.0, 24.0, 0).validate(0).is_ok());
        assert!(RawMetricEntry::new("2024-01-01", 24.0, 0.0, 1440).validate(0).is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        let err = RawMetricEntry::new("2024-01-01", 24.5, 5.0, 30)
            .validate(0)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "sleep_duration",
                ..
            }
        ));

        let err = RawMetricEntry::new("2024-01-01", 7.0, -1.0, 30)
            .validate(1)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                index: 1,
                field: "screen_time",
                ..
            }
        ));

        let err = RawMetricEntry::new("2024-01-01", 7.0, 5.0, 1441)
            .validate(2)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "activity_minutes",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_hours_rejected() {
        let err = RawMetricEntry::new("2024-01-01", f64::NAN, 5.0, 30)
            .validate(0)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonFiniteValue {
                index: 0,
                field: "sleep_duration"
            }
        );
    }

    #[test]
    fn test_request_validation() {
        let json = r#"{
            "user_id": "user-1",
            "metrics": [
                {"date": "2024-01-01", "sleep_duration": 7.0, "screen_time": 5.0, "activity_minutes": 30},
                {"date": {"year": 2024, "month": 1, "day": 2}, "sleep_duration": 8.0, "screen_time": 6.0, "activity_minutes": 45}
            ]
        }"#;

        let request = AnalyzeRequest::from_json(json).unwrap();
        let validated = request.validate().unwrap();

        assert_eq!(validated.user_id, "user-1");
        assert_eq!(
            validated.metrics,
            vec![
                MetricEntry::new(date(2024, 1, 1), 7.0, 5.0, 30),
                MetricEntry::new(date(2024, 1, 2), 8.0, 6.0, 45),
            ]
        );
    }

    #[test]
    fn test_request_requires_user_and_metrics() {
        let request = AnalyzeRequest {
            user_id: "  ".to_string(),
            metrics: vec![],
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingUserId));
        assert_eq!(
            request.validation_failures(),
            vec![ValidationError::MissingUserId, ValidationError::EmptyMetrics]
        );

        let request = AnalyzeRequest {
            user_id: "user-1".to_string(),
            metrics: vec![],
        };
        assert_eq!(request.validate(), Err(ValidationError::EmptyMetrics));
    }

    #[test]
    fn test_fractional_activity_minutes_rejected_by_parser() {
        let json = r#"{
            "user_id": "user-1",
            "metrics": [
                {"date": "2024-01-01", "sleep_duration": 7.0, "screen_time": 5.0, "activity_minutes": 30.5}
            ]
        }"#;
        assert!(matches!(
            AnalyzeRequest::from_json(json),
            Err(AnalysisError::Json(_))
        ));
    }

    #[test]
    fn test_validation_failures_reports_every_entry() {
        let request = AnalyzeRequest {
            user_id: "user-1".to_string(),
            metrics: vec![
                RawMetricEntry::new("2024-01-01", 7.0, 5.0, 30),
                RawMetricEntry::new("not-a-date", 7.0, 5.0, 30),
                RawMetricEntry::new("2024-01-03", 7.0, 30.0, 30),
            ],
        };

        let indices: Vec<_> = request
            .validation_failures()
            .iter()
            .filter_map(|e| e.entry_index())
            .collect();
        assert_eq!(indices, vec![1, 2]);
    }
}
