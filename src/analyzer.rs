//! Analysis orchestration
//!
//! This module provides the public API for turning a metric history into an
//! [`AnalysisResult`]. Stages run in data-dependency order:
//!
//! day count → phase + confidence → personal stats → blended thresholds → suggestions

use crate::error::AnalysisError;
use crate::history::count_days;
use crate::phase::compute_confidence;
use crate::schema::{AnalyzeRequest, ValidationError};
use crate::stats::PersonalStatsComputer;
use crate::suggestions::SuggestionGenerator;
use crate::thresholds::ThresholdBlender;
use crate::types::{AnalysisResult, GlobalPriors, MetricEntry, Phase};
use tracing::{debug, info};

/// Analyze an analyze-request JSON body and return the result JSON (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let result_json = analyze_json(request_json)?;
/// ```
pub fn analyze_json(request_json: &str) -> Result<String, AnalysisError> {
    let request = AnalyzeRequest::from_json(request_json)?;
    let result = HealthAnalyzer::new().analyze_request(&request)?;
    Ok(serde_json::to_string(&result)?)
}

/// Orchestrates the analysis pipeline.
///
/// Holds only read-only configuration, so one analyzer can serve any number of
/// concurrent requests.
pub struct HealthAnalyzer {
    blender: ThresholdBlender,
    generator: SuggestionGenerator,
}

impl Default for HealthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthAnalyzer {
    /// Create an analyzer with the default global priors and rule set
    pub fn new() -> Self {
        Self::with_priors(GlobalPriors::default())
    }

    /// Create an analyzer with alternate priors
    pub fn with_priors(priors: GlobalPriors) -> Self {
        Self {
            blender: ThresholdBlender::new(priors),
            generator: SuggestionGenerator::new(),
        }
    }

    /// Replace the suggestion rule set
    pub fn with_generator(mut self, generator: SuggestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn priors(&self) -> &GlobalPriors {
        self.blender.priors()
    }

    /// Validate a raw request, then analyze it
    pub fn analyze_request(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        let validated = request.validate()?;
        self.analyze(&validated.user_id, &validated.metrics)
    }

    /// Run the full pipeline over a validated history
    pub fn analyze(
        &self,
        user_id: &str,
        metrics: &[MetricEntry],
    ) -> Result<AnalysisResult, AnalysisError> {
        if metrics.is_empty() {
            return Err(ValidationError::EmptyMetrics.into());
        }

        info!(user_id, entries = metrics.len(), "analyzing metric history");

        // Stage 1: Count distinct days
        let days_of_data = count_days(metrics);

        // Stage 2: Phase and confidence
        let phase = Phase::from_day_count(days_of_data);
        let confidence = compute_confidence(days_of_data);

        // Stage 3: Personal statistics
        let stats = PersonalStatsComputer::compute(metrics)?;

        // Stage 4: Blend thresholds
        let thresholds = self.blender.blend(&stats, confidence);
        debug!(
            days_of_data,
            %phase,
            confidence,
            sleep_pattern = %stats.sleep_pattern,
            ?thresholds,
            "thresholds blended"
        );

        // Stage 5: Suggestions
        let suggestions = self.generator.generate(metrics, &stats, &thresholds, phase);

        info!(
            user_id,
            phase = phase.code(),
            confidence,
            suggestions = suggestions.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            phase,
            confidence,
            suggestions,
            stats: stats.summary(),
        })
    }
}
