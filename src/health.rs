//! Campaign health judgments.
//!
//! Three consumers judge "is this campaign healthy" with their own numbers:
//! the metric classifier, the insight score bands and the per-bar chart
//! colouring. Each gets its own named threshold value; they are not meant to
//! agree with one another.

use crate::models::{Campaign, InsightRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            HealthStatus::Healthy => HEALTHY_COLOR,
            HealthStatus::Warning => WARNING_COLOR,
            HealthStatus::Critical => CRITICAL_COLOR,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const HEALTHY_COLOR: &str = "#22c55e";
pub const WARNING_COLOR: &str = "#f59e0b";
pub const CRITICAL_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("metric is not a finite number")]
    NotFinite,
    #[error("metric is negative: {0}")]
    Negative(f64),
}

/// A metric is usable when it is finite and not negative.
pub fn validate_metric(value: f64) -> Result<f64, MetricError> {
    if !value.is_finite() {
        return Err(MetricError::NotFinite);
    }
    if value < 0.0 {
        return Err(MetricError::Negative(value));
    }
    Ok(value)
}

/// Missing metrics count as zero. A present but invalid metric is an error.
fn checked_metric(name: &str, value: Option<f64>) -> Result<f64, MetricError> {
    match value {
        None => Ok(0.0),
        Some(value) => validate_metric(value).inspect_err(|err| {
            warn!(metric = name, "invalid metric, classifying as critical: {err}");
        }),
    }
}

/// Strict-inequality bounds used by [`MetricThresholds::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    pub ctr_critical: f64,
    pub ctr_warning: f64,
    pub cpc_critical: f64,
    pub cpc_warning: f64,
    pub conversion_critical: f64,
    pub conversion_warning: f64,
}

impl MetricThresholds {
    pub const CLASSIFIER: MetricThresholds = MetricThresholds {
        ctr_critical: 0.5,
        ctr_warning: 1.0,
        cpc_critical: 10.0,
        cpc_warning: 5.0,
        conversion_critical: 1.0,
        conversion_warning: 2.0,
    };

    /// Critical is checked before Warning; the first match wins. Any present
    /// metric that fails [`validate_metric`] makes the campaign Critical.
    pub fn classify(
        &self,
        ctr: Option<f64>,
        conversion_rate: Option<f64>,
        cpc: Option<f64>,
    ) -> HealthStatus {
        let checked = (
            checked_metric("ctr", ctr),
            checked_metric("conversion_rate", conversion_rate),
            checked_metric("cpc", cpc),
        );
        let (Ok(ctr), Ok(conversion_rate), Ok(cpc)) = checked else {
            return HealthStatus::Critical;
        };

        if ctr < self.ctr_critical
            || cpc > self.cpc_critical
            || conversion_rate < self.conversion_critical
        {
            HealthStatus::Critical
        } else if ctr < self.ctr_warning
            || cpc > self.cpc_warning
            || conversion_rate < self.conversion_warning
        {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self::CLASSIFIER
    }
}

pub fn classify(ctr: Option<f64>, conversion_rate: Option<f64>, cpc: Option<f64>) -> HealthStatus {
    MetricThresholds::CLASSIFIER.classify(ctr, conversion_rate, cpc)
}

pub fn classify_campaign(campaign: &Campaign) -> HealthStatus {
    classify(campaign.ctr, campaign.conversion_rate, campaign.cpc)
}

/// False when any derived metric is present but unusable.
pub fn metrics_valid(campaign: &Campaign) -> bool {
    [campaign.ctr, campaign.cpc, campaign.conversion_rate]
        .into_iter()
        .flatten()
        .all(|value| validate_metric(value).is_ok())
}

/// Score bands applied to the backend's health_score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBands {
    pub healthy_at: i64,
    pub warning_at: i64,
}

impl ScoreBands {
    pub const INSIGHTS: ScoreBands = ScoreBands {
        healthy_at: 80,
        warning_at: 50,
    };

    pub fn status(&self, score: i64) -> HealthStatus {
        if score >= self.healthy_at {
            HealthStatus::Healthy
        } else if score >= self.warning_at {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub healthy_count: usize,
    pub warning_count: usize,
    pub critical_count: usize,
}

impl HealthSummary {
    pub fn total(&self) -> usize {
        self.healthy_count + self.warning_count + self.critical_count
    }
}

pub fn summarize(insights: &[InsightRecord]) -> HealthSummary {
    insights
        .iter()
        .fold(HealthSummary::default(), |mut summary, insight| {
            match ScoreBands::INSIGHTS.status(insight.health_score) {
                HealthStatus::Healthy => summary.healthy_count += 1,
                HealthStatus::Warning => summary.warning_count += 1,
                HealthStatus::Critical => summary.critical_count += 1,
            }
            summary
        })
}

/// Inclusive lower bounds used to colour a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarThresholds {
    pub healthy_at: f64,
    pub warning_at: f64,
}

impl BarThresholds {
    pub const CTR: BarThresholds = BarThresholds {
        healthy_at: 2.0,
        warning_at: 1.0,
    };

    pub const CONVERSION: BarThresholds = BarThresholds {
        healthy_at: 3.0,
        warning_at: 1.5,
    };

    pub fn status(&self, value: f64) -> HealthStatus {
        if value >= self.healthy_at {
            HealthStatus::Healthy
        } else if value >= self.warning_at {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    pub fn color(&self, value: f64) -> &'static str {
        self.status(value).color()
    }
}
