//! The immutable output of one validation run.

use serde::{Deserialize, Serialize};

use super::issue::{Severity, ValidationIssue};

/// min/max/mean over one numeric attribute of the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ValueRange {
    /// Collapses a sample into a range; `None` for an empty sample so the
    /// serialized statistics distinguish "no data" from zeros.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in samples {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(Self {
            min,
            max,
            mean: sum / samples.len() as f64,
        })
    }
}

/// Descriptive statistics over the validated snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    pub pipe_count: usize,
    pub structure_count: usize,
    /// Sum of stored pipe lengths, feet.
    pub total_length: f64,
    /// Mean of stored slopes, over pipes that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_slope: Option<f64>,
    /// Diameter distribution (inches), over pipes that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<ValueRange>,
    /// Computed velocity distribution (ft/s), only over pipes with valid
    /// hydraulic data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<ValueRange>,
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl IssueSummary {
    pub fn tally(issues: &[ValidationIssue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }
}

/// The single value returned by a validation run. Constructed once, never
/// mutated afterwards, and serializable straight to the exchange format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub network_id: String,
    pub network_name: String,
    /// Name of the standards profile the run was evaluated against.
    pub profile: String,
    /// False iff at least one issue has error severity.
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub statistics: NetworkStatistics,
    pub summary: IssueSummary,
}

impl ValidationResult {
    pub fn new(
        network_id: impl Into<String>,
        network_name: impl Into<String>,
        profile: impl Into<String>,
        issues: Vec<ValidationIssue>,
        statistics: NetworkStatistics,
    ) -> Self {
        let summary = IssueSummary::tally(&issues);
        Self {
            network_id: network_id.into(),
            network_name: network_name.into(),
            profile: profile.into(),
            is_valid: summary.errors == 0,
            issues,
            statistics,
            summary,
        }
    }
}
