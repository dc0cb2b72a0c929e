//! Diagnostic report returned when a recording session stops.
//!
//! The report shape is best-effort diagnostic data, not a strict contract:
//! every nested field is optional, unknown fields are ignored, and renderers
//! must supply fallbacks rather than assume presence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Overall or per-capability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pass,
    Warning,
    Fail,
    /// Forward-compatible catch-all for statuses the backend introduces
    /// after this client version is deployed.
    #[serde(other)]
    Unknown,
}

/// Severity attached to a flagged issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Warning,
    Error,
    #[serde(other)]
    Unknown,
}

/// One flagged quality issue inside a capability sub-report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIssue {
    #[serde(default)]
    pub severity: Option<IssueSeverity>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Scored sub-report for one capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CapabilityReport {
    #[serde(default)]
    pub ai_type: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_interactions: Option<u64>,
    #[serde(default)]
    pub avg_response_time_ms: Option<f64>,
    #[serde(default)]
    pub quality_scores: Vec<f64>,
    #[serde(default)]
    pub issues: Vec<ReportIssue>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
}

/// Summary block: what the session covered and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
    #[serde(default)]
    pub total_interactions: Option<u64>,
    #[serde(default)]
    pub ai_types_tested: Vec<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The scored summary returned once a recording session stops.
///
/// Owned read-only by the presenter for the duration of its display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Report {
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub summary: Option<ReportSummary>,
    /// Per-capability sub-reports keyed by capability wire name.
    #[serde(default)]
    pub ai_reports: HashMap<String, CapabilityReport>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub report_file: Option<String>,
}
