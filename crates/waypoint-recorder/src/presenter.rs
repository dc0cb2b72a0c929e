//! Report and status rendering.
//!
//! Stateless renderers over the diagnostic report and the live recorder
//! snapshot. The report shape is best-effort data: every nested field may
//! be missing and rendering falls back instead of failing.

use colored::Colorize;

use waypoint_core::capability::Capability;
use waypoint_core::report::{CapabilityReport, IssueSeverity, Report, ReportStatus};

use crate::controller::{RecorderPhase, RecorderSnapshot};

fn status_label(status: Option<ReportStatus>) -> String {
    match status {
        Some(ReportStatus::Pass) => "PASS".green().bold().to_string(),
        Some(ReportStatus::Warning) => "WARNING".yellow().bold().to_string(),
        Some(ReportStatus::Fail) => "FAIL".red().bold().to_string(),
        Some(ReportStatus::Unknown) | None => "UNKNOWN".dimmed().to_string(),
    }
}

fn severity_label(severity: Option<IssueSeverity>) -> String {
    match severity {
        Some(IssueSeverity::Error) => "ERROR".red().to_string(),
        Some(IssueSeverity::Warning) => "WARNING".yellow().to_string(),
        Some(IssueSeverity::Unknown) | None => "ISSUE".normal().to_string(),
    }
}

fn capability_heading(wire_name: &str) -> String {
    Capability::from_wire_name(wire_name)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| wire_name.to_string())
}

fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.1}/100"),
        None => "-/100".to_string(),
    }
}

/// Renders a stopped session's report, or nothing for `None`.
pub fn render_report(report: Option<&Report>) -> Option<String> {
    let report = report?;
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Test Results".bold()));
    out.push_str(&format!(
        "Overall: {} ({})\n",
        status_label(report.status),
        score_label(report.overall_score)
    ));

    let summary = report.summary.clone().unwrap_or_default();
    out.push_str(&format!(
        "Interactions: {}   Duration: {}   AI types tested: {}\n",
        summary.total_interactions.unwrap_or(0),
        report
            .duration_seconds
            .map(|d| format!("{d:.1}s"))
            .unwrap_or_else(|| "-".to_string()),
        if summary.ai_types_tested.is_empty() {
            "none".to_string()
        } else {
            summary.ai_types_tested.join(", ")
        }
    ));

    let mut entries: Vec<(&String, &CapabilityReport)> = report.ai_reports.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (wire_name, sub) in entries {
        out.push('\n');
        out.push_str(&format!(
            "{}  {}  {}\n",
            capability_heading(wire_name).bold(),
            status_label(sub.status),
            score_label(sub.score)
        ));
        out.push_str(&format!(
            "  {} interactions, avg {}\n",
            sub.total_interactions.unwrap_or(0),
            sub.avg_response_time_ms
                .map(|ms| format!("{ms:.0}ms"))
                .unwrap_or_else(|| "-".to_string())
        ));
        if !sub.quality_scores.is_empty() {
            let scores: Vec<String> = sub
                .quality_scores
                .iter()
                .map(|s| format!("{s:.0}"))
                .collect();
            out.push_str(&format!("  quality scores: {}\n", scores.join(", ")));
        }
        for issue in &sub.issues {
            out.push_str(&format!(
                "  [{}] {}{}\n",
                severity_label(issue.severity),
                issue.description.as_deref().unwrap_or("unspecified issue"),
                issue
                    .details
                    .as_deref()
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default()
            ));
        }
    }

    if let Some(file) = &report.report_file {
        out.push_str(&format!("\nSaved to {file}\n"));
    }

    Some(out)
}

/// Renders the live recorder status line, or nothing when test mode is off.
pub fn render_status(snapshot: &RecorderSnapshot, capability: Option<Capability>) -> Option<String> {
    if !snapshot.test_mode {
        return None;
    }

    let line = match snapshot.phase {
        RecorderPhase::Recording | RecorderPhase::Stopping => {
            let target = capability
                .map(|c| c.display_name())
                .unwrap_or("AI");
            format!(
                "{} {} ({})",
                "● Recording".red().bold(),
                target,
                snapshot.interaction_count
            )
        }
        _ => {
            let detected = capability
                .map(|c| format!(" - {} detected", c.display_name()))
                .unwrap_or_default();
            format!("{}{}", "Test Mode Active".green(), detected)
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::report::{ReportIssue, ReportSummary};

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn none_renders_nothing() {
        no_color();
        assert!(render_report(None).is_none());
    }

    #[test]
    fn empty_report_renders_fallbacks() {
        no_color();
        let rendered = render_report(Some(&Report::default())).unwrap();
        assert!(rendered.contains("UNKNOWN"));
        assert!(rendered.contains("-/100"));
        assert!(rendered.contains("Interactions: 0"));
        assert!(rendered.contains("AI types tested: none"));
    }

    #[test]
    fn full_report_renders_sections() {
        no_color();
        let mut report = Report {
            status: Some(ReportStatus::Pass),
            overall_score: Some(88.5),
            duration_seconds: Some(42.7),
            summary: Some(ReportSummary {
                total_interactions: Some(3),
                ai_types_tested: vec!["chatbot".to_string()],
                ..ReportSummary::default()
            }),
            ..Report::default()
        };
        report.ai_reports.insert(
            "chatbot".to_string(),
            CapabilityReport {
                score: Some(92.0),
                total_interactions: Some(2),
                avg_response_time_ms: Some(310.4),
                quality_scores: vec![90.0, 94.0],
                issues: vec![ReportIssue {
                    severity: Some(IssueSeverity::Warning),
                    description: Some("Low quality score".to_string()),
                    details: Some("Score: 60/100".to_string()),
                    timestamp: None,
                }],
                status: Some(ReportStatus::Pass),
                ai_type: Some("chatbot".to_string()),
            },
        );

        let rendered = render_report(Some(&report)).unwrap();
        assert!(rendered.contains("PASS"));
        assert!(rendered.contains("88.5/100"));
        assert!(rendered.contains("Chatbot AI"));
        assert!(rendered.contains("2 interactions, avg 310ms"));
        assert!(rendered.contains("quality scores: 90, 94"));
        assert!(rendered.contains("[WARNING] Low quality score (Score: 60/100)"));
    }

    #[test]
    fn partial_capability_report_does_not_panic() {
        no_color();
        let mut report = Report::default();
        report
            .ai_reports
            .insert("career_suggester".to_string(), CapabilityReport::default());
        let rendered = render_report(Some(&report)).unwrap();
        assert!(rendered.contains("Career Suggester AI"));
        assert!(rendered.contains("0 interactions, avg -"));
    }

    #[test]
    fn status_line_hidden_when_test_mode_off() {
        no_color();
        let snapshot = RecorderSnapshot {
            phase: RecorderPhase::Idle,
            test_mode: false,
            is_recording: false,
            session_id: None,
            interaction_count: 0,
        };
        assert!(render_status(&snapshot, None).is_none());
    }

    #[test]
    fn status_line_shows_recording_count_and_capability() {
        no_color();
        let snapshot = RecorderSnapshot {
            phase: RecorderPhase::Recording,
            test_mode: true,
            is_recording: true,
            session_id: Some("s1".to_string()),
            interaction_count: 4,
        };
        let line = render_status(&snapshot, Some(Capability::Chat)).unwrap();
        assert!(line.contains("Recording"));
        assert!(line.contains("Chatbot AI"));
        assert!(line.contains("(4)"));
    }

    #[test]
    fn armed_status_line_mentions_detected_capability() {
        no_color();
        let snapshot = RecorderSnapshot {
            phase: RecorderPhase::Armed,
            test_mode: true,
            is_recording: false,
            session_id: None,
            interaction_count: 0,
        };
        let line = render_status(&snapshot, Some(Capability::CourseRecommendation)).unwrap();
        assert!(line.contains("Test Mode Active"));
        assert!(line.contains("Course Recommender AI"));
    }
}
