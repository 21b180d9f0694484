//! Report rendering: JSON, YAML and Markdown.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::errors::{Result, SemtraceError};
use crate::core::violation::{Violation, ViolationCategory};
use crate::report::aggregator::ValidationReport;

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = SemtraceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(SemtraceError::validation_field(
                format!("unknown report format '{other}'"),
                "format",
            )),
        }
    }
}

/// Render a report as text
pub fn render_report(report: &ValidationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}

/// Render and write a report to `path`
pub fn write_report(report: &ValidationReport, format: ReportFormat, path: &Path) -> Result<()> {
    let rendered = render_report(report, format)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SemtraceError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }
    fs::write(path, rendered)
        .map_err(|e| SemtraceError::io(format!("Failed to write report {}", path.display()), e))?;
    info!("Report written to {}", path.display());
    Ok(())
}

const CATEGORIES: [(ViolationCategory, &str); 4] = [
    (ViolationCategory::Naming, "Naming"),
    (ViolationCategory::Semantic, "Semantic"),
    (ViolationCategory::Relationship, "Relationship"),
    (ViolationCategory::CrossDiagram, "Cross-Diagram"),
];

fn render_markdown(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Model Validation Report\n");
    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(
        out,
        "Total violations: **{}**\n",
        report.summary.total_violations
    );

    if !report.summary.violation_types.is_empty() {
        let _ = writeln!(out, "| Rule | Count |");
        let _ = writeln!(out, "|------|-------|");
        for (rule_id, count) in &report.summary.violation_types {
            let _ = writeln!(out, "| `{rule_id}` | {count} |");
        }
        out.push('\n');
    }

    for (category, title) in CATEGORIES {
        let violations = report.detailed_violations.get(category);
        if violations.is_empty() {
            continue;
        }
        let _ = writeln!(out, "## {} Violations\n", title);
        for violation in violations {
            let _ = writeln!(out, "{}", markdown_item(violation));
        }
        out.push('\n');
    }

    if !report.recommendations.is_empty() {
        let _ = writeln!(out, "## Recommendations\n");
        for recommendation in &report.recommendations {
            let _ = writeln!(out, "- {recommendation}");
        }
        out.push('\n');
    }

    if let Some(metrics) = &report.metrics {
        let _ = writeln!(out, "## Evaluation\n");
        let _ = writeln!(out, "| Metric | Value |");
        let _ = writeln!(out, "|--------|-------|");
        let _ = writeln!(out, "| Precision | {:.3} |", metrics.precision);
        let _ = writeln!(out, "| Recall | {:.3} |", metrics.recall);
        let _ = writeln!(out, "| F1 | {:.3} |", metrics.f1_score);
        let _ = writeln!(
            out,
            "| TP / FP / FN | {} / {} / {} |",
            metrics.true_positives, metrics.false_positives, metrics.false_negatives
        );
    }

    out
}

fn markdown_item(violation: &Violation) -> String {
    match violation.severity {
        Some(severity) => format!(
            "- **{}** `{}` ({}): {}",
            violation.element_name,
            violation.rule_id,
            severity.as_str(),
            violation.message
        ),
        None => format!(
            "- **{}** `{}`: {}",
            violation.element_name, violation.rule_id, violation.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::violation::RuleId;
    use crate::report::aggregator::ViolationAggregator;
    use crate::report::metrics::EvaluationMetrics;

    fn report() -> ValidationReport {
        let mut aggregator = ViolationAggregator::new();
        aggregator.push(Violation::new(
            RuleId::UseCaseNameVerb,
            "System",
            "Use case name 'System' should contain a verb",
        ));
        aggregator.push(Violation::new(
            RuleId::UseCaseNameVerb,
            "Database",
            "Use case name 'Database' should contain a verb",
        ));
        aggregator.push(Violation::new(
            RuleId::CrossDiagramMisalignment,
            "Login - UserManager",
            "Use case 'Login' and class 'UserManager' are not semantically aligned",
        ));
        aggregator.build_report(Some(EvaluationMetrics::default()))
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_json_and_yaml_parse_back() {
        let report = report();
        let json = render_report(&report, ReportFormat::Json).unwrap();
        let from_json: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, report);

        let yaml = render_report(&report, ReportFormat::Yaml).unwrap();
        let from_yaml: ValidationReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(from_yaml.summary, report.summary);
    }

    #[test]
    fn test_markdown_sections() {
        let markdown = render_report(&report(), ReportFormat::Markdown).unwrap();

        assert!(markdown.starts_with("# Model Validation Report"));
        assert!(markdown.contains("Total violations: **3**"));
        assert!(markdown.contains("| `use_case_name_verb` | 2 |"));
        assert!(markdown.contains("## Naming Violations"));
        assert!(markdown.contains("## Cross-Diagram Violations"));
        assert!(!markdown.contains("## Semantic Violations"));
        assert!(markdown.contains("- **System** `use_case_name_verb` (warning):"));
        assert!(markdown.contains("- Use verb phrases for use case names"));
        assert!(markdown.contains("## Evaluation"));
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        write_report(&report(), ReportFormat::Markdown, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("## Recommendations"));
    }
}
