//! Console output for the semtrace CLI.
//!
//! Summaries go to stderr so the rendered report on stdout stays machine
//! readable.

use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

use semtrace::{SemtraceConfig, ValidationOutcome};

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Display the outcome of a validation run
pub fn display_validation_summary(outcome: &ValidationOutcome) {
    let report = &outcome.report;
    eprintln!();

    if report.is_clean() {
        eprintln!("{}", "✅ No violations found".bright_green().bold());
    } else {
        eprintln!(
            "{} {}",
            "⚠️  Violations found:".bright_yellow().bold(),
            report.summary.total_violations
        );
        let rows: Vec<RuleRow> = report
            .summary
            .violation_types
            .iter()
            .map(|(rule, count)| RuleRow {
                rule: rule.clone(),
                count: *count,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        eprintln!("{}", table);
    }

    let graph = outcome.graph.stats();
    let mut stats = vec![
        StatRow {
            metric: "Similarity graph nodes",
            value: graph.total_nodes.to_string(),
        },
        StatRow {
            metric: "Similarity graph edges",
            value: graph.total_edges.to_string(),
        },
        StatRow {
            metric: "Semantic clusters",
            value: outcome.clusters.clusters.len().to_string(),
        },
        StatRow {
            metric: "Modularity",
            value: format!("{:.3}", outcome.clusters.modularity),
        },
        StatRow {
            metric: "Traceability cells",
            value: outcome.matrix.len().to_string(),
        },
        StatRow {
            metric: "Missing functionality",
            value: outcome.coverage.missing_functionality.len().to_string(),
        },
    ];

    if let Some(metrics) = &report.metrics {
        stats.push(StatRow {
            metric: "Precision",
            value: format!("{:.3}", metrics.precision),
        });
        stats.push(StatRow {
            metric: "Recall",
            value: format!("{:.3}", metrics.recall),
        });
        stats.push(StatRow {
            metric: "F1",
            value: format!("{:.3}", metrics.f1_score),
        });
    }

    let mut table = Table::new(stats);
    table.with(Style::rounded());
    eprintln!("{}", table);

    if !report.recommendations.is_empty() {
        eprintln!();
        eprintln!("{}", "💡 Recommendations:".bright_blue().bold());
        for recommendation in &report.recommendations {
            eprintln!("   • {}", recommendation);
        }
    }
}

/// Display a configuration overview
pub fn display_config_summary(config: &SemtraceConfig, detailed: bool) {
    let mut rows = vec![
        StatRow {
            metric: "Clustering threshold",
            value: config.similarity.clustering_threshold.to_string(),
        },
        StatRow {
            metric: "Alignment threshold",
            value: config.traceability.alignment_threshold.to_string(),
        },
        StatRow {
            metric: "Coverage threshold",
            value: config.traceability.coverage_threshold.to_string(),
        },
        StatRow {
            metric: "Disabled rules",
            value: config.rules.disabled.len().to_string(),
        },
    ];

    if detailed {
        rows.push(StatRow {
            metric: "Alignment scope",
            value: format!("{:?}", config.traceability.alignment_scope),
        });
        rows.push(StatRow {
            metric: "Report coverage gaps",
            value: config.traceability.report_coverage_gaps.to_string(),
        });
        rows.push(StatRow {
            metric: "Enforce method case",
            value: config.rules.enforce_method_case.to_string(),
        });
        rows.push(StatRow {
            metric: "Parallel scoring",
            value: config.performance.parallel.to_string(),
        });
        rows.push(StatRow {
            metric: "Extra verbs",
            value: config.linguistic.extra_verbs.join(", "),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
