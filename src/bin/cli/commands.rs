//! Command handlers for the semtrace CLI.

use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, info};

use semtrace::io::ground_truth::load_ground_truth;
use semtrace::io::reports::{render_report, write_report, ReportFormat};
use semtrace::report::aggregator::recommendation_table;
use semtrace::{DesignModel, ModelValidator, SemtraceConfig, ViolationCategory};

use super::args::{InitConfigArgs, ValidateArgs, ValidateConfigArgs};
use super::output::{display_config_summary, display_validation_summary};

/// Validate a model file and emit the report
pub fn validate_command(args: ValidateArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let model = DesignModel::from_path(&args.model)
        .with_context(|| format!("Failed to load model {}", args.model.display()))?;

    let validator = ModelValidator::new(config)?;
    debug!("Using linguistic service '{}'", validator.service_name());

    let outcome = match &args.ground_truth {
        Some(path) => {
            let expected = load_ground_truth(path)
                .with_context(|| format!("Failed to load ground truth {}", path.display()))?;
            info!("Loaded {} expected violations", expected.len());
            validator.validate_with_ground_truth(&model, &expected)?
        }
        None => validator.validate(&model)?,
    };

    let format = ReportFormat::from(args.format);
    match &args.out {
        Some(path) => write_report(&outcome.report, format, path)?,
        None => println!("{}", render_report(&outcome.report, format)?),
    }

    if let Some(path) = &args.artifacts {
        let json = serde_json::to_string_pretty(&outcome.artifacts())?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write artifacts {}", path.display()))?;
        info!("Artifacts written to {}", path.display());
    }

    if !args.quiet {
        display_validation_summary(&outcome);
    }

    if args.fail_on_violations && !outcome.report.is_clean() {
        eprintln!(
            "{} {} violations found",
            "❌ Validation failed:".red(),
            outcome.report.summary.total_violations
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Print default configuration
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default semtrace configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!(
        "{}",
        "# Usage: semtrace validate --config your-config.yml <model>".dimmed()
    );
    println!();

    let yaml_output = serde_yaml::to_string(&SemtraceConfig::default())?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        eprintln!(
            "{} {}",
            "❌ Configuration file already exists:".red(),
            args.output.display()
        );
        eprintln!("   Use --force to overwrite or choose a different name with --output");
        std::process::exit(1);
    }

    SemtraceConfig::default().to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "🔧 Key settings you can customize:".bright_blue().bold());

    #[derive(Tabled)]
    struct CustomizationRow {
        setting: &'static str,
        description: &'static str,
    }

    let rows = vec![
        CustomizationRow {
            setting: "similarity.clustering_threshold",
            description: "Minimum similarity for a similarity graph edge",
        },
        CustomizationRow {
            setting: "traceability.alignment_threshold",
            description: "Pairs below this are reported as misaligned",
        },
        CustomizationRow {
            setting: "traceability.alignment_scope",
            description: "all_pairs or lexically_linked",
        },
        CustomizationRow {
            setting: "rules.disabled",
            description: "Rule ids to switch off",
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)) {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'semtrace print-default-config' to see valid format".dimmed()
            );
            std::process::exit(1);
        }
    };

    display_config_summary(&config, args.verbose);
    Ok(())
}

/// List every rule with its severity, category and recommendation
pub fn list_rules() -> anyhow::Result<()> {
    let rules = recommendation_table();
    println!("{}", "📋 Validation Rules".bright_blue().bold());
    println!("   {} rules", rules.len());
    println!();

    #[derive(Tabled)]
    struct RuleRow {
        rule: &'static str,
        severity: &'static str,
        category: String,
        recommendation: &'static str,
    }

    let rows: Vec<RuleRow> = rules
        .into_iter()
        .map(|(rule, recommendation)| RuleRow {
            rule: rule.as_str(),
            severity: rule.default_severity().as_str(),
            category: format!("{:?}", ViolationCategory::of_rule(rule.as_str())),
            recommendation,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    Ok(())
}

/// Load configuration from a file, or the defaults
pub fn load_configuration(path: Option<&Path>) -> anyhow::Result<SemtraceConfig> {
    match path {
        Some(path) => {
            let config = SemtraceConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(SemtraceConfig::default()),
    }
}
