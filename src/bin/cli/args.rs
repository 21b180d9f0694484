//! CLI Argument Structures
//!
//! Command and argument definitions for the semtrace binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use semtrace::io::reports::ReportFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cross-diagram semantic validation for UML design models
#[derive(Parser)]
#[command(name = "semtrace")]
#[command(version = VERSION)]
#[command(about = "Semtrace - cross-diagram semantic validation for design models")]
#[command(long_about = "
Check a design model for naming rule violations, semantically misaligned
use cases and classes, and actor interactions with no implementing method.

Common Usage:

  # Validate a model and print a summary
  semtrace validate model.yaml

  # Write a Markdown report
  semtrace validate model.xmi --format markdown --out report.md

  # Score the run against a labelled violation list
  semtrace validate model.json --ground-truth expected.yaml

  # Fail a CI step when violations are found
  semtrace validate model.yaml --fail-on-violations
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a design model (JSON, YAML or XMI)
    Validate(ValidateArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a semtrace configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),

    /// List validation rules with their severity and recommendation
    #[command(name = "list-rules")]
    ListRules,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Model file; the format follows the extension (.json, .yaml/.yml, .xmi/.xml)
    pub model: PathBuf,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Expected violations (JSON or YAML) for precision/recall scoring
    #[arg(long)]
    pub ground_truth: Option<PathBuf>,

    /// Also write graph, cluster, matrix and coverage artifacts as JSON
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Exit with code 1 when any violation is found
    #[arg(long)]
    pub fail_on_violations: bool,

    /// Suppress the summary table
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".semtrace.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Markdown => ReportFormat::Markdown,
        }
    }
}
