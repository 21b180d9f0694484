//! Semtrace CLI - cross-diagram semantic validation for design models.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate(args) => {
            cli::validate_command(args)?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
        Commands::InitConfig(args) => {
            cli::init_config(args)?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args)?;
        }
        Commands::ListRules => {
            cli::list_rules()?;
        }
    }

    Ok(())
}
