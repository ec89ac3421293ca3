//! scc-config CLI Binary
//!
//! Command-line access to the controller daemon's configuration store.

use clap::Parser;
use scc_config::cli::{map_error, Cli, RunContext};
use scc_config::logging::{init_logging, LoggingConfig};
use scc_config::ConfigError;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&build_logging_config(&cli))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        error!("Command failed: {:#}", e);
        match e.downcast_ref::<ConfigError>() {
            Some(config_error) => eprintln!("{}", map_error(config_error)),
            None => eprintln!("{:#}", e),
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut context = RunContext::new(cli)?;
    info!("Configuration store opened");

    let output = context.execute(&cli.command)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Logging config from CLI flags; `SCC_LOG*` variables still take precedence.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
