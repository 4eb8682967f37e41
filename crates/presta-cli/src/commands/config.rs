//! Config command - show or initialize the pipeline configuration.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use presta_core::models::config::PrestaConfig;

use super::load_config;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,

    /// Write a default configuration file
    Init {
        /// Target path
        #[arg(short, long, default_value = "presta.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Init { output, force } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "{} already exists, pass --force to overwrite",
                    output.display()
                );
            }
            PrestaConfig::default().save(&output)?;
            println!(
                "{} Default configuration written to {}",
                style("✓").green(),
                output.display()
            );
            Ok(())
        }
    }
}
