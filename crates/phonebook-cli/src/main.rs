//! Phonebook CLI
//!
//! Command-line interface for Phonebook - a local contact list.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phonebook_core::Config;

mod commands;
mod output;
mod prompt;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook - add, filter and delete contacts")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a contact
    #[command(alias = "create")]
    Add {
        /// Contact name
        name: String,
        /// Phone number
        number: String,
    },
    /// List contacts
    #[command(alias = "ls")]
    List {
        /// Only show contacts whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact ID (full ID or prefix)
        id: String,
    },
    /// Fill the phonebook with sample contacts
    #[command(alias = "fill")]
    Randomize,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, source_url, sample_size, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even with a broken config file
    if let Some(Commands::Config { command }) = &cli.command {
        match command {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output)?,
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key.clone(), value.clone(), config_path, &output)?
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match cli.command {
        None | Some(Commands::Tui) => {
            tui::run(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => {
            init_cli_logging();
            match command {
                Commands::Add { name, number } => {
                    commands::contact::add(&config, name, number, &output)
                }
                Commands::List { filter } => commands::contact::list(&config, filter, &output),
                Commands::Delete { id } => commands::contact::delete(&config, id, &output),
                Commands::Randomize => commands::contact::randomize(&config, &output).await,
                Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
            }
        }
    }
}

/// Initialize logging for command mode
///
/// Only initializes if PHONEBOOK_LOG is set. Logs go to stderr.
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("PHONEBOOK_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "phonebook_core={},phonebook={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
