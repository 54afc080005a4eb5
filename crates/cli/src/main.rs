//! Fraud Guard CLI - Blacklist management and checkout screening tools.
//!
//! # Usage
//!
//! ```bash
//! # Screen a customer record (JSON) against the blacklists
//! fg-cli check customer.json --record
//!
//! # Blacklist or un-blacklist every detail of a customer
//! fg-cli add customer.json
//! fg-cli remove customer.json
//!
//! # Inspect state
//! fg-cli lists ips
//! fg-cli logs --limit 10
//!
//! # Change a switch
//! fg-cli set wmfo_allow_blacklist_by_name yes
//! ```
//!
//! # Commands
//!
//! - `check` - Screen a customer, optionally recording the blocked attempt
//! - `add` / `remove` - Update the blacklists from a customer record
//! - `lists` - Print blacklist entries
//! - `logs` - Print recent blocked attempts
//! - `set` - Write one setting

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fraud_guard_core::{BlacklistAction, BlacklistCategory, MatchOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod settings_file;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "fg-cli")]
#[command(author, version, about = "Fraud Guard checkout blacklist tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a customer record against the blacklists
    Check {
        /// Path to a customer record JSON file
        customer: PathBuf,

        /// Log the attempt if the customer is blocked
        #[arg(short, long)]
        record: bool,
    },
    /// Add a customer's details to the blacklists
    Add {
        /// Path to a customer record JSON file
        customer: PathBuf,
    },
    /// Remove a customer's details from the blacklists
    Remove {
        /// Path to a customer record JSON file
        customer: PathBuf,
    },
    /// Print blacklist entries
    Lists {
        /// Only this list (`names`, `ips`, `emails`, `domains`, `phones`, `addresses`)
        category: Option<BlacklistCategory>,
    },
    /// Print recent blocked attempts, newest first
    Logs {
        /// Maximum number of rows
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Write one setting
    Set {
        /// Settings key (e.g. `wmfo_enable_debug_log`)
        key: String,
        /// New value
        value: String,
    },
}

#[allow(clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraud_guard_core=info,fraud_guard_cli=info".into());
    let json_layer = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut guard = commands::open_guard(config)?;

    match cli.command {
        Commands::Check { customer, record } => {
            let customer = commands::read_customer(&customer)?;
            match commands::blacklist::check(&mut guard, &customer, record)? {
                MatchOutcome::Clear => println!("clear"),
                MatchOutcome::Blacklisted(category) => println!("blocked: {category}"),
            }
        }
        Commands::Add { customer } => {
            let customer = commands::read_customer(&customer)?;
            commands::blacklist::apply(&mut guard, &customer, BlacklistAction::Add)?;
        }
        Commands::Remove { customer } => {
            let customer = commands::read_customer(&customer)?;
            commands::blacklist::apply(&mut guard, &customer, BlacklistAction::Remove)?;
        }
        Commands::Lists { category } => {
            for (category, entries) in commands::inspect::lists(&guard, category) {
                println!("[{}] ({})", category.label(), entries.len());
                for entry in entries {
                    println!("  {}", entry.replace('\n', " / "));
                }
            }
        }
        Commands::Logs { limit } => {
            for row in commands::inspect::logs(&guard, limit)? {
                println!("{}", serde_json::to_string(&row)?);
            }
        }
        Commands::Set { key, value } => {
            commands::inspect::set(&mut guard, &key, &value)?;
        }
    }
    Ok(())
}
