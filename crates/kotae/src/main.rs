// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kotae - a webhook-driven LINE question-answering bot.
//!
//! This is the binary entry point for the Kotae service.

mod ask;
mod bootstrap;
mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kotae_config::{ConfigError, KotaeConfig};

/// Kotae - a webhook-driven LINE question-answering bot.
#[derive(Parser, Debug)]
#[command(name = "kotae", version, about, long_about = None)]
struct Cli {
    /// Path to an explicit config file (defaults to the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Ask the answer pipeline a single question and print the answer.
    Ask {
        /// The question to answer.
        question: String,
    },
    /// Validate the configuration and print a summary.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            kotae_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Ask { question }) => ask::run_ask(config, &question).await,
        Some(Commands::Config) => {
            print_config_summary(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Loads configuration from an explicit path or the XDG hierarchy.
fn load_config(path: Option<&Path>) -> Result<KotaeConfig, Vec<ConfigError>> {
    match path {
        Some(path) => match kotae_config::load_config_from_path(path) {
            Ok(config) => {
                kotae_config::validation::validate_config(&config)?;
                Ok(config)
            }
            Err(err) => Err(kotae_config::diagnostic::figment_to_config_errors(err, &[])),
        },
        None => kotae_config::load_and_validate(),
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the
/// configured level.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_config_summary(config: &KotaeConfig) {
    println!("configuration OK");
    println!("  agent.name       = {}", config.agent.name);
    println!(
        "  server           = {}:{}",
        config.server.host, config.server.port
    );
    println!(
        "  line             = {}",
        if config.line.channel_secret.is_some() {
            "configured"
        } else {
            "not configured"
        }
    );
    println!("  gemini.model     = {}", config.gemini.model);
    println!(
        "  rag.document     = {}",
        config.rag.document_path.as_deref().unwrap_or("(none)")
    );
    println!("  history.max_turns = {}", config.history.max_turns);
}
