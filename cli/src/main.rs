//! # SmartChat Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the SmartChat CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - `bot`: the response engine (rules, keywords, TF-IDF similarity, fallback)
//! - `commands`: one module per subcommand (`chat`, `ask`, `knowledge`)
//! - `common::ui`: console colours and layout
//! - `core`: errors and configuration
//!
//! Running `smartchat` without a subcommand starts `chat` with default
//! options. All errors are propagated to this level for consistent handling.
//!
//! ## Examples
//!
//! ```bash
//! # Chat
//! smartchat
//!
//! # One question, with debug logs on stderr
//! smartchat -vv ask "What are your hours?"
//!
//! # Use a specific configuration file
//! smartchat --config ./bot.toml knowledge
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod bot; // Response engine
mod commands; // Subcommand handlers
mod common; // Console helpers
mod core; // Errors and configuration

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "smartchat",
    about = "🤖 SmartChat: a rule, keyword and similarity based console chatbot",
    long_about = "Answers questions with pattern rules, keyword triggers and TF-IDF\n\
                  similarity against a small knowledge base, in that order.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file applied on top of the user and project files.
    #[arg(long, global = true, env = "SMARTCHAT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    #[command(alias = "k")]
    Knowledge(commands::knowledge::KnowledgeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = async {
        let config = core::config::load_config(cli.config.as_deref())?;
        match cli.command {
            None => commands::chat::handle_chat(Default::default(), config).await,
            Some(Commands::Chat(args)) => commands::chat::handle_chat(args, config).await,
            Some(Commands::Ask(args)) => commands::ask::handle_ask(args, config).await,
            Some(Commands::Knowledge(args)) => {
                commands::knowledge::handle_knowledge(args, config).await
            }
        }
    }
    .await;

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
