//! # SmartChat Interactive Chat Command
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements `smartchat chat`, the interactive console
//! conversation. It is also what runs when no subcommand is given.
//!
//! ## Architecture
//!
//! - `session.rs`: the read-eval-print loop and the conversation summary
//! - `transcript.rs`: the in-memory record of the conversation
//!
//! `handle_chat` applies command-line overrides, builds the bot, prints the
//! banner and hands stdin plus a Ctrl-C future to `session::run_session`.
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting
//! smartchat
//!
//! # Repeatable replies, no colours
//! smartchat chat --seed 7 --no-color
//! ```
//!
use crate::{
    bot::SmartBot,
    commands::EngineArgs,
    common::ui::{self, Tone},
    core::{config, config::Config, error::Result},
};
use clap::Parser;
use tracing::{info, warn};

pub mod session;
pub mod transcript;

use session::SessionEnd;

/// # Chat Arguments (`ChatArgs`)
///
/// Options for `smartchat chat`. All of them are overrides of the loaded
/// configuration.
#[derive(Parser, Debug, Default)]
#[command(about = "Start an interactive conversation")]
pub struct ChatArgs {
    #[command(flatten)]
    pub engine: EngineArgs,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Runs one interactive session on stdin/stdout.
///
/// ## Arguments
///
/// * `args` - Parsed `ChatArgs`.
/// * `config` - The merged configuration from `config::load_config`.
///
/// ## Returns
///
/// * `Result<()>` - `Ok(())` once the user leaves; `Err` if the overrides are
///   invalid, the bot cannot be built or the console keeps failing.
pub async fn handle_chat(args: ChatArgs, config: Config) -> Result<()> {
    let config = config::apply_overrides(config, args.engine.overrides())?;
    ui::set_color_enabled(config.console.color);

    let mut bot = SmartBot::from_config(&config)?;
    let bot_name = config.bot.name.clone();
    info!("Starting chat session as '{}'", bot_name);

    for line in ui::banner("🤖 Welcome to SmartChat!") {
        println!("{}", ui::paint(&line, Tone::Banner));
    }
    println!(
        "{}",
        ui::paint("Type your question below. Type 'bye' to exit.\n", Tone::Hint)
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let (end, transcript) = session::run_session(&mut bot, &bot_name, stdin, ctrl_c()).await?;
    info!("Chat ended ({:?}) after {} turns", end, transcript.len());

    if end == SessionEnd::Interrupted {
        // The stdin reader thread is still blocked in read(); the runtime
        // would wait for it on shutdown.
        std::process::exit(0);
    }
    Ok(())
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
