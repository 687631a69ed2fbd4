//! # SmartChat Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `smartchat ask <question...>` answers one question and exits. The reply
//! is printed on its own line so it can be piped; `--explain` adds a second
//! line naming the strategy that answered.
//!
//! ```bash
//! smartchat ask where are you located
//! smartchat ask --explain "Tell me about your services"
//! ```
//!
use crate::{
    bot::SmartBot,
    commands::EngineArgs,
    common::ui::{self, Tone},
    core::{config, config::Config, error::Result},
};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Answer a single question and exit")]
pub struct AskArgs {
    /// The question. Several words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,

    /// Also print which strategy produced the answer.
    #[arg(short, long)]
    explain: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

pub async fn handle_ask(args: AskArgs, config: Config) -> Result<()> {
    let config = config::apply_overrides(config, args.engine.overrides())?;
    ui::set_color_enabled(config.console.color);

    let question = args.question.join(" ");
    info!("Answering single question: {:?}", question);

    let mut bot = SmartBot::from_config(&config)?;
    let reply = bot.respond(&question);

    println!("{}", reply.text);
    if args.explain {
        println!(
            "{}",
            ui::paint(&format!("Strategy: {}", reply.strategy), Tone::Hint)
        );
    }
    Ok(())
}
