//! # SmartChat Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the SmartChat CLI and the
//! engine flags they share.
//!
//! ## Commands
//!
//! - `chat`: Interactive console conversation (the default)
//! - `ask`: One question, one answer, then exit
//! - `knowledge`: List knowledge base entries and their similarity to a query
//!
//! Each command defines its own arguments structure and an async handler
//! taking those arguments plus the loaded `Config`.
//!
use crate::core::config::ConfigOverrides;
use clap::Args;

/// Single-shot question answering.
pub mod ask;
/// Interactive chat loop and transcript.
pub mod chat;
/// Knowledge base inspection.
pub mod knowledge;

/// # Engine Flags (`EngineArgs`)
///
/// Flags shared by commands that build a bot. Each one overrides the matching
/// configuration value for this run only.
#[derive(Args, Debug, Default, Clone)]
pub struct EngineArgs {
    /// Similarity a knowledge answer must exceed to be used (0 to 1).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Seed for reply selection, for repeatable conversations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable ANSI colours.
    #[arg(long)]
    pub no_color: bool,
}

impl EngineArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            threshold: self.threshold,
            seed: self.seed,
            no_color: self.no_color,
        }
    }
}
