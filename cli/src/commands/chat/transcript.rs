//! # Conversation Transcript
//!
//! File: cli/src/commands/chat/transcript.rs
//! Author: Christi Mahu
//!
//! In-memory record of a chat session, printed as a summary when the user
//! says goodbye. Nothing is written to disk.
//!
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user's line followed by the bot's reply.
    pub fn record_exchange(&mut self, user: &str, bot: &str) {
        let at = Local::now();
        self.turns.push(Turn {
            speaker: Speaker::User,
            text: user.to_string(),
            at,
        });
        self.turns.push(Turn {
            speaker: Speaker::Bot,
            text: bot.to_string(),
            at,
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Times of the first and last turn.
    pub fn span(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        Some((self.turns.first()?.at, self.turns.last()?.at))
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
