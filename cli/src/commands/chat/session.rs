//! # SmartChat Chat Session Loop
//!
//! File: cli/src/commands/chat/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The read-eval-print loop behind `smartchat chat`. It is generic over the
//! input stream and the interrupt signal so tests can drive it with an
//! in-memory buffer instead of the terminal.
//!
//! ## Flow
//!
//! For every line read:
//! 1. An exit keyword (`quit`, `exit`, `bye`) ends the session with a
//!    farewell and the conversation summary.
//! 2. Anything else goes to `SmartBot::respond`; the exchange is recorded
//!    and the reply printed, followed by a separator.
//!
//! The interrupt future (Ctrl-C in the real binary) and end of input both
//! end the session with a short goodbye and no summary. A failed read is
//! reported in red and the loop carries on, up to
//! `MAX_CONSECUTIVE_FAILURES` failures in a row.
//!
use super::transcript::{Speaker, Transcript};
use crate::bot::SmartBot;
use crate::common::ui::{self, Tone};
use crate::core::error::{ChatError, Result};
use anyhow::Context;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// Words that end the session when typed on their own.
pub const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "bye"];

/// Reply to an exit keyword.
pub const FAREWELL: &str = "Goodbye! Have a great day! 👋";

/// Reply when the session is interrupted or input ends.
pub const INTERRUPT_FAREWELL: &str = "Goodbye!";

/// Read errors tolerated back to back before the session gives up.
pub const MAX_CONSECUTIVE_FAILURES: usize = 5;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed an exit keyword.
    Exit,
    /// The interrupt future completed (Ctrl-C).
    Interrupted,
    /// The input stream was closed (Ctrl-D or end of a pipe).
    EndOfInput,
}

/// True when `line`, trimmed and lowercased, is one of [`EXIT_KEYWORDS`].
pub fn is_exit_keyword(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&lowered.as_str())
}

/// # Run Chat Session (`run_session`)
///
/// Drives one conversation until an exit keyword, the interrupt, or end of
/// input.
///
/// ## Arguments
///
/// * `bot` - The response engine.
/// * `bot_name` - Speaker label for the bot's lines.
/// * `input` - Line source (stdin in the binary).
/// * `interrupt` - Completes when the user interrupts. Checked before input.
///
/// ## Returns
///
/// * `Result<(SessionEnd, Transcript)>` - How the session ended and what was said.
/// * `Err` - If the prompt cannot be written or reads keep failing.
pub async fn run_session<R, F>(
    bot: &mut SmartBot,
    bot_name: &str,
    input: R,
    interrupt: F,
) -> Result<(SessionEnd, Transcript)>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut transcript = Transcript::new();
    let mut failures = 0;
    tokio::pin!(interrupt);

    loop {
        ui::prompt("You: ").context("Failed to write prompt")?;

        let next = tokio::select! {
            biased;
            _ = &mut interrupt => {
                info!("Session interrupted");
                println!();
                ui::say(bot_name, INTERRUPT_FAREWELL, Tone::Farewell);
                return Ok((SessionEnd::Interrupted, transcript));
            }
            line = lines.next_line() => line,
        };

        let line = match next {
            Ok(Some(line)) => {
                failures = 0;
                line
            }
            Ok(None) => {
                info!("Input closed");
                println!();
                ui::say(bot_name, INTERRUPT_FAREWELL, Tone::Farewell);
                return Ok((SessionEnd::EndOfInput, transcript));
            }
            Err(e) => {
                failures += 1;
                let err = ChatError::from(e);
                warn!("Read failure {}/{}: {}", failures, MAX_CONSECUTIVE_FAILURES, err);
                ui::say(
                    bot_name,
                    &format!("Something went wrong. ({})", err),
                    Tone::Error,
                );
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    return Err(anyhow::Error::new(err).context("Giving up after repeated input errors"));
                }
                continue;
            }
        };

        if is_exit_keyword(&line) {
            debug!("Exit keyword {:?}", line);
            transcript.record_exchange(&line, FAREWELL);
            ui::say(bot_name, FAREWELL, Tone::Farewell);
            print_summary(&transcript, bot_name);
            return Ok((SessionEnd::Exit, transcript));
        }

        let reply = bot.respond(&line);
        transcript.record_exchange(&line, &reply.text);
        ui::say(bot_name, &reply.text, Tone::Bot);
        println!("{}", ui::paint(&ui::separator(), Tone::Separator));
    }
}

/// Prints every turn of `transcript` between two rules.
pub fn print_summary(transcript: &Transcript, bot_name: &str) {
    println!();
    for (line, tone) in summary_lines(transcript, bot_name) {
        println!("{}", ui::paint(&line, tone));
    }
}

/// Summary lines with their tones: heading, one `Speaker: text` line per
/// turn, the session's time span and a closing rule.
fn summary_lines(transcript: &Transcript, bot_name: &str) -> Vec<(String, Tone)> {
    let heading = ui::heading("Conversation Summary");
    let width = heading.chars().count();
    let mut lines = vec![(heading, Tone::Banner)];
    for turn in transcript.turns() {
        let (speaker, tone) = match turn.speaker {
            Speaker::User => ("You", Tone::User),
            Speaker::Bot => (bot_name, Tone::Bot),
        };
        lines.push((format!("{}: {}", speaker, turn.text), tone));
    }
    if let Some((first, last)) = transcript.span() {
        lines.push((
            format!(
                "{} messages, {} to {}",
                transcript.len(),
                first.format("%H:%M:%S"),
                last.format("%H:%M:%S")
            ),
            Tone::Hint,
        ));
    }
    lines.push(("═".repeat(width), Tone::Banner));
    lines
}
