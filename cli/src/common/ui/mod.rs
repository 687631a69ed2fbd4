//! # SmartChat UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Centralizes how SmartChat paints text on the terminal so every command
//! uses the same palette. Each kind of line has a `Tone`; `paint` maps the
//! tone to a colour with the `colored` crate.
//!
//! | Tone        | Colour         | Used for                        |
//! |-------------|----------------|---------------------------------|
//! | `Banner`    | bright cyan    | welcome box, summary rules      |
//! | `Hint`      | bright yellow  | usage hint under the banner     |
//! | `User`      | bright green   | prompt and user turns           |
//! | `Bot`       | bright blue    | bot replies                     |
//! | `Farewell`  | bright magenta | goodbye lines                   |
//! | `Separator` | bright black   | rule between exchanges          |
//! | `Error`     | bright red     | caught errors                   |
//!
//! Colour is switched off process-wide with `set_color_enabled(false)`;
//! `colored` also honours `NO_COLOR` on its own.
//!
//! ```rust
//! use crate::common::ui::{self, Tone};
//!
//! ui::set_color_enabled(config.console.color);
//! println!("{}", ui::paint("Chatbot: Hi there!", Tone::Bot));
//! ```
//!
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Width of the separator printed after each reply.
pub const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Banner,
    Hint,
    User,
    Bot,
    Farewell,
    Separator,
    Error,
}

/// Applies the colour for `tone` to `text`.
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Banner => text.bright_cyan(),
        Tone::Hint => text.bright_yellow(),
        Tone::User => text.bright_green(),
        Tone::Bot => text.bright_blue(),
        Tone::Farewell => text.bright_magenta(),
        Tone::Separator => text.bright_black(),
        Tone::Error => text.bright_red(),
    }
}

/// Turns colour off for the rest of the process when `enabled` is false.
/// Otherwise `colored` keeps deciding from the environment.
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

/// Three-line welcome box with `title` centred inside.
pub fn banner(title: &str) -> Vec<String> {
    let inner: usize = 46;
    let width = title.chars().count();
    let left = inner.saturating_sub(width) / 2;
    let right = inner.saturating_sub(width + left);
    vec![
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}{}{}║", " ".repeat(left), title, " ".repeat(right)),
        format!("╚{}╝", "═".repeat(inner)),
    ]
}

/// `═══ title ═══` heading used around the conversation summary.
pub fn heading(title: &str) -> String {
    let bar = "═".repeat(16);
    format!("{} {} {}", bar, title, bar)
}

pub fn separator() -> String {
    "─".repeat(SEPARATOR_WIDTH)
}

/// Prints `label` without a newline and flushes so it shows before input is read.
pub fn prompt(label: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", paint(label, Tone::User))?;
    stdout.flush()
}

/// `Speaker: text` in the given tone.
pub fn say(speaker: &str, text: &str, tone: Tone) {
    println!("{}", paint(&format!("{}: {}", speaker, text), tone));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(paint("Hi there!", Tone::Bot).to_string(), "Hi there!");
    }

    #[test]
    fn test_banner_lines_have_equal_width() {
        let lines = banner("🤖 Welcome to SmartChat!");
        assert_eq!(lines.len(), 3);
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert_eq!(widths[0], widths[1]);
        assert_eq!(widths[1], widths[2]);
        assert!(lines[1].contains("Welcome to SmartChat!"));
    }

    #[test]
    fn test_banner_with_long_title() {
        let title = "x".repeat(60);
        let lines = banner(&title);
        assert!(lines[1].contains(&title));
    }

    #[test]
    fn test_separator_and_heading() {
        assert_eq!(separator().chars().count(), SEPARATOR_WIDTH);
        assert!(heading("Conversation Summary").contains(" Conversation Summary "));
    }
}
