//! # SmartChat Knowledge Command
//!
//! File: cli/src/commands/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `smartchat knowledge` lists the knowledge base: the built-in entries
//! followed by any `[[knowledge]]` tables from configuration.
//!
//! With `--query <text>` every entry is shown with its similarity to the
//! text, and the last line says whether the best entry clears the threshold.
//! Only the similarity stage is evaluated here; pattern rules and keyword
//! triggers still run first in a real conversation.
//!
//! ```bash
//! smartchat knowledge
//! smartchat knowledge --query "office location" --threshold 0.6
//! ```
//!
use crate::{
    bot::{knowledge::KnowledgeBase, normalize::Normalizer, SmartBot},
    commands::EngineArgs,
    common::ui::{self, Tone},
    core::{config, config::Config, error::Result},
};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "List knowledge base entries, optionally scored against a query")]
pub struct KnowledgeArgs {
    /// Text to score every entry against.
    #[arg(short, long)]
    query: Option<String>,

    #[command(flatten)]
    engine: EngineArgs,
}

pub async fn handle_knowledge(args: KnowledgeArgs, config: Config) -> Result<()> {
    let config = config::apply_overrides(config, args.engine.overrides())?;
    ui::set_color_enabled(config.console.color);
    let bot = SmartBot::from_config(&config)?;

    match args.query {
        None => print!("{}", render_listing(bot.knowledge())),
        Some(query) => {
            let scores = bot.similarity_scores(&query);
            debug!("Scores for {:?}: {:?}", query, scores);
            let normalized = Normalizer::new().normalize_joined(&query);
            print!(
                "{}",
                render_scores(bot.knowledge(), &query, &normalized, &scores, bot.threshold())
            );
        }
    }
    Ok(())
}

fn render_listing(kb: &KnowledgeBase) -> String {
    let mut out = format!(
        "{}\n",
        ui::paint(&format!("Knowledge base ({} entries):", kb.len()), Tone::Banner)
    );
    for (i, entry) in kb.entries().iter().enumerate() {
        out.push_str(&format!("  {}. {} → {}\n", i + 1, entry.question, entry.answer));
    }
    out
}

fn render_scores(
    kb: &KnowledgeBase,
    query: &str,
    normalized: &str,
    scores: &[f64],
    threshold: f64,
) -> String {
    let mut out = format!(
        "{}\n",
        ui::paint(&format!("Similarity to \"{}\":", query), Tone::Banner)
    );
    if normalized.is_empty() {
        out.push_str("  Normalized: (only stopwords)\n");
    } else {
        out.push_str(&format!("  Normalized: {}\n", normalized));
    }
    for (i, (entry, score)) in kb.entries().iter().zip(scores).enumerate() {
        out.push_str(&format!("  {}. [{:.3}] {}\n", i + 1, score, entry.question));
    }

    let best = scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
            Some((_, b)) if b >= s => best,
            _ => Some((i, s)),
        });
    let verdict = match best {
        Some((i, score)) if score > threshold => format!(
            "Best match '{}' ({:.3}) is above the threshold {}.",
            kb.entries()[i].question,
            score,
            threshold
        ),
        _ => format!(
            "No entry is above the threshold {}; the fallback reply would be used.",
            threshold
        ),
    };
    out.push_str(&format!("{}\n", ui::paint(&verdict, Tone::Hint)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_listing() {
        colored::control::set_override(false);
        let listing = render_listing(&KnowledgeBase::defaults());
        assert!(listing.starts_with("Knowledge base (5 entries):"));
        assert!(listing.contains("  1. hours → We're open from 9 AM to 5 PM"));
        assert!(listing.contains("  5. services → "));
    }

    #[test]
    fn test_render_scores_verdicts() {
        colored::control::set_override(false);
        let kb = KnowledgeBase::defaults();

        let above = render_scores(
            &kb,
            "office location",
            "offic locat",
            &[0.0, 1.0, 1.0, 0.0, 0.0],
            0.5,
        );
        assert!(above.contains("  Normalized: offic locat"));
        assert!(above.contains("  2. [1.000] located"));
        assert!(above.contains("Best match 'located' (1.000) is above the threshold 0.5."));

        let below = render_scores(&kb, "joke", "joke", &[0.0; 5], 0.5);
        assert!(below.contains("fallback reply would be used"));

        let empty = render_scores(&kb, "do you?", "", &[0.0; 5], 0.5);
        assert!(empty.contains("  Normalized: (only stopwords)"));
    }

    #[test]
    fn test_knowledge_args_parsing() {
        let args = KnowledgeArgs::try_parse_from(["knowledge", "-q", "hours"]).unwrap();
        assert_eq!(args.query.as_deref(), Some("hours"));
    }
}
