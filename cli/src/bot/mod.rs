//! # SmartChat Response Engine
//!
//! File: cli/src/bot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module owns the response-selection policy: the ordered list of
//! strategies that decides who answers a given input.
//!
//! ## Architecture
//!
//! `SmartBot::respond` tries, in order:
//! 1. `rules`: regex patterns matched at the start of the raw input.
//! 2. `keywords`: substring triggers on the lowercased input.
//! 3. `similarity`: TF-IDF cosine similarity against the `knowledge` base;
//!    the best answer is used only if its score is strictly above the
//!    threshold (0.5 by default).
//! 4. A fixed fallback asking the user to rephrase.
//!
//! Every answer comes back as a `Reply` tagged with the `Strategy` that
//! produced it, which `smartchat ask --explain` prints and the logs record.
//!
//! ## Examples
//!
//! ```rust
//! let mut bot = SmartBot::from_config(&config)?;
//! let reply = bot.respond("Where are you located?");
//! assert_eq!(reply.text, "Our office is located at 123 Main Street, Tech City.");
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tracing::debug;

pub mod keywords;
pub mod knowledge;
pub mod normalize;
pub mod rules;
pub mod similarity;

use keywords::KeywordMatcher;
use knowledge::KnowledgeBase;
use rules::RuleSet;
use similarity::SimilarityMatcher;

/// Reply used when no strategy produces an answer.
pub const FALLBACK_REPLY: &str = "I'm not sure I understand. Could you rephrase that?";

/// Default similarity cutoff.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Which strategy produced a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Pattern rule at this position in the rule table.
    Rule { index: usize },
    /// Keyword trigger contained in the input.
    Keyword { trigger: String },
    /// Knowledge entry whose question scored above the threshold.
    Similarity { question: String, score: f64 },
    /// Nothing matched; `best_score` is the top similarity seen.
    Fallback { best_score: f64 },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rule { index } => write!(f, "rule #{}", index + 1),
            Strategy::Keyword { trigger } => write!(f, "keyword '{}'", trigger),
            Strategy::Similarity { question, score } => {
                write!(f, "similarity to '{}' (score {:.3})", question, score)
            }
            Strategy::Fallback { best_score } => {
                write!(f, "fallback (best similarity {:.3})", best_score)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub strategy: Strategy,
}

pub struct SmartBot {
    rules: RuleSet,
    keywords: KeywordMatcher,
    knowledge: KnowledgeBase,
    similarity: SimilarityMatcher,
    threshold: f64,
    rng: StdRng,
}

impl SmartBot {
    /// Assembles a bot from its parts. A `seed` makes rule replies repeatable.
    pub fn new(
        rules: RuleSet,
        keywords: KeywordMatcher,
        knowledge: KnowledgeBase,
        threshold: f64,
        seed: Option<u64>,
    ) -> Self {
        let similarity = SimilarityMatcher::new(&knowledge);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rules,
            keywords,
            knowledge,
            similarity,
            threshold,
            rng,
        }
    }

    /// Default rules and keywords, the built-in knowledge base extended with
    /// the configured entries, and the configured threshold and seed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = RuleSet::defaults().context("Failed to build pattern rules")?;
        let keywords = KeywordMatcher::defaults();
        let knowledge = KnowledgeBase::from_config(&config.knowledge)
            .context("Failed to build knowledge base")?;
        debug!(
            "Building bot: {} rules, {} keywords, {} knowledge entries, threshold {}",
            rules.len(),
            keywords.len(),
            knowledge.len(),
            config.bot.threshold
        );
        Ok(Self::new(
            rules,
            keywords,
            knowledge,
            config.bot.threshold,
            config.bot.seed,
        ))
    }

    /// Picks the reply for `input`. Never fails: anything unmatched gets
    /// [`FALLBACK_REPLY`].
    pub fn respond(&mut self, input: &str) -> Reply {
        let reply = self.select(input);
        debug!("Answered {:?} via {}", input, reply.strategy);
        reply
    }

    fn select(&mut self, input: &str) -> Reply {
        if let Some(m) = self.rules.respond(input, &mut self.rng) {
            return Reply {
                text: m.reply,
                strategy: Strategy::Rule { index: m.index },
            };
        }

        if let Some(hit) = self.keywords.find(input) {
            return Reply {
                text: hit.answer.to_string(),
                strategy: Strategy::Keyword {
                    trigger: hit.trigger.to_string(),
                },
            };
        }

        let best = self.similarity.best_match(input);
        if let Some(best) = best {
            if best.score > self.threshold {
                if let Some(entry) = self.knowledge.get(best.index) {
                    return Reply {
                        text: entry.answer.clone(),
                        strategy: Strategy::Similarity {
                            question: entry.question.clone(),
                            score: best.score,
                        },
                    };
                }
            }
        }

        Reply {
            text: FALLBACK_REPLY.to_string(),
            strategy: Strategy::Fallback {
                best_score: best.map_or(0.0, |b| b.score),
            },
        }
    }

    /// Similarity of `query` to every knowledge entry, in entry order.
    pub fn similarity_scores(&self, query: &str) -> Vec<f64> {
        self.similarity.scores(query)
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KnowledgeConfig;

    fn bot() -> SmartBot {
        let mut config = Config::default();
        config.bot.seed = Some(3);
        SmartBot::from_config(&config).unwrap()
    }

    #[test]
    fn test_rule_wins_first() {
        let mut bot = bot();
        let reply = bot.respond("hello, what are your hours?");
        assert_eq!(reply.strategy, Strategy::Rule { index: 0 });
    }

    #[test]
    fn test_keyword_before_similarity() {
        let mut bot = bot();
        let reply = bot.respond("What are your hours?");
        assert_eq!(
            reply.strategy,
            Strategy::Keyword {
                trigger: "hour".into()
            }
        );
        assert_eq!(reply.text, "We're open from 9 AM to 5 PM, Monday through Friday.");
    }

    #[test]
    fn test_similarity_answers_when_no_keyword() {
        let mut bot = bot();
        let reply = bot.respond("office location");
        assert_eq!(reply.text, "Our office is located at 123 Main Street, Tech City.");
        match reply.strategy {
            Strategy::Similarity { question, score } => {
                assert_eq!(question, "located");
                assert!(score > 0.5);
            }
            other => panic!("expected similarity, got {:?}", other),
        }
    }

    #[test]
    fn test_similarity_uses_stemming() {
        let mut bot = bot();
        // "service" has no keyword trigger but stems like "services".
        let reply = bot.respond("customer service");
        assert!(reply.text.starts_with("We specialize in AI consulting"));
    }

    #[test]
    fn test_fallback_for_unknown_input() {
        let mut bot = bot();
        let reply = bot.respond("tell me a joke");
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.strategy, Strategy::Fallback { best_score: 0.0 });
    }

    #[test]
    fn test_empty_input_falls_back() {
        let mut bot = bot();
        assert_eq!(bot.respond("").text, FALLBACK_REPLY);
        assert_eq!(bot.respond("   ").text, FALLBACK_REPLY);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // "parking" against "parking permit": two equally weighted terms,
        // one shared, so the score is 1/sqrt(2) ~ 0.707.
        let mut config = Config::default();
        config.knowledge.push(KnowledgeConfig {
            question: "parking permit".into(),
            answer: "Permits are issued at reception.".into(),
        });
        config.bot.threshold = 0.71;
        let mut strict = SmartBot::from_config(&config).unwrap();
        assert_eq!(strict.respond("parking").text, FALLBACK_REPLY);

        config.bot.threshold = 0.7;
        let mut loose = SmartBot::from_config(&config).unwrap();
        assert_eq!(loose.respond("parking").text, "Permits are issued at reception.");
    }

    #[test]
    fn test_stopword_only_input_falls_back() {
        let mut bot = bot();
        for input in ["Can you do it?", "do you?", "would you do that for me"] {
            let reply = bot.respond(input);
            assert_eq!(reply.text, FALLBACK_REPLY, "input {:?}", input);
            assert_eq!(reply.strategy, Strategy::Fallback { best_score: 0.0 });
        }
        // The exact phrase is still answered, by its keyword trigger.
        assert!(matches!(
            bot.respond("So what do you do?").strategy,
            Strategy::Keyword { .. }
        ));
    }

    #[test]
    fn test_configured_knowledge_is_searchable() {
        let mut config = Config::default();
        config.knowledge.push(KnowledgeConfig {
            question: "parking".into(),
            answer: "Visitor parking is behind the building.".into(),
        });
        let mut bot = SmartBot::from_config(&config).unwrap();
        assert_eq!(bot.knowledge().len(), 6);
        assert_eq!(
            bot.respond("Is there parking?").text,
            "Visitor parking is behind the building."
        );
    }

    #[test]
    fn test_seed_makes_replies_repeatable() {
        let replies = |seed| {
            let mut config = Config::default();
            config.bot.seed = Some(seed);
            let mut bot = SmartBot::from_config(&config).unwrap();
            (0..5).map(|_| bot.respond("hi").text).collect::<Vec<_>>()
        };
        assert_eq!(replies(11), replies(11));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Rule { index: 0 }.to_string(), "rule #1");
        assert_eq!(
            Strategy::Similarity {
                question: "hours".into(),
                score: 0.75
            }
            .to_string(),
            "similarity to 'hours' (score 0.750)"
        );
    }
}
