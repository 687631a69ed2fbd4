//! # Pattern-Response Rules
//!
//! File: cli/src/bot/rules.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! An ordered table of case-insensitive regex patterns, each with a set of
//! canned replies. The first pattern that matches at the start of the input
//! wins and one of its replies is picked at random.
//!
//! ## Reply templates
//!
//! A reply may reference capture groups as `%1`..`%9`. The captured text is
//! lowercased and its pronouns reflected (`i am` becomes `you are`, `my`
//! becomes `your`) before it is spliced in:
//!
//! ```rust
//! let rule = Rule::new(r"i need (.*)", &["Why do you need %1?"])?;
//! // "I need my coffee" -> "Why do you need your coffee?"
//! ```
//!
use crate::core::error::ChatError;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use tracing::trace;

/// Built-in rules, checked in this order.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        r"(hi|hello|hey|greetings)",
        &[
            "Hello! How can I help you today?",
            "Hi there!",
            "Greetings! What can I do for you?",
        ],
    ),
    (
        r"how are you ?",
        &[
            "I'm doing well, thank you!",
            "I'm a chatbot, so I don't have feelings, but I'm functioning well!",
            "All systems are operational!",
        ],
    ),
    (
        r"(bye|goodbye|exit|quit)",
        &[
            "Goodbye! Have a great day!",
            "It was nice talking to you. Bye!",
            "See you later!",
        ],
    ),
    (
        r"(thanks|thank you|appreciate it)",
        &["You're welcome!", "Happy to help!", "No problem!"],
    ),
];

/// Pronoun swaps applied to captured text. Multi-word keys come first so
/// the alternation prefers them.
const REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "you are"),
    ("i was", "you were"),
    ("you are", "I am"),
    ("you were", "I was"),
    ("i'm", "you are"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("yours", "mine"),
    ("your", "my"),
    ("my", "your"),
    ("you", "me"),
    ("me", "you"),
    ("i", "you"),
];

/// One pattern and its candidate replies.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    regex: Regex,
    replies: Vec<String>,
}

impl Rule {
    /// Compiles `pattern` case-insensitively, anchored at the start of the input.
    ///
    /// ## Errors
    ///
    /// * `ChatError::InvalidPattern` if the regex does not compile.
    /// * `ChatError::EmptyRule` if `replies` is empty.
    pub fn new(pattern: &str, replies: &[&str]) -> Result<Self, ChatError> {
        if replies.is_empty() {
            return Err(ChatError::EmptyRule {
                pattern: pattern.to_string(),
            });
        }
        let regex = Regex::new(&format!("(?i)^(?:{})", pattern)).map_err(|source| {
            ChatError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            replies: replies.iter().map(|r| r.to_string()).collect(),
        })
    }

    #[cfg(test)]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[cfg(test)]
    pub fn replies(&self) -> &[String] {
        &self.replies
    }
}

/// Ordered rule table plus the pronoun reflector used for `%N` groups.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    reflector: Regex,
}

/// A rule that fired: its position in the table and the rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub index: usize,
    pub reply: String,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, ChatError> {
        let keys: Vec<String> = REFLECTIONS.iter().map(|(k, _)| regex::escape(k)).collect();
        let pattern = format!(r"\b(?:{})\b", keys.join("|"));
        let reflector = Regex::new(&pattern)
            .map_err(|source| ChatError::InvalidPattern { pattern, source })?;
        Ok(Self { rules, reflector })
    }

    /// The greeting / wellbeing / farewell / thanks table.
    pub fn defaults() -> Result<Self, ChatError> {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(pattern, replies)| Rule::new(pattern, replies))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rules)
    }

    #[cfg(test)]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tries each rule in order against `input`. Returns `None` when no
    /// pattern matches at the start of the input.
    pub fn respond<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Option<RuleMatch> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            let captures = rule.regex.captures(input)?;
            // Rule::new guarantees at least one reply.
            let template = rule.replies.choose(rng)?;
            trace!("Rule '{}' matched, template '{}'", rule.pattern, template);
            Some(RuleMatch {
                index,
                reply: self.render(template, &captures),
            })
        })
    }

    /// Lowercases `fragment` and swaps first and second person pronouns.
    pub fn reflect(&self, fragment: &str) -> String {
        let lowered = fragment.to_lowercase();
        self.reflector
            .replace_all(&lowered, |caps: &Captures| {
                let word = &caps[0];
                REFLECTIONS
                    .iter()
                    .find(|(key, _)| *key == word)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }

    fn render(&self, template: &str, captures: &Captures) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '%' {
                if let Some(group) = chars.peek().and_then(|d| d.to_digit(10)).filter(|d| *d > 0) {
                    chars.next();
                    if let Some(m) = captures.get(group as usize) {
                        out.push_str(&self.reflect(m.as_str()));
                    }
                    continue;
                }
            }
            out.push(c);
        }
        if let Some(stripped) = out.strip_suffix("?.") {
            out = format!("{}.", stripped);
        } else if let Some(stripped) = out.strip_suffix("??") {
            out = format!("{}?", stripped);
        }
        out
    }
}
