//! # Keyword Matcher
//!
//! File: cli/src/bot/keywords.rs
//! Author: Christi Mahu
//!
//! Substring lookup over a handful of trigger phrases. The input is
//! lowercased and the first trigger it contains decides the answer.
//!

/// Built-in triggers in priority order.
const DEFAULT_TRIGGERS: &[(&str, &str)] = &[
    ("hour", "We're open from 9 AM to 5 PM, Monday through Friday."),
    ("locate", "Our office is located at 123 Main Street, Tech City."),
    (
        "what do you do",
        "We provide AI consulting, software development, and data analysis services.",
    ),
    (
        "services",
        "We specialize in AI consulting, custom software development, data analytics, and intelligent chatbot solutions inspired by models like ChatGPT.",
    ),
];

/// A trigger that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit<'a> {
    pub trigger: &'a str,
    pub answer: &'a str,
}

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    triggers: Vec<(String, String)>,
}

impl KeywordMatcher {
    /// Triggers are stored lowercase so matching stays case-insensitive.
    pub fn new<I, T, A>(triggers: I) -> Self
    where
        I: IntoIterator<Item = (T, A)>,
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|(t, a)| (t.into().to_lowercase(), a.into()))
                .collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_TRIGGERS.iter().copied())
    }

    pub fn find(&self, input: &str) -> Option<KeywordHit<'_>> {
        let lowered = input.to_lowercase();
        self.triggers
            .iter()
            .find(|(trigger, _)| lowered.contains(trigger.as_str()))
            .map(|(trigger, answer)| KeywordHit {
                trigger: trigger.as_str(),
                answer: answer.as_str(),
            })
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
