//! # Knowledge Base
//!
//! File: cli/src/bot/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small ordered table mapping short questions or keywords to exact answer
//! strings. The similarity matcher scores user input against the questions;
//! the answer of the best entry is what the user sees.
//!
//! Entry order matters: when two questions score the same, the earlier one
//! wins. Built-in entries come first, configured `[[knowledge]]` entries after.
//!
use crate::core::config::KnowledgeConfig;
use crate::core::error::ChatError;
use tracing::debug;

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("hours", "We're open from 9 AM to 5 PM, Monday through Friday."),
    ("located", "Our office is located at 123 Main Street, Tech City."),
    ("location", "Our office is located at 123 Main Street, Tech City."),
    (
        "what do you do",
        "We provide AI consulting, software development, data analysis services, and intelligent chatbot solutions like ChatGPT.",
    ),
    (
        "services",
        "We specialize in AI consulting, custom software development, data analytics, and intelligent chatbot solutions inspired by models like ChatGPT.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five built-in entries.
    pub fn defaults() -> Self {
        let mut kb = Self::new();
        for (question, answer) in DEFAULT_ENTRIES {
            kb.entries.push(KnowledgeEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            });
        }
        kb
    }

    /// Built-in entries followed by the configured ones.
    pub fn from_config(extra: &[KnowledgeConfig]) -> Result<Self, ChatError> {
        let mut kb = Self::defaults();
        for entry in extra {
            kb.insert(&entry.question, &entry.answer)?;
        }
        Ok(kb)
    }

    /// Appends an entry, or replaces the answer in place when the question
    /// already exists (compared trimmed and case-insensitively).
    pub fn insert(&mut self, question: &str, answer: &str) -> Result<(), ChatError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(ChatError::Knowledge("question cannot be empty".into()));
        }
        if answer.is_empty() {
            return Err(ChatError::Knowledge(format!(
                "answer for '{}' cannot be empty",
                question
            )));
        }

        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.question.eq_ignore_ascii_case(question))
        {
            debug!("Replacing knowledge answer for '{}'", existing.question);
            existing.answer = answer.to_string();
        } else {
            self.entries.push(KnowledgeEntry {
                question: question.to_string(),
                answer: answer.to_string(),
            });
        }
        Ok(())
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(index)
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
