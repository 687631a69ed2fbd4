//! # SmartChat Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout SmartChat. Domain
//! failures get a dedicated `ChatError` variant; everything else travels as
//! an `anyhow::Error` with context attached at the call site.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ChatError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover:
//! - Configuration errors
//! - Rule construction errors (bad regex, empty reply sets)
//! - Knowledge base errors
//! - Console input errors
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if threshold > 1.0 {
//!     return Err(ChatError::Config(format!("threshold {} is out of range", threshold)))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the SmartChat application.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule '{pattern}' has no replies.")]
    EmptyRule { pattern: String },

    #[error("Knowledge entry is invalid: {0}")]
    Knowledge(String),

    #[error("Failed to read input: {source}")]
    Input {
        #[from]
        source: std::io::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
