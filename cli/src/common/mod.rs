//! # SmartChat Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers used by more than one command. Command-specific logic lives
//! under `commands::`, the response engine under `bot::`, and infrastructure
//! (errors, configuration) under `core::`.
//!
//! - **`ui`**: Terminal colours, banner and separator formatting.
//!

/// Terminal colouring and line formatting.
pub mod ui;
