//! # SmartChat Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for SmartChat, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, project-specific
//! overrides, an explicit file and finally command-line flags.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence, highest first):
//! 1. Command-line flags (`--threshold`, `--seed`, `--no-color`)
//! 2. An explicit file passed with `--config <path>` (`~` is expanded)
//! 3. Project-specific `.smartchat.toml` in current directory or ancestors
//! 4. User-specific `<config dir>/smartchat/config.toml`
//! 5. Default values defined in the code
//!
//! Each file is read as a layer of optional keys. A key present in a layer
//! replaces the value from the layers below it, even when it restates the
//! default. Knowledge entries are not overridden between layers: every
//! layer's `[[knowledge]]` tables are appended after the built-in entries.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Chatbot"
//! threshold = 0.5
//! seed = 42
//!
//! [console]
//! color = true
//!
//! [[knowledge]]
//! question = "parking"
//! answer = "Visitor parking is behind the building."
//! ```
//!
//! ```rust
//! let cfg = config::load_config(args.config.as_deref())?;
//! let threshold = cfg.bot.threshold;
//! ```
//!
use crate::bot::DEFAULT_THRESHOLD;
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The resolved configuration: defaults with every layer applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub bot: BotConfig,
    pub console: ConsoleConfig,
    /// Extra knowledge base entries appended after the built-in ones.
    pub knowledge: Vec<KnowledgeConfig>,
}

/// Settings for the response engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    /// Speaker label used for the bot's lines.
    pub name: String,
    /// Minimum similarity (exclusive) for a knowledge answer to be used.
    pub threshold: f64,
    /// Seed for reply selection. Unset means a fresh random seed per run.
    pub seed: Option<u64>,
}

/// Settings for console output.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Emit ANSI colours.
    pub color: bool,
}

/// One configuration file as written. A key left out of the file is `None`
/// and leaves the value from lower layers untouched.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
struct ConfigLayer {
    #[serde(default)]
    bot: BotLayer,
    #[serde(default)]
    console: ConsoleLayer,
    #[serde(default)]
    knowledge: Vec<KnowledgeConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct BotLayer {
    name: Option<String>,
    threshold: Option<f64>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConsoleLayer {
    color: Option<bool>,
}

/// A single `[[knowledge]]` table.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    pub question: String,
    pub answer: String,
}

/// Flag values from the command line that override every file layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigOverrides {
    pub threshold: Option<f64>,
    pub seed: Option<u64>,
    pub no_color: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Chatbot".to_string(),
            threshold: DEFAULT_THRESHOLD,
            seed: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
        }
    }
}


const PROJECT_CONFIG_FILENAME: &str = ".smartchat.toml";

/// # Load Configuration (`load_config`)
///
/// Loads and merges user, project and (optionally) explicit configuration
/// files, then validates the result.
///
/// ## Arguments
///
/// * `explicit` - Path given with `--config`. It must exist when provided.
///
/// ## Returns
///
/// * `Result<Config>` - The merged configuration, or an error if any file
///   cannot be read or parsed, or the merged values are invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let project_config = load_project_config(&current_dir)?;
    let explicit_config = match explicit {
        Some(path) => Some(load_explicit_config(path)?),
        None => None,
    };

    let merged = [user_config, project_config, explicit_config]
        .into_iter()
        .fold(Config::default(), merge_layer);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

/// Applies command-line overrides and re-validates.
pub fn apply_overrides(mut config: Config, overrides: ConfigOverrides) -> Result<Config> {
    if let Some(threshold) = overrides.threshold {
        debug!("Overriding threshold from command line: {}", threshold);
        config.bot.threshold = threshold;
    }
    if overrides.seed.is_some() {
        config.bot.seed = overrides.seed;
    }
    if overrides.no_color {
        config.console.color = false;
    }
    validate_config(&config).context("Invalid command-line override")?;
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "SmartChat", "smartchat") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<ConfigLayer>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.smartchat.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn load_explicit_config(path: &Path) -> Result<ConfigLayer> {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if !expanded.is_file() {
        return Err(anyhow!(ChatError::Config(format!(
            "Configuration file '{}' does not exist.",
            expanded.display()
        ))));
    }
    info!("Loading configuration from: {}", expanded.display());
    load_config_from_path(&expanded)
}

/// Walks from `start` towards the filesystem root looking for
/// `.smartchat.toml`. The search stops at the first directory holding `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Applies `layer` on top of `base`. Every key present in the layer wins,
/// even when it restates the default; knowledge entries accumulate.
fn merge_layer(mut base: Config, layer: Option<ConfigLayer>) -> Config {
    let layer = match layer {
        Some(l) => l,
        None => return base,
    };
    if let Some(name) = layer.bot.name {
        base.bot.name = name;
    }
    if let Some(threshold) = layer.bot.threshold {
        base.bot.threshold = threshold;
    }
    if layer.bot.seed.is_some() {
        base.bot.seed = layer.bot.seed;
    }
    if let Some(color) = layer.console.color {
        base.console.color = color;
    }
    base.knowledge.extend(layer.knowledge);
    base
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating configuration...");
    let threshold = config.bot.threshold;
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(anyhow!(ChatError::Config(format!(
            "Similarity threshold {} is out of range. Expected a value between 0 and 1.",
            threshold
        ))));
    }
    if config.bot.name.trim().is_empty() {
        return Err(anyhow!(ChatError::Config(
            "Bot name cannot be empty.".to_string()
        )));
    }
    for entry in &config.knowledge {
        if entry.question.trim().is_empty() {
            return Err(anyhow!(ChatError::Config(format!(
                "Knowledge entry cannot have an empty question (answer: '{}').",
                entry.answer
            ))));
        }
        if entry.answer.trim().is_empty() {
            return Err(anyhow!(ChatError::Config(format!(
                "Knowledge entry cannot have an empty answer (question: '{}').",
                entry.question
            ))));
        }
    }
    Ok(())
}
