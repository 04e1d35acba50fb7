//! # Reactbot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the reactbot configuration. Every
//! setting has a built-in default matching the classic bot behaviour, so no
//! configuration file is required at all.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed via `--config` (or `REACTBOT_CONFIG`). When given,
//!    this replaces the project file lookup.
//! 2. Project-specific `.reactbot.toml` in the current directory or ancestors
//!    (the search stops at the first directory containing `.git`).
//! 3. User-specific `<config dir>/reactbot/config.toml`.
//! 4. Default values defined in the code.
//!
//! Data file paths (`catalog.table`, `sentiment.lexicon`) are tilde-expanded
//! and the final configuration is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [reaction]
//! draws = 3
//! delta = 1.0
//! fallback = "I dont know that!"
//!
//! [delay]
//! min_ms = 400
//! max_ms = 1400
//!
//! [catalog]
//! keywords = ["face", "heart", "cat"]
//! table = "~/data/emoji_sentiment.toml"
//!
//! [sentiment.extras]
//! rustacean = 4
//! ```
//!
use crate::core::error::{ReactbotError, Result};
use crate::engine::sentiment::SCORE_RANGE;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub reaction: ReactionConfig,
    #[serde(default)]
    pub delay: DelayConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// How replies are assembled from the catalog.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReactionConfig {
    /// Number of emoji drawn (with replacement) per reply.
    #[serde(default = "default_draws")]
    pub draws: usize,
    /// Width of the one-sided tolerance band around the target score.
    #[serde(default = "default_delta")]
    pub delta: f64,
    /// Reply used when no emoji falls inside the tolerance band.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

/// The simulated "thinking" delay, drawn uniformly from `[min_ms, max_ms)`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DelayConfig {
    #[serde(default = "default_delay_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_delay_max_ms")]
    pub max_ms: u64,
}

/// Emoji catalog sources and filtering.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Thematic keywords; an emoji is kept if its name contains any of them.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Optional external emoji-sentiment table (TOML). Uses the bundled table when absent.
    pub table: Option<String>,
}

/// Sentiment analyzer sources.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SentimentConfig {
    /// Optional external AFINN-style lexicon. Uses the bundled lexicon when absent.
    pub lexicon: Option<String>,
    /// Extra word scores, overriding lexicon entries.
    #[serde(default)]
    pub extras: BTreeMap<String, i32>,
}

/// Chat session presentation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_bot_sender")]
    pub bot_sender: String,
    #[serde(default = "default_user_sender")]
    pub user_sender: String,
    /// First message the bot posts when a chat starts.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Body of the out-of-band welcome notification.
    #[serde(default = "default_welcome")]
    pub welcome: String,
    /// Whether the welcome notification is sent at all.
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_draws() -> usize {
    3
}
fn default_delta() -> f64 {
    1.0
}
fn default_fallback() -> String {
    "I dont know that!".to_string()
}
fn default_delay_min_ms() -> u64 {
    400
}
fn default_delay_max_ms() -> u64 {
    1400
}
fn default_keywords() -> Vec<String> {
    crate::engine::catalog::DEFAULT_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}
fn default_bot_sender() -> String {
    "/b/stupid-bot".to_string()
}
fn default_user_sender() -> String {
    "/b/me".to_string()
}
fn default_greeting() -> String {
    "Hi!".to_string()
}
fn default_welcome() -> String {
    "Welcome. Talk to me, please!".to_string()
}
fn default_notifications() -> bool {
    true
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            draws: default_draws(),
            delta: default_delta(),
            fallback: default_fallback(),
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: default_delay_min_ms(),
            max_ms: default_delay_max_ms(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            table: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bot_sender: default_bot_sender(),
            user_sender: default_user_sender(),
            greeting: default_greeting(),
            welcome: default_welcome(),
            notifications: default_notifications(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".reactbot.toml";

/// Loads the effective configuration.
///
/// # Arguments
///
/// * `explicit` - A config file given on the command line. When present it is
///   merged over the user config and the project file lookup is skipped.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed, or if the
/// merged configuration fails validation.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let overriding = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), overriding);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "christimahu", "reactbot") {
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

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.reactbot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
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

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Field-wise merge: a project value wins whenever it differs from the default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    let mut merged = Config::default();

    merged.reaction.draws = if project_cfg.reaction.draws != defaults.reaction.draws {
        project_cfg.reaction.draws
    } else {
        user.reaction.draws
    };
    merged.reaction.delta = if project_cfg.reaction.delta != defaults.reaction.delta {
        project_cfg.reaction.delta
    } else {
        user.reaction.delta
    };
    merged.reaction.fallback = if project_cfg.reaction.fallback != defaults.reaction.fallback {
        project_cfg.reaction.fallback
    } else {
        user.reaction.fallback
    };

    merged.delay = if project_cfg.delay != defaults.delay {
        project_cfg.delay
    } else {
        user.delay
    };

    merged.catalog.keywords = if project_cfg.catalog.keywords != defaults.catalog.keywords {
        project_cfg.catalog.keywords
    } else {
        user.catalog.keywords
    };
    merged.catalog.table = project_cfg.catalog.table.or(user.catalog.table);

    merged.sentiment.lexicon = project_cfg.sentiment.lexicon.or(user.sentiment.lexicon);
    merged.sentiment.extras = user.sentiment.extras;
    merged.sentiment.extras.extend(project_cfg.sentiment.extras);

    let session_defaults = defaults.session;
    let (p, u) = (project_cfg.session, user.session);
    let prefer = |project: String, user: String, default: &str| {
        if project != default {
            project
        } else {
            user
        }
    };
    merged.session = SessionConfig {
        bot_sender: prefer(p.bot_sender, u.bot_sender, &session_defaults.bot_sender),
        user_sender: prefer(p.user_sender, u.user_sender, &session_defaults.user_sender),
        greeting: prefer(p.greeting, u.greeting, &session_defaults.greeting),
        welcome: prefer(p.welcome, u.welcome, &session_defaults.welcome),
        notifications: p.notifications && u.notifications,
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(table) = config.catalog.table.as_mut() {
        *table = shellexpand::tilde(table).into_owned();
        debug!("Expanded emoji table path: {}", table);
    }
    if let Some(lexicon) = config.sentiment.lexicon.as_mut() {
        *lexicon = shellexpand::tilde(lexicon).into_owned();
        debug!("Expanded lexicon path: {}", lexicon);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.reaction.draws == 0 {
        return Err(anyhow!(ReactbotError::Config(
            "reaction.draws must be at least 1.".to_string()
        )));
    }
    if !config.reaction.delta.is_finite() || config.reaction.delta < 0.0 {
        return Err(anyhow!(ReactbotError::Config(format!(
            "reaction.delta must be a finite, non-negative number (got {}).",
            config.reaction.delta
        ))));
    }
    if config.delay.min_ms > config.delay.max_ms {
        return Err(anyhow!(ReactbotError::Config(format!(
            "delay.min_ms ({}) must not exceed delay.max_ms ({}).",
            config.delay.min_ms, config.delay.max_ms
        ))));
    }
    if config.catalog.keywords.is_empty() {
        return Err(anyhow!(ReactbotError::Config(
            "catalog.keywords must contain at least one keyword.".to_string()
        )));
    }
    if config.catalog.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(anyhow!(ReactbotError::Config(
            "catalog.keywords must not contain empty keywords.".to_string()
        )));
    }
    if let Some((word, score)) = config
        .sentiment
        .extras
        .iter()
        .find(|(_, score)| !SCORE_RANGE.contains(*score))
    {
        return Err(anyhow!(ReactbotError::Config(format!(
            "sentiment.extras.{} = {} is outside [{}, {}].",
            word,
            score,
            SCORE_RANGE.start(),
            SCORE_RANGE.end()
        ))));
    }
    for (label, path) in [
        ("catalog.table", &config.catalog.table),
        ("sentiment.lexicon", &config.sentiment.lexicon),
    ] {
        if let Some(path) = path {
            if !Path::new(path).is_file() {
                return Err(anyhow!(ReactbotError::Config(format!(
                    "{} '{}' does not exist or is not a file.",
                    label, path
                ))));
            }
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
