//! # Reactbot Reaction Engine
//!
//! File: cli/src/engine/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The emoji-reaction core, split into three parts:
//! - `catalog`: builds the filtered, immutable emoji catalog at startup.
//! - `sentiment`: scores text (the external analyzer seam and the AFINN scorer).
//! - `reaction`: maps a score onto the catalog and assembles the reply.
//!
//! `build_engine` wires the three together from a loaded `Config`.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod catalog;
pub mod reaction;
pub mod sentiment;

use catalog::{build_catalog, Catalog, UnicodeNameIndex};
use reaction::{DelayRange, ReactionEngine, ReactionSettings};
use sentiment::{AfinnAnalyzer, Lexicon};

/// Loads the emoji table and builds the catalog described by `config`.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let table_path = config.catalog.table.as_deref().map(Path::new);
    let raw = catalog::load_table(table_path).context("Failed to load emoji-sentiment table")?;
    Ok(build_catalog(
        &raw,
        &UnicodeNameIndex,
        &config.catalog.keywords,
    ))
}

/// Loads the lexicon (plus configured extras) into the default analyzer.
pub fn load_analyzer(config: &Config) -> Result<AfinnAnalyzer> {
    let lexicon_path = config.sentiment.lexicon.as_deref().map(Path::new);
    let mut lexicon = Lexicon::load(lexicon_path).context("Failed to load sentiment lexicon")?;
    lexicon.extend(
        config
            .sentiment
            .extras
            .iter()
            .map(|(word, score)| (word, *score)),
    );
    Ok(AfinnAnalyzer::new(lexicon))
}

/// Reply settings derived from configuration.
pub fn reaction_settings(config: &Config) -> ReactionSettings {
    ReactionSettings {
        draws: config.reaction.draws,
        delta: config.reaction.delta,
        fallback: config.reaction.fallback.clone(),
        delay: DelayRange::from_millis(config.delay.min_ms, config.delay.max_ms),
    }
}

/// # Build Engine (`build_engine`)
///
/// Builds the catalog and the analyzer once and bundles them into a
/// `ReactionEngine` that lives for the rest of the process.
pub fn build_engine(config: &Config) -> Result<ReactionEngine> {
    let catalog = load_catalog(config)?;
    let analyzer = load_analyzer(config)?;
    info!(
        "Reaction engine ready: {} emoji, {} lexicon words",
        catalog.len(),
        analyzer.lexicon().len()
    );
    let engine = ReactionEngine::new(
        Arc::new(catalog),
        Arc::new(analyzer),
        reaction_settings(config),
    );
    if engine.catalog().is_empty() {
        warn!("No emoji matched the configured keywords; every reply will be the fallback.");
    }
    let delay = engine.settings().delay;
    debug!("Thinking delay between {:?} and {:?}", delay.min(), delay.max());
    Ok(engine)
}

/// A seeded RNG for reproducible replies, or an entropy-seeded one.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
