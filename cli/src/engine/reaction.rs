//! # Reaction Engine
//!
//! File: cli/src/engine/reaction.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns a user message into an emoji reply:
//!
//! 1. Score the text with a `SentimentAnalyzer`.
//! 2. Map the raw score onto the catalog's scale with `transform_range`.
//! 3. Keep the catalog entries inside the tolerance band (`within_band`).
//! 4. Draw `draws` entries uniformly, with replacement, and concatenate
//!    their glyphs. If any draw comes back empty, the reply is the
//!    fallback text instead.
//!
//! The engine also owns the "thinking" delay: a duration drawn uniformly from
//! the configured `[min, max)` range, applied by the caller before the reply
//! is delivered.
//!
//! ## Examples
//!
//! ```rust
//! let engine = ReactionEngine::new(catalog, analyzer, ReactionSettings::default());
//! let mut rng = StdRng::seed_from_u64(7);
//! tokio::time::sleep(engine.thinking_delay(&mut rng)).await;
//! println!("{}", engine.react("what a lovely day", &mut rng));
//! ```
//!
use crate::engine::catalog::{Catalog, EmojiEntry};
use crate::engine::sentiment::SentimentAnalyzer;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Reply used when no emoji fits the message.
pub const DEFAULT_FALLBACK: &str = "I dont know that!";

/// The uniform range the thinking delay is drawn from, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Creates a range; the bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws a duration uniformly from `[min, max)`, or `min` for an empty range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        if min >= max {
            return self.min;
        }
        Duration::from_millis(rng.gen_range(min..max))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::from_millis(400, 1400)
    }
}

/// Tunables for reply assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSettings {
    pub draws: usize,
    pub delta: f64,
    pub fallback: String,
    pub delay: DelayRange,
}

impl Default for ReactionSettings {
    fn default() -> Self {
        Self {
            draws: 3,
            delta: 1.0,
            fallback: DEFAULT_FALLBACK.to_string(),
            delay: DelayRange::default(),
        }
    }
}

/// Maps a raw sentiment score, nominally in `[-5, 5]`, onto `[-1, 1]`.
///
/// Scores outside the nominal range map outside `[-1, 1]`; that is accepted.
pub fn transform_range(val: f64) -> f64 {
    ((val + 5.0) / 10.0) * 2.0 - 1.0
}

/// Whether an emoji `score` is close enough to `target`.
///
/// The band is one-sided: for a non-negative target, anything at or above
/// `target - delta` qualifies; for a negative target, anything at or below
/// `target + delta`. This is the closed form of the three-way test
/// `s >= t || s >= t + d || s >= t - d` (resp. `<=`), whose loosest clause
/// subsumes the other two.
///
/// Open question: the intent may have been a two-sided band
/// (`|score - target| <= delta`). Kept one-sided until that is settled.
pub fn within_band(score: f64, target: f64, delta: f64) -> bool {
    if target >= 0.0 {
        score >= target - delta
    } else {
        score <= target + delta
    }
}

/// Catalog entries inside the tolerance band, in catalog order.
pub fn candidates(catalog: &Catalog, target: f64, delta: f64) -> Vec<&EmojiEntry> {
    catalog
        .iter()
        .filter(|entry| within_band(entry.score, target, delta))
        .collect()
}

/// `n` independent uniform draws with replacement. Every draw is `None` when
/// `pool` is empty.
pub fn draw<'a, R: Rng + ?Sized>(
    pool: &[&'a EmojiEntry],
    n: usize,
    rng: &mut R,
) -> Vec<Option<&'a EmojiEntry>> {
    (0..n).map(|_| pool.choose(&mut *rng).copied()).collect()
}

/// # React (`react`)
///
/// Builds the reply for `text`. Never fails: an empty candidate set (or an
/// undecodable glyph) yields `settings.fallback`.
pub fn react<R: Rng + ?Sized>(
    text: &str,
    catalog: &Catalog,
    analyzer: &dyn SentimentAnalyzer,
    rng: &mut R,
    settings: &ReactionSettings,
) -> String {
    let analysis = analyzer.analyze(text);
    let target = transform_range(f64::from(analysis.score));
    let pool = candidates(catalog, target, settings.delta);
    debug!(
        score = analysis.score,
        target,
        candidates = pool.len(),
        "Selecting reaction"
    );

    let picks = draw(&pool, settings.draws, rng);
    let glyphs: Option<String> = picks
        .into_iter()
        .map(|pick| pick.and_then(EmojiEntry::glyph))
        .collect();

    match glyphs {
        Some(reply) if !reply.is_empty() => reply,
        _ => settings.fallback.clone(),
    }
}

/// The reaction engine with its catalog, analyzer and settings bundled.
///
/// Cheap to share: wrap in an `Arc` and hand clones to spawned tasks.
pub struct ReactionEngine {
    catalog: Arc<Catalog>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    settings: ReactionSettings,
}

impl ReactionEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        settings: ReactionSettings,
    ) -> Self {
        Self {
            catalog,
            analyzer,
            settings,
        }
    }

    pub fn react<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        react(
            text,
            &self.catalog,
            self.analyzer.as_ref(),
            rng,
            &self.settings,
        )
    }

    /// How long to "think" before delivering the next reply.
    pub fn thinking_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.settings.delay.sample(rng)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ReactionSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ReactionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionEngine")
            .field("catalog_len", &self.catalog.len())
            .field("settings", &self.settings)
            .finish()
    }
}
