//! # Sentiment Analysis
//!
//! File: cli/src/engine/sentiment.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A word-list sentiment scorer in the AFINN tradition. Each known word
//! carries an integer valence in `[-5, 5]`; a message scores the sum of its
//! words. It is deliberately naive: the reaction engine only needs "more
//! positive text scores higher, neutral text scores 0".
//!
//! ## Architecture
//!
//! - `SentimentAnalyzer`: the seam the reaction engine depends on.
//! - `Lexicon`: word -> score table, parsed from `word<TAB>score` lines.
//! - `AfinnAnalyzer`: the default analyzer over a `Lexicon`.
//!
//! Scoring rules:
//! 1. Lowercase, turn newlines into spaces, strip punctuation
//!    (apostrophes are kept so `don't` survives).
//! 2. Split on spaces.
//! 3. Each lexicon hit adds its score, sign-flipped when the previous token
//!    is a negator (`not`, `don't`, `can't`, ...).
//!
use crate::common::fs::io::{read_data_source, LoadedSource};
use crate::core::error::{ReactbotError, Result};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED_LEXICON: &str = include_str!("../../data/afinn.tsv");
const BUNDLED_LEXICON_NAME: &str = "bundled AFINN lexicon";

/// Punctuation removed before tokenizing.
const STRIPPED: &[char] = &[
    '.', ',', '/', '#', '!', '?', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`',
    '"', '~', '(', ')',
];

/// Valid word scores, in lexicon files and configured extras alike.
pub const SCORE_RANGE: RangeInclusive<i32> = -5..=5;

/// Tokens that flip the sign of the word that follows them.
const NEGATORS: &[&str] = &[
    "cant", "can't", "dont", "don't", "doesnt", "doesn't", "not", "non", "wont", "won't",
    "isnt", "isn't",
];

/// Result of analyzing one piece of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Sum of word scores. Positive means positive sentiment; 0 is neutral.
    pub score: i32,
    /// `score` divided by the number of tokens (0 for empty text).
    pub comparative: f64,
    pub tokens: Vec<String>,
    /// Words that contributed a positive score, in text order.
    pub positive: Vec<String>,
    /// Words that contributed a negative score, in text order.
    pub negative: Vec<String>,
}

/// Anything that can turn text into a sentiment score.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Analysis;
}

/// Word -> integer valence table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashMap<String, i32>,
}

impl Lexicon {
    /// Parses `word<TAB>score` lines. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ReactbotError::Lexicon` naming the first malformed line or
    /// the first score outside `SCORE_RANGE`.
    pub fn parse(content: &str) -> Result<Self> {
        let mut words = HashMap::new();
        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, score) = line.rsplit_once('\t').ok_or(ReactbotError::Lexicon {
                line: idx + 1,
                reason: "expected <word><TAB><score>".to_string(),
            })?;
            let score: i32 = score.trim().parse().map_err(|_| ReactbotError::Lexicon {
                line: idx + 1,
                reason: format!("score '{}' is not an integer", score.trim()),
            })?;
            if !SCORE_RANGE.contains(&score) {
                return Err(ReactbotError::Lexicon {
                    line: idx + 1,
                    reason: format!(
                        "score {} is outside [{}, {}]",
                        score,
                        SCORE_RANGE.start(),
                        SCORE_RANGE.end()
                    ),
                }
                .into());
            }
            words.insert(word.trim().to_lowercase(), score);
        }
        Ok(Self { words })
    }

    /// Loads the lexicon at `path`, or the bundled one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let LoadedSource { name, content } =
            read_data_source(path, BUNDLED_LEXICON_NAME, BUNDLED_LEXICON)?;
        let lexicon = Self::parse(&content)
            .map_err(|e| e.context(format!("Failed to parse lexicon {}", name)))?;
        if lexicon.is_empty() {
            warn!("Lexicon {} contains no words; every message will score 0", name);
        }
        debug!("Loaded {} lexicon words from {}", lexicon.len(), name);
        Ok(lexicon)
    }

    /// Adds or overrides word scores.
    pub fn extend<I, S>(&mut self, extras: I)
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        for (word, score) in extras {
            self.words.insert(word.as_ref().to_lowercase(), score);
        }
    }

    pub fn score_of(&self, word: &str) -> Option<i32> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Splits text into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\n', " ")
        .replace(STRIPPED, "")
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The default lexicon-based analyzer.
#[derive(Debug, Clone)]
pub struct AfinnAnalyzer {
    lexicon: Lexicon,
}

impl AfinnAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl SentimentAnalyzer for AfinnAnalyzer {
    fn analyze(&self, text: &str) -> Analysis {
        let tokens = tokenize(text);
        let mut analysis = Analysis::default();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut score) = self.lexicon.score_of(token) else {
                continue;
            };
            if i > 0 && NEGATORS.contains(&tokens[i - 1].as_str()) {
                score = score.saturating_neg();
            }
            if score > 0 {
                analysis.positive.push(token.clone());
            } else if score < 0 {
                analysis.negative.push(token.clone());
            }
            analysis.score = analysis.score.saturating_add(score);
        }

        analysis.comparative = if tokens.is_empty() {
            0.0
        } else {
            f64::from(analysis.score) / tokens.len() as f64
        };
        analysis.tokens = tokens;
        analysis
    }
}
