//! # Emoji Catalog
//!
//! File: cli/src/engine/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Builds the immutable working set of emoji the bot may reply with. The
//! catalog is built once at startup from two external sources:
//!
//! - a raw emoji-sentiment table (`sequence` + `score` pairs), and
//! - a codepoint name index (`NameIndex`), used only during the build.
//!
//! Each raw entry is named through the index and then kept only if its name
//! contains one of the thematic keywords (case-insensitive substring match).
//! Entries the index cannot name are dropped without error.
//!
//! ## Examples
//!
//! ```rust
//! let raw = catalog::load_table(None)?;
//! let catalog = catalog::build_catalog(&raw, &UnicodeNameIndex, &DEFAULT_KEYWORDS);
//! for entry in catalog.iter() {
//!     println!("{} {}", entry.glyph().unwrap_or('?'), entry.name.as_deref().unwrap_or(""));
//! }
//! ```
//!
use crate::common::fs::io::{read_data_source, LoadedSource};
use crate::core::error::{ReactbotError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Keywords an emoji name must contain (any one of them) to enter the catalog.
pub const DEFAULT_KEYWORDS: [&str; 9] = [
    "face",
    "heart",
    "kiss",
    "cat",
    "monkey",
    "bomb",
    "collision",
    "hand",
    "man",
];

/// The emoji-sentiment table shipped with the binary.
const BUNDLED_TABLE: &str = include_str!("../../data/emoji_sentiment.toml");
const BUNDLED_TABLE_NAME: &str = "bundled emoji-sentiment table";

/// One row of the raw emoji-sentiment table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawEmoji {
    /// Hexadecimal codepoint, without a `0x` prefix (e.g. `1F600`).
    pub sequence: String,
    pub score: f64,
    /// How many samples the score was computed from. Informational only.
    #[serde(default)]
    pub occurrences: Option<u64>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawTableFile {
    #[serde(default)]
    emoji: Vec<RawEmoji>,
}

/// An emoji eligible for replies.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiEntry {
    pub sequence: String,
    pub score: f64,
    pub name: Option<String>,
}

impl EmojiEntry {
    /// The displayable character for this entry's codepoint.
    pub fn glyph(&self) -> Option<char> {
        decode_codepoint(&self.sequence)
    }
}

/// Decodes a hexadecimal codepoint (`"1F600"`) into its character.
///
/// Returns `None` for non-hex input and for values that are not Unicode
/// scalar values (surrogates, out of range).
pub fn decode_codepoint(sequence: &str) -> Option<char> {
    let trimmed = sequence.trim();
    if trimmed.is_empty() {
        return None;
    }
    u32::from_str_radix(trimmed, 16)
        .ok()
        .and_then(char::from_u32)
}

/// Lookup from a codepoint identifier to a descriptive name.
pub trait NameIndex {
    fn name_of(&self, codepoint: &str) -> Option<String>;
}

/// Names emoji using the CLDR short names from the `emojis` crate.
///
/// Codepoints that are only emoji in their fully-qualified form (e.g. `263A`,
/// which needs a trailing VS16) are retried with `U+FE0F` appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeNameIndex;

impl NameIndex for UnicodeNameIndex {
    fn name_of(&self, codepoint: &str) -> Option<String> {
        let glyph = decode_codepoint(codepoint)?;
        let bare = glyph.to_string();
        emojis::get(&bare)
            .or_else(|| emojis::get(&format!("{bare}\u{FE0F}")))
            .map(|emoji| emoji.name().to_string())
    }
}

/// Exact-match lookup, keyed by codepoint string.
impl NameIndex for HashMap<String, String> {
    fn name_of(&self, codepoint: &str) -> Option<String> {
        self.get(codepoint).cloned()
    }
}

/// The filtered, read-only set of emoji used by the reaction engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<EmojiEntry>,
}

impl Catalog {
    pub fn entries(&self) -> &[EmojiEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmojiEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name contains `keyword` (case-insensitive).
    pub fn with_keyword(&self, keyword: &str) -> Vec<&EmojiEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                entry
                    .name
                    .as_deref()
                    .is_some_and(|name| matches_any_keyword(name, &[keyword]))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EmojiEntry;
    type IntoIter = std::slice::Iter<'a, EmojiEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Case-insensitive substring match against any keyword.
pub fn matches_any_keyword<S: AsRef<str>>(name: &str, keywords: &[S]) -> bool {
    let name = name.to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(&keyword.as_ref().to_lowercase()))
}

/// # Build Catalog (`build_catalog`)
///
/// Names every raw entry through `index` and keeps the entries whose name is
/// non-empty and matches at least one keyword. Input order is preserved and
/// the result depends only on the inputs.
pub fn build_catalog<I, S>(raw: &[RawEmoji], index: &I, keywords: &[S]) -> Catalog
where
    I: NameIndex + ?Sized,
    S: AsRef<str>,
{
    let entries: Vec<EmojiEntry> = raw
        .iter()
        .map(|row| EmojiEntry {
            sequence: row.sequence.clone(),
            score: row.score,
            name: index.name_of(&row.sequence),
        })
        .filter(|entry| match entry.name.as_deref() {
            Some(name) if !name.is_empty() => matches_any_keyword(name, keywords),
            _ => {
                debug!("Dropping unnamed emoji sequence {}", entry.sequence);
                false
            }
        })
        .collect();

    info!(
        "Built emoji catalog: {} of {} table entries kept",
        entries.len(),
        raw.len()
    );
    Catalog { entries }
}

/// Parses an emoji-sentiment table in TOML form (`[[emoji]]` tables).
pub fn parse_table(content: &str, source_name: &str) -> Result<Vec<RawEmoji>> {
    let file: RawTableFile = toml::from_str(content).map_err(|e| ReactbotError::DataFormat {
        source_name: source_name.to_string(),
        reason: e.message().to_string(),
    })?;
    if let Some(bad) = file.emoji.iter().find(|row| !row.score.is_finite()) {
        return Err(ReactbotError::DataFormat {
            source_name: source_name.to_string(),
            reason: format!("score for sequence {} is not finite", bad.sequence),
        }
        .into());
    }
    Ok(file.emoji)
}

/// Loads the emoji-sentiment table from `path`, or the bundled table when `None`.
pub fn load_table(path: Option<&Path>) -> Result<Vec<RawEmoji>> {
    let LoadedSource { name, content } =
        read_data_source(path, BUNDLED_TABLE_NAME, BUNDLED_TABLE)?;
    let rows = parse_table(&content, &name)?;
    debug!("Loaded {} rows from {}", rows.len(), name);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(sequence: &str, score: f64) -> RawEmoji {
        RawEmoji {
            sequence: sequence.to_string(),
            score,
            occurrences: None,
        }
    }

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decodes_hex_codepoints() {
        assert_eq!(decode_codepoint("1F600"), Some('😀'));
        assert_eq!(decode_codepoint("1f600"), Some('😀'));
        assert_eq!(decode_codepoint("2764"), Some('\u{2764}'));
        assert_eq!(decode_codepoint("D800"), None); // surrogate
        assert_eq!(decode_codepoint("110000"), None); // out of range
        assert_eq!(decode_codepoint("zz"), None);
        assert_eq!(decode_codepoint(""), None);
    }

    #[test]
    fn keeps_keyword_matches_in_input_order() {
        let table = vec![
            raw("1F622", -0.8),
            raw("1F389", 0.7),
            raw("1F600", 0.9),
            raw("1F431", 0.5),
        ];
        let index = names(&[
            ("1F622", "crying face"),
            ("1F389", "party popper"),
            ("1F600", "grinning face"),
            ("1F431", "Cat Face"),
        ]);

        let catalog = build_catalog(&table, &index, &DEFAULT_KEYWORDS);
        let kept: Vec<&str> = catalog.iter().map(|e| e.sequence.as_str()).collect();
        assert_eq!(kept, vec!["1F622", "1F600", "1F431"]);
        assert_eq!(catalog.entries()[2].name.as_deref(), Some("Cat Face"));
    }

    #[test]
    fn drops_entries_without_names() {
        let table = vec![raw("1F600", 0.9), raw("ABCDE", 0.1), raw("1F622", -0.8)];
        let index = names(&[("1F600", "grinning face"), ("1F622", "")]);

        let catalog = build_catalog(&table, &index, &DEFAULT_KEYWORDS);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].sequence, "1F600");
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        assert!(matches_any_keyword("WOMAN DANCING", &["man"]));
        assert!(matches_any_keyword("backhand index pointing right", &DEFAULT_KEYWORDS));
        assert!(matches_any_keyword("Collision", &["COLLISION"]));
        assert!(!matches_any_keyword("party popper", &DEFAULT_KEYWORDS));
    }

    #[test]
    fn build_is_idempotent() {
        let table = load_table(None).unwrap();
        let first = build_catalog(&table, &UnicodeNameIndex, &DEFAULT_KEYWORDS);
        let second = build_catalog(&table, &UnicodeNameIndex, &DEFAULT_KEYWORDS);
        assert_eq!(first, second);
    }

    #[test]
    fn bundled_catalog_satisfies_keyword_invariant() {
        let table = load_table(None).unwrap();
        let catalog = build_catalog(&table, &UnicodeNameIndex, &DEFAULT_KEYWORDS);

        assert!(!catalog.is_empty());
        assert!(catalog.len() < table.len());
        for entry in &catalog {
            let name = entry.name.as_deref().expect("catalog entry without a name");
            assert!(!name.is_empty());
            assert!(
                matches_any_keyword(name, &DEFAULT_KEYWORDS),
                "{name} matches no keyword"
            );
            assert!(entry.glyph().is_some());
        }
    }

    #[test]
    fn unicode_index_names_common_emoji() {
        assert_eq!(
            UnicodeNameIndex.name_of("1F600").as_deref(),
            Some("grinning face")
        );
        assert!(UnicodeNameIndex.name_of("0041").is_none()); // 'A'
        assert!(UnicodeNameIndex.name_of("not-hex").is_none());
    }

    #[test]
    fn with_keyword_filters_catalog() {
        let table = vec![raw("1F600", 0.9), raw("1F431", 0.5)];
        let index = names(&[("1F600", "grinning face"), ("1F431", "cat face")]);
        let catalog = build_catalog(&table, &index, &DEFAULT_KEYWORDS);

        assert_eq!(catalog.with_keyword("face").len(), 2);
        assert_eq!(catalog.with_keyword("CAT").len(), 1);
        assert!(catalog.with_keyword("bomb").is_empty());
    }

    #[test]
    fn parse_table_reports_bad_input() {
        let err = parse_table("[[emoji]]\nsequence = 1\n", "test table").unwrap_err();
        assert!(err.to_string().contains("test table"));

        let rows = parse_table(
            "[[emoji]]\nsequence = \"1F600\"\nscore = 0.5\noccurrences = 3\n",
            "test table",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].occurrences, Some(3));

        assert!(parse_table("", "empty").unwrap().is_empty());
    }
}
