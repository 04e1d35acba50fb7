//! # Reactbot Catalog Command
//!
//! File: cli/src/commands/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `reactbot catalog` lists the emoji the bot can answer with, one per line:
//! glyph, codepoint, sentiment score and name. `--keyword` narrows the list
//! to names containing that keyword.
//!
//! ```text
//! 😂  1F602    0.221  face with tears of joy
//! ❤  2764     0.746  red heart
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine;
use crate::engine::catalog::EmojiEntry;
use clap::Parser;

/// Arguments for `reactbot catalog`.
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Only list entries whose name contains this keyword (case-insensitive).
    #[arg(long, short)]
    pub keyword: Option<String>,
}

pub async fn handle_catalog(args: CatalogArgs, config: &Config) -> Result<()> {
    let catalog = engine::load_catalog(config)?;
    let entries: Vec<&EmojiEntry> = match args.keyword.as_deref() {
        Some(keyword) => catalog.with_keyword(keyword),
        None => catalog.entries().iter().collect(),
    };

    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    println!("{} of {} catalog entries", entries.len(), catalog.len());
    Ok(())
}

fn format_entry(entry: &EmojiEntry) -> String {
    format!(
        "{}  {:<8} {:>6.3}  {}",
        entry.glyph().unwrap_or('?'),
        entry.sequence,
        entry.score,
        entry.name.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_entry_columns() {
        let entry = EmojiEntry {
            sequence: "1F600".into(),
            score: 0.571,
            name: Some("grinning face".into()),
        };
        assert_eq!(format_entry(&entry), "😀  1F600     0.571  grinning face");
    }
}
