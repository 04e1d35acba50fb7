//! # Reactbot Score Command
//!
//! File: cli/src/commands/score.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `reactbot score <TEXT>...` shows how the analyzer sees a message: the raw
//! score, the per-token comparative score, the target the reaction engine
//! would aim for, and the words that contributed.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine;
use crate::engine::reaction::transform_range;
use crate::engine::sentiment::{Analysis, SentimentAnalyzer};
use clap::Parser;

/// Arguments for `reactbot score`.
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// The message to analyze.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

pub async fn handle_score(args: ScoreArgs, config: &Config) -> Result<()> {
    let analyzer = engine::load_analyzer(config)?;
    let analysis = analyzer.analyze(&args.text.join(" "));
    println!("{}", format_analysis(&analysis));
    Ok(())
}

fn word_list(words: &[String]) -> String {
    if words.is_empty() {
        "-".to_string()
    } else {
        words.join(", ")
    }
}

fn format_analysis(analysis: &Analysis) -> String {
    format!(
        "score: {}\ncomparative: {:.4}\ntarget: {:.3}\npositive: {}\nnegative: {}",
        analysis.score,
        analysis.comparative,
        transform_range(f64::from(analysis.score)),
        word_list(&analysis.positive),
        word_list(&analysis.negative),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_all_fields() {
        let analysis = Analysis {
            score: 3,
            comparative: 0.75,
            tokens: vec!["a".into(), "good".into(), "day".into(), "indeed".into()],
            positive: vec!["good".into()],
            negative: vec![],
        };
        assert_eq!(
            format_analysis(&analysis),
            "score: 3\ncomparative: 0.7500\ntarget: 0.600\npositive: good\nnegative: -"
        );
    }
}
