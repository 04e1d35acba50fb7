//! # Reactbot React Command
//!
//! File: cli/src/commands/react.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `reactbot react <TEXT>...` answers a single message and exits. The words
//! are joined with spaces, so quoting is optional. Unless `--no-delay` is
//! given, the reply is held back for the configured thinking time, exactly
//! as in a chat.
//!
//! ```bash
//! reactbot react what a wonderful day
//! reactbot react --seed 7 --no-delay "I hate mondays"
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine;
use clap::Parser;
use crate::engine::reaction::DelayRange;
use tracing::debug;

/// Arguments for `reactbot react`.
#[derive(Parser, Debug)]
pub struct ReactArgs {
    /// The message to react to.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Seed for the random source, for reproducible replies.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reply immediately instead of simulating thinking time.
    #[arg(long)]
    pub no_delay: bool,
}

/// # Handle React Command (`handle_react`)
///
/// Builds the engine, waits out the thinking delay and prints the reply.
pub async fn handle_react(args: ReactArgs, config: &Config) -> Result<()> {
    let engine = engine::build_engine(config)?;
    let mut rng = engine::make_rng(args.seed);
    let text = args.text.join(" ");

    let range = if args.no_delay {
        DelayRange::none()
    } else {
        engine.settings().delay
    };
    let delay = range.sample(&mut rng);
    debug!("Thinking for {:?}", delay);
    tokio::time::sleep(delay).await;

    println!("{}", engine.react(&text, &mut rng));
    Ok(())
}
