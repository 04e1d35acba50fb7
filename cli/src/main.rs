//! # Reactbot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the reactbot CLI, a toy chat
//! bot that answers every message with emoji matching its mood. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration
//! - Routing execution to the appropriate command handler
//!
//! ## Examples
//!
//! ```bash
//! # Chat with the bot
//! reactbot chat
//!
//! # One-shot reply, reproducible and without the thinking pause
//! reactbot react --seed 1 --no-delay "what a lovely day"
//!
//! # See what the bot makes of a message
//! reactbot -v score "I do not like mondays"
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand logic (chat, react, score, catalog)
mod common; // Shared utilities (fs, notify, ui)
mod core; // Core infrastructure (errors, config)
mod engine; // Catalog, sentiment analysis and reaction selection
mod session; // Conversation log, thinking gate and the chat actor

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "reactbot",
    about = "A chat bot that only speaks emoji",
    long_about = "Talk to a bot that answers every message with emoji matching its mood.\n\
                  Sentiment is scored with a word list and mapped onto an emoji-sentiment table.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the project `.reactbot.toml`.
    #[arg(long, global = true, env = "REACTBOT_CONFIG")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Chat with the bot.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// React to a single message and exit.
    #[command(alias = "r")]
    React(commands::react::ReactArgs),
    /// Show the sentiment analysis of a message.
    Score(commands::score::ScoreArgs),
    /// List the emoji the bot can answer with.
    Catalog(commands::catalog::CatalogArgs),
}

async fn run(cli: Cli) -> crate::core::error::Result<()> {
    let config = crate::core::config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
        Commands::React(args) => commands::react::handle_react(args, &config).await,
        Commands::Score(args) => commands::score::handle_score(args, &config).await,
        Commands::Catalog(args) => commands::catalog::handle_catalog(args, &config).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_aliases_and_global_flags() {
        let cli = Cli::parse_from(["reactbot", "-vv", "r", "--no-delay", "hello", "there"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::React(args) => {
                assert!(args.no_delay);
                assert_eq!(args.text, vec!["hello", "there"]);
            }
            other => panic!("expected react, got {:?}", other),
        }

        let cli = Cli::parse_from(["reactbot", "c", "--seed", "7"]);
        assert!(matches!(cli.command, Commands::Chat(ref a) if a.seed == Some(7)));
    }
}
