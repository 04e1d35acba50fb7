//! # Reactbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the reactbot CLI. Each module
//! defines its own `clap` argument struct and an async `handle_*` function
//! that `main.rs` routes to.
//!
//! ## Command Groups
//!
//! - `chat`: The interactive chat session
//! - `react`: One-shot reaction to a single message
//! - `score`: Sentiment analysis of a message
//! - `catalog`: Listing of the emoji catalog
//!

/// Interactive chat session on stdin/stdout.
pub mod chat;
/// Lists the emoji catalog, optionally filtered by keyword.
pub mod catalog;
/// Reacts to a single message and exits.
pub mod react;
/// Prints the sentiment analysis of a message.
pub mod score;
