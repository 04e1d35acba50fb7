//! # Reactbot Terminal UI (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The display half of the chat: formatting messages, the "thinking"
//! indicator, and short notices. Formatting is split from printing so the
//! layout can be tested without capturing stdout.
//!
//! ```text
//! /b/stupid-bot: Hi!
//! /b/me: what a lovely day
//! /b/stupid-bot is thinking...
//! /b/stupid-bot: 😍😊💕
//! ```
//!
use crate::session::Message;

/// `sender: text`
pub fn format_message(message: &Message) -> String {
    format!("{}: {}", message.sender, message.text)
}

pub fn format_thinking(sender: &str) -> String {
    format!("{} is thinking...", sender)
}

/// Prints a message on its own line.
pub fn print_message(message: &Message) {
    println!("{}", format_message(message));
}

/// Prints the thinking indicator.
pub fn print_thinking(sender: &str) {
    println!("{}", format_thinking(sender));
}

/// Prints a short notice to stderr, keeping stdout for the conversation.
pub fn print_notice(text: &str) {
    eprintln!("({})", text);
}
