//! # Reactbot Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared utilities that sit around the reaction engine rather than inside it:
//!
//! - **`fs`**: Reading data files, with bundled fallbacks.
//! - **`notify`**: Out-of-band notifications (the welcome banner).
//! - **`ui`**: Terminal rendering of the conversation.
//!
//! ```rust
//! use crate::common::{notify, ui};
//!
//! ui::print_message(&message);
//! notify::TerminalNotifier::detect().present(&welcome)?;
//! ```
//!

/// Data file reading (`io::read_data_source`).
pub mod fs;
/// Out-of-band notifications (`Notifier`, `TerminalNotifier`).
pub mod notify;
/// Terminal rendering of messages and notices.
pub mod ui;
