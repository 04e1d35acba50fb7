//! # Reactbot Notifications (`common::notify`)
//!
//! File: cli/src/common/notify/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Out-of-band delivery of the welcome message when a chat starts. It is
//! independent of the reaction engine: a failed notification is logged and
//! the chat carries on.
//!
//! The terminal notifier writes a boxed banner to stderr, and only does so
//! when stderr is an interactive terminal. Otherwise it reports
//! `ReactbotError::NotificationUnavailable`.
//!
use crate::core::error::{ReactbotError, Result};
use std::io::{self, IsTerminal, Write};
use tracing::debug;

/// Title used for the welcome notification.
pub const WELCOME_TITLE: &str = "Chat-it reminder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// A channel that can present a notification to the user.
pub trait Notifier {
    fn present(&self, notification: &Notification) -> Result<()>;
}

/// Presents notifications as a banner on stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    interactive: bool,
}

impl TerminalNotifier {
    /// Detects whether stderr is a terminal.
    pub fn detect() -> Self {
        Self {
            interactive: io::stderr().is_terminal(),
        }
    }
}

/// Renders the banner text for a notification.
pub fn render_banner(notification: &Notification) -> String {
    let width = notification
        .title
        .chars()
        .count()
        .max(notification.body.chars().count())
        + 2;
    let rule = "-".repeat(width);
    format!(
        "+{rule}+\n| {:<w$} |\n| {:<w$} |\n+{rule}+",
        notification.title,
        notification.body,
        w = width - 2
    )
}

impl Notifier for TerminalNotifier {
    fn present(&self, notification: &Notification) -> Result<()> {
        if !self.interactive {
            return Err(ReactbotError::NotificationUnavailable(
                "stderr is not an interactive terminal".to_string(),
            )
            .into());
        }
        debug!("Presenting notification: {}", notification.title);
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", render_banner(notification)).map_err(ReactbotError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_frames_title_and_body() {
        let banner = render_banner(&Notification::new(WELCOME_TITLE, "Welcome. Talk to me, please!"));
        let lines: Vec<&str> = banner.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], lines[3]);
        assert!(lines[1].contains(WELCOME_TITLE));
        assert!(lines[2].contains("Welcome. Talk to me, please!"));
        assert_eq!(lines[1].chars().count(), lines[0].chars().count());
    }

    #[test]
    fn non_interactive_terminal_is_unavailable() {
        let notifier = TerminalNotifier { interactive: false };
        let err = notifier
            .present(&Notification::new("t", "b"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReactbotError>(),
            Some(ReactbotError::NotificationUnavailable(_))
        ));
    }
}
