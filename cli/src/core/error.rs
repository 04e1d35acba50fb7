//! # Reactbot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout reactbot. Most of the
//! application propagates `anyhow::Error`, and `ReactbotError` gives the
//! failures callers may want to match on a concrete, displayable shape.
//!
//! ## Architecture
//!
//! - `ReactbotError`: A `thiserror` enum for the specific failure kinds.
//! - `Result<T>`: A type alias for `anyhow::Result<T>`.
//!
//! Note that an empty candidate set while reacting is *not* an error: the
//! reaction engine answers with its fallback reply instead. Likewise, emoji
//! whose name cannot be resolved are dropped from the catalog silently.
//!
//! ## Examples
//!
//! ```rust
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read emoji table: {}", path.display()))?;
//!
//! // Detect a gated submission
//! match session.append_user_message("hello") {
//!     Err(e) if matches!(e.downcast_ref::<ReactbotError>(), Some(ReactbotError::ReactionPending)) => {
//!         println!("Still thinking...");
//!     }
//!     other => { other?; }
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the reactbot application.
#[derive(Error, Debug)]
pub enum ReactbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data in {source_name}: {reason}")]
    DataFormat { source_name: String, reason: String },

    #[error("Invalid lexicon entry on line {line}: {reason}")]
    Lexicon { line: usize, reason: String },

    #[error("Still thinking about the previous message.")]
    ReactionPending,

    #[error("Notifications unavailable: {0}")]
    NotificationUnavailable(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = ReactbotError::Config("delay.min_ms exceeds delay.max_ms".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: delay.min_ms exceeds delay.max_ms"
        );

        let lexicon_err = ReactbotError::Lexicon {
            line: 12,
            reason: "score 'abc' is not an integer".into(),
        };
        assert_eq!(
            lexicon_err.to_string(),
            "Invalid lexicon entry on line 12: score 'abc' is not an integer"
        );

        assert_eq!(
            ReactbotError::ReactionPending.to_string(),
            "Still thinking about the previous message."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReactbotError = io.into();
        assert!(matches!(err, ReactbotError::Io { .. }));
        assert!(err.to_string().contains("gone"));
    }
}
