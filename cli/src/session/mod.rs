//! # Chat Session State
//!
//! File: cli/src/session/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The conversation log and the "thinking" gate, owned by a single actor.
//! All mutation goes through `append_user_message`, `append_bot_message` and
//! `set_pending`; nothing else touches the log.
//!
//! - The log is append-only. A message's `key` is the log length at the time
//!   it was appended, except for the opening greeting, keyed `"first"`.
//! - While a reaction is pending, user messages are rejected with
//!   `ReactbotError::ReactionPending` and the log is left untouched.
//!
//! The async side (timers, channels) lives in `conversation`.
//!
use crate::core::config::SessionConfig;
use crate::core::error::{ReactbotError, Result};
use tracing::debug;

pub mod conversation;

/// Key given to the bot's opening greeting.
pub const GREETING_KEY: &str = "first";

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub text: String,
    pub key: String,
}

/// Sender identifiers for both sides of the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Senders {
    pub bot: String,
    pub user: String,
}

impl Default for Senders {
    fn default() -> Self {
        let defaults = SessionConfig::default();
        Self::from(&defaults)
    }
}

impl From<&SessionConfig> for Senders {
    fn from(config: &SessionConfig) -> Self {
        Self {
            bot: config.bot_sender.clone(),
            user: config.user_sender.clone(),
        }
    }
}

/// The conversation log plus the single in-flight gate.
#[derive(Debug, Default)]
pub struct Session {
    senders: Senders,
    log: Vec<Message>,
    pending: bool,
}

impl Session {
    pub fn new(senders: Senders) -> Self {
        Self {
            senders,
            log: Vec::new(),
            pending: false,
        }
    }

    /// Posts the bot's opening line.
    pub fn greet(&mut self, text: &str) -> &Message {
        let sender = self.senders.bot.clone();
        self.push(sender, text, GREETING_KEY.to_string())
    }

    /// Appends a user message, unless a reaction is still pending.
    ///
    /// # Errors
    ///
    /// `ReactbotError::ReactionPending` while the bot is thinking.
    pub fn append_user_message(&mut self, text: &str) -> Result<&Message> {
        if self.pending {
            debug!("Rejected user message while a reaction is pending");
            return Err(ReactbotError::ReactionPending.into());
        }
        let sender = self.senders.user.clone();
        let key = self.log.len().to_string();
        Ok(self.push(sender, text, key))
    }

    pub fn append_bot_message(&mut self, text: &str) -> &Message {
        let sender = self.senders.bot.clone();
        let key = self.log.len().to_string();
        self.push(sender, text, key)
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[Message] {
        &self.log
    }

    pub fn senders(&self) -> &Senders {
        &self.senders
    }

    fn push(&mut self, sender: String, text: &str, key: String) -> &Message {
        self.log.push(Message {
            sender,
            text: text.to_string(),
            key,
        });
        &self.log[self.log.len() - 1]
    }
}
