//! # Conversation Actor
//!
//! File: cli/src/session/conversation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives one `Session` against a shared `ReactionEngine`. A submitted message
//! is appended, the thinking gate is raised, and the reaction is scheduled on
//! the tokio timer. The reply comes back over a channel and is appended by
//! the actor itself, which then lowers the gate.
//!
//! ```text
//! submit("hi") ──> append user msg ──> set_pending(true) ──> spawn(sleep; react)
//!                                                                  │
//! recv_reply() <────────────────── mpsc channel <──────────────────┘
//!      └──> deliver(): append bot msg, set_pending(false)
//! ```
//!
//! Scheduled reactions cannot be cancelled; every one of them is delivered.
//!
use crate::core::error::{ReactbotError, Result};
use crate::engine::reaction::ReactionEngine;
use crate::session::{Message, Session};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Outcome of a user submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The message was appended and a reaction will arrive after `delay`.
    Scheduled { delay: Duration },
    /// The bot was still thinking; nothing was appended or scheduled.
    Rejected,
}

/// Single owner of a chat session and its in-flight reaction.
pub struct Conversation {
    session: Session,
    engine: Arc<ReactionEngine>,
    rng: StdRng,
    replies_tx: mpsc::Sender<String>,
    replies_rx: mpsc::Receiver<String>,
}

impl Conversation {
    pub fn new(session: Session, engine: Arc<ReactionEngine>, rng: StdRng) -> Self {
        // One slot is enough: at most one reaction is ever in flight.
        let (replies_tx, replies_rx) = mpsc::channel(1);
        Self {
            session,
            engine,
            rng,
            replies_tx,
            replies_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// Posts the opening greeting.
    pub fn greet(&mut self, text: &str) -> &Message {
        self.session.greet(text)
    }

    /// Submits a user message and schedules the bot's reaction.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> Result<Submission> {
        match self.session.append_user_message(text) {
            Ok(_) => {}
            Err(e) if matches!(
                e.downcast_ref::<ReactbotError>(),
                Some(ReactbotError::ReactionPending)
            ) =>
            {
                return Ok(Submission::Rejected);
            }
            Err(e) => return Err(e),
        }
        // Gate goes up before anything is scheduled.
        self.session.set_pending(true);

        let delay = self.engine.thinking_delay(&mut self.rng);
        let mut task_rng = StdRng::seed_from_u64(self.rng.gen());
        let engine = Arc::clone(&self.engine);
        let replies = self.replies_tx.clone();
        let text = text.to_string();

        debug!("Scheduling reaction in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = engine.react(&text, &mut task_rng);
            if replies.send(reply).await.is_err() {
                debug!("Conversation dropped before the reply was delivered");
            }
        });

        Ok(Submission::Scheduled { delay })
    }

    /// Waits for the pending reaction. Returns `None` if nothing is pending.
    pub async fn recv_reply(&mut self) -> Option<String> {
        if !self.session.is_pending() {
            return None;
        }
        self.replies_rx.recv().await
    }

    /// Appends a received reply and lowers the thinking gate.
    pub fn deliver(&mut self, reply: &str) -> &Message {
        info!("Bot replied: {}", reply);
        self.session.set_pending(false);
        self.session.append_bot_message(reply)
    }

    /// Waits for and delivers the pending reaction, if any.
    pub async fn settle(&mut self) -> Option<&Message> {
        let reply = self.recv_reply().await?;
        Some(self.deliver(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{build_catalog, RawEmoji, DEFAULT_KEYWORDS};
    use crate::engine::reaction::{DelayRange, ReactionSettings};
    use crate::engine::sentiment::{Analysis, SentimentAnalyzer};
    use crate::session::Senders;
    use std::collections::HashMap;

    struct FixedScore(i32);

    impl SentimentAnalyzer for FixedScore {
        fn analyze(&self, _text: &str) -> Analysis {
            Analysis {
                score: self.0,
                ..Analysis::default()
            }
        }
    }

    fn conversation(delay: DelayRange) -> Conversation {
        let raw = vec![RawEmoji {
            sequence: "1F600".into(),
            score: 0.9,
            occurrences: None,
        }];
        let names: HashMap<String, String> =
            [("1F600".to_string(), "grinning face".to_string())]
                .into_iter()
                .collect();
        let catalog = build_catalog(&raw, &names, &DEFAULT_KEYWORDS);
        let settings = ReactionSettings {
            delay,
            ..ReactionSettings::default()
        };
        let engine = ReactionEngine::new(Arc::new(catalog), Arc::new(FixedScore(3)), settings);
        Conversation::new(
            Session::new(Senders::default()),
            Arc::new(engine),
            StdRng::seed_from_u64(1),
        )
    }

    #[tokio::test]
    async fn reply_is_delivered_and_gate_cleared() {
        let mut chat = conversation(DelayRange::none());
        chat.greet("Hi!");

        let submission = chat.submit("great").unwrap();
        assert_eq!(
            submission,
            Submission::Scheduled {
                delay: Duration::ZERO
            }
        );
        assert!(chat.is_pending());

        let reply = chat.settle().await.expect("a reply").clone();
        assert_eq!(reply.text, "😀😀😀");
        assert_eq!(reply.sender, "/b/stupid-bot");
        assert_eq!(reply.key, "2");
        assert!(!chat.is_pending());
    }

    #[tokio::test]
    async fn submission_while_thinking_is_rejected() {
        let mut chat = conversation(DelayRange::from_millis(40, 60));

        assert!(matches!(
            chat.submit("first").unwrap(),
            Submission::Scheduled { .. }
        ));
        assert_eq!(chat.submit("second").unwrap(), Submission::Rejected);
        assert_eq!(chat.session().messages().len(), 1);

        chat.settle().await.expect("a reply");
        assert_eq!(chat.session().messages().len(), 2);

        // Only one reaction was scheduled: nothing else is waiting.
        assert!(chat.recv_reply().await.is_none());

        assert!(matches!(
            chat.submit("third").unwrap(),
            Submission::Scheduled { .. }
        ));
        chat.settle().await.expect("a reply");
        let texts: Vec<&str> = chat
            .session()
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "😀😀😀", "third", "😀😀😀"]);
    }

    #[tokio::test]
    async fn delay_is_drawn_from_configured_range() {
        let mut chat = conversation(DelayRange::from_millis(400, 1400));
        match chat.submit("hello").unwrap() {
            Submission::Scheduled { delay } => {
                assert!(delay >= Duration::from_millis(400));
                assert!(delay < Duration::from_millis(1400));
            }
            Submission::Rejected => panic!("first submission must be scheduled"),
        }
    }

    #[tokio::test]
    async fn settle_without_pending_returns_none() {
        let mut chat = conversation(DelayRange::none());
        assert!(chat.settle().await.is_none());
    }
}
