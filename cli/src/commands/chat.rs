//! # Reactbot Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `reactbot chat` runs the interactive session: every line typed on stdin is
//! a message, and the bot answers each one with emoji after a short
//! "thinking" pause. Lines typed while the bot is still thinking are ignored.
//!
//! The session ends on end-of-input (Ctrl-D) or `/quit`. A reaction already
//! in flight is always delivered before exiting.
//!
//! ## Examples
//!
//! ```bash
//! reactbot chat
//! reactbot chat --seed 42 --no-delay
//! echo "I love rust" | reactbot chat --no-delay
//! ```
//!
use crate::common::notify::{Notification, Notifier, TerminalNotifier, WELCOME_TITLE};
use crate::common::ui;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine;
use crate::session::conversation::{Conversation, Submission};
use crate::session::{Senders, Session};
use anyhow::Context;
use clap::Parser;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Typed on its own line, ends the session.
const QUIT_COMMAND: &str = "/quit";

/// Arguments for `reactbot chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Seed for the random source, for reproducible replies.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reply immediately instead of simulating thinking time.
    #[arg(long)]
    pub no_delay: bool,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Builds the engine, sends the welcome notification, greets, and then runs
/// the conversation over stdin until end-of-input.
pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if args.no_delay {
        config.delay.min_ms = 0;
        config.delay.max_ms = 0;
    }

    let engine = Arc::new(engine::build_engine(&config)?);

    if config.session.notifications {
        send_welcome(&TerminalNotifier::detect(), &config.session.welcome);
    }

    let session = Session::new(Senders::from(&config.session));
    let mut chat = Conversation::new(session, engine, engine::make_rng(args.seed));
    ui::print_message(chat.greet(&config.session.greeting));

    run_chat(&mut chat, BufReader::new(tokio::io::stdin())).await?;
    info!(
        "Chat ended after {} messages",
        chat.session().messages().len()
    );
    Ok(())
}

/// Presents the welcome notification. Failure is logged, never fatal.
fn send_welcome(notifier: &dyn Notifier, body: &str) {
    let notification = Notification::new(WELCOME_TITLE, body);
    if let Err(e) = notifier.present(&notification) {
        warn!("Could not show welcome notification: {}", e);
    }
}

/// Runs the conversation loop over `input` until it is exhausted.
///
/// Input lines and reaction deliveries are awaited together, so a pending
/// reaction never blocks reading (and rejecting) further input.
pub async fn run_chat<R>(chat: &mut Conversation, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read chat input")? else {
                    break;
                };
                if handle_line(chat, &line)?.is_break() {
                    break;
                }
            }
            Some(reply) = chat.recv_reply(), if chat.is_pending() => {
                ui::print_message(chat.deliver(&reply));
            }
        }
    }

    if let Some(message) = chat.settle().await {
        ui::print_message(message);
    }
    Ok(())
}

fn handle_line(chat: &mut Conversation, line: &str) -> Result<ControlFlow<()>> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(ControlFlow::Continue(()));
    }
    if text == QUIT_COMMAND {
        return Ok(ControlFlow::Break(()));
    }

    match chat.submit(text)? {
        Submission::Scheduled { delay } => {
            debug!("Reply due in {:?}", delay);
            if let Some(message) = chat.session().messages().last() {
                ui::print_message(message);
            }
            ui::print_thinking(&chat.session().senders().bot);
        }
        Submission::Rejected => {
            ui::print_notice("still thinking, message ignored");
        }
    }
    Ok(ControlFlow::Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reaction::{DelayRange, ReactionEngine, ReactionSettings};
    use crate::engine::sentiment::{Analysis, SentimentAnalyzer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    struct Neutral;

    impl SentimentAnalyzer for Neutral {
        fn analyze(&self, _text: &str) -> Analysis {
            Analysis::default()
        }
    }

    fn empty_catalog_chat(delay: DelayRange) -> Conversation {
        let settings = ReactionSettings {
            delay,
            ..ReactionSettings::default()
        };
        let engine = ReactionEngine::new(Arc::default(), Arc::new(Neutral), settings);
        Conversation::new(
            Session::new(Senders::default()),
            Arc::new(engine),
            StdRng::seed_from_u64(0),
        )
    }

    #[tokio::test]
    async fn every_accepted_line_gets_a_reply() {
        let mut chat = empty_catalog_chat(DelayRange::none());
        run_chat(&mut chat, "hello\n".as_bytes()).await.unwrap();

        let texts: Vec<&str> = chat
            .session()
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["hello", "I dont know that!"]);
        assert!(!chat.is_pending());
    }

    #[tokio::test]
    async fn lines_during_thinking_are_dropped() {
        let mut chat = empty_catalog_chat(DelayRange::from_millis(200, 300));
        run_chat(&mut chat, "one\ntwo\nthree\n".as_bytes())
            .await
            .unwrap();

        let messages = chat.session().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "one");
        assert_eq!(messages[1].sender, "/b/stupid-bot");
    }

    #[tokio::test]
    async fn quit_and_blank_lines() {
        let mut chat = empty_catalog_chat(DelayRange::none());
        run_chat(&mut chat, "\n   \n/quit\nnever sent\n".as_bytes())
            .await
            .unwrap();
        assert!(chat.session().messages().is_empty());
    }

    struct RecordingNotifier(RefCell<Vec<Notification>>);

    impl Notifier for RecordingNotifier {
        fn present(&self, notification: &Notification) -> Result<()> {
            self.0.borrow_mut().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn welcome_notification_uses_fixed_title() {
        let notifier = RecordingNotifier(RefCell::new(Vec::new()));
        send_welcome(&notifier, "Welcome. Talk to me, please!");
        let sent = notifier.0.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Chat-it reminder");
        assert_eq!(sent[0].body, "Welcome. Talk to me, please!");
    }

    #[test]
    fn failed_welcome_is_not_fatal() {
        struct Failing;
        impl Notifier for Failing {
            fn present(&self, _: &Notification) -> Result<()> {
                anyhow::bail!("no terminal")
            }
        }
        send_welcome(&Failing, "hi");
    }
}
