//! Conversation state machine.
//!
//! One turn runs `Idle -> Sending -> (Resolved | Fallback) -> Idle`. The
//! controller owns the log, so every turn appends in submission order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use folio_core::locale::{Locale, LocalizedStrings};
use folio_core::safety::InputGuard;

use crate::links::LinkRewriter;
use crate::responder::LocalResponder;
use crate::transport::{ChatBackend, TransportOutcome};
use crate::types::{ConversationLog, Message};

/// Agent reply appended when the guard rejects a submission.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input detected. Please use only text characters.";

/// Which branch a submission took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input, nothing appended.
    Ignored,
    /// A turn was already in flight, nothing appended.
    Busy,
    /// The guard refused the input; the invalid-input notice was appended.
    Rejected,
    /// An endpoint answered.
    Resolved,
    /// An endpoint answered HTTP 429; the localized notice was appended.
    RateLimited,
    /// An endpoint refused the message with its own explanation.
    ServerMessage,
    /// No endpoint answered; the local responder did.
    Fallback,
}

/// Read-only view of a controller's busy flag.
///
/// `submit` holds the controller exclusively for the whole turn, so an
/// interface that wants a typing indicator keeps one of these and polls it
/// while the turn is awaited.
#[derive(Debug, Clone)]
pub struct BusySignal(Arc<AtomicBool>);

impl BusySignal {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the busy flag when the turn ends, including when the turn's
/// future is dropped before completing.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one conversation over a [`ChatBackend`].
pub struct ConversationController<B: ChatBackend> {
    guard: InputGuard,
    responder: LocalResponder,
    rewriter: LinkRewriter,
    backend: B,
    log: ConversationLog,
    locale: Locale,
    busy: Arc<AtomicBool>,
}

impl<B: ChatBackend> ConversationController<B> {
    pub fn new(backend: B, locale: Locale) -> Self {
        Self {
            guard: InputGuard::new(),
            responder: LocalResponder::new(),
            rewriter: LinkRewriter::new(),
            backend,
            log: ConversationLog::new(),
            locale,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn busy_signal(&self) -> BusySignal {
        BusySignal(Arc::clone(&self.busy))
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn strings(&self) -> &'static LocalizedStrings {
        self.locale.strings()
    }

    pub fn welcome(&self) -> &'static str {
        self.strings().welcome
    }

    pub fn placeholder(&self) -> &'static str {
        self.strings().placeholder
    }

    pub fn pre_questions(&self) -> &'static [&'static str] {
        self.strings().pre_questions
    }

    /// Run one turn for a raw user submission.
    ///
    /// At most one attempt sequence runs per call. The exclusive borrow
    /// already serializes turns on one controller; the flag is what
    /// observers see through [`BusySignal`], and it is clear again when
    /// this returns or the future is dropped.
    pub async fn submit(&mut self, raw: &str) -> TurnOutcome {
        if raw.trim().is_empty() {
            return TurnOutcome::Ignored;
        }
        if self.is_busy() {
            debug!("Submission refused, a turn is in flight");
            return TurnOutcome::Busy;
        }

        let Some(sanitized) = self.guard.admit(raw) else {
            warn!("Rejected chat input");
            self.log.push(Message::agent(INVALID_INPUT_MESSAGE, false));
            return TurnOutcome::Rejected;
        };

        self.log.push(Message::user(sanitized.clone()));

        let outcome = {
            let _busy = BusyGuard::engage(&self.busy);
            self.backend.send(&sanitized, &self.locale).await
        };

        let (message, turn) = match outcome {
            TransportOutcome::Success {
                response,
                has_links,
            } => (
                Message::agent(self.rewriter.normalize(&response), has_links),
                TurnOutcome::Resolved,
            ),
            TransportOutcome::RateLimited => (
                Message::agent(self.locale.strings().rate_limit, false),
                TurnOutcome::RateLimited,
            ),
            TransportOutcome::ClientError { status, response } => {
                debug!(status, "Endpoint refused the message");
                (
                    Message::agent_inferred(self.rewriter.normalize(&response)),
                    TurnOutcome::ServerMessage,
                )
            }
            TransportOutcome::Exhausted { last } => {
                info!(error = %last, "All chat endpoints failed, answering locally");
                let fragment = self.responder.resolve(&sanitized);
                (
                    Message::agent_inferred(self.rewriter.normalize(fragment)),
                    TurnOutcome::Fallback,
                )
            }
        };

        self.log.push(message);
        turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::TransportFailure;
    use crate::types::Origin;

    /// Replays canned outcomes and records what it was sent.
    #[derive(Default)]
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<TransportOutcome>>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedBackend {
        fn with(outcomes: Vec<TransportOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, message: &str, locale: &Locale) -> TransportOutcome {
            self.sent
                .lock()
                .unwrap()
                .push((message.to_string(), locale.tag().to_string()));
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(TransportOutcome::Exhausted {
                    last: TransportFailure::Timeout,
                })
        }
    }

    /// Never answers.
    struct StalledBackend;

    #[async_trait]
    impl ChatBackend for StalledBackend {
        async fn send(&self, _message: &str, _locale: &Locale) -> TransportOutcome {
            std::future::pending::<TransportOutcome>().await
        }
    }

    fn success(response: &str, has_links: bool) -> TransportOutcome {
        TransportOutcome::Success {
            response: response.to_string(),
            has_links,
        }
    }

    fn controller(outcomes: Vec<TransportOutcome>) -> ConversationController<ScriptedBackend> {
        ConversationController::new(ScriptedBackend::with(outcomes), Locale::default())
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let mut c = controller(vec![]);
        assert_eq!(c.submit("   ").await, TurnOutcome::Ignored);
        assert!(c.log().is_empty());
        assert!(c.backend().sent().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_appends_notice_without_network() {
        let mut c = controller(vec![]);
        let turn = c.submit("<script>alert(1)</script>").await;

        assert_eq!(turn, TurnOutcome::Rejected);
        assert_eq!(c.log().len(), 1);
        let notice = c.log().last().unwrap();
        assert_eq!(notice.origin(), Origin::Agent);
        assert_eq!(notice.body(), INVALID_INPUT_MESSAGE);
        assert!(c.backend().sent().is_empty());
    }

    #[tokio::test]
    async fn test_success_is_rewritten_and_keeps_link_flag() {
        let mut c = controller(vec![success("<a href=\"#about\">x</a>", true)]);
        let turn = c.submit("Who is Gabriel?").await;

        assert_eq!(turn, TurnOutcome::Resolved);
        let messages = c.log().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].origin(), Origin::User);
        assert_eq!(messages[0].body(), "Who is Gabriel?");
        assert_eq!(messages[1].body(), "<a href=\"/#about\">x</a>");
        assert!(messages[1].produces_links());
    }

    #[tokio::test]
    async fn test_sanitized_text_and_locale_reach_backend() {
        let mut c = ConversationController::new(
            ScriptedBackend::with(vec![success("ok", false)]),
            Locale::new("tl"),
        );
        c.submit("  Sino si Gabriel?  ").await;
        assert_eq!(
            c.backend().sent(),
            vec![("Sino si Gabriel?".to_string(), "tl".to_string())]
        );
    }

    #[tokio::test]
    async fn test_rate_limit_appends_localized_notice() {
        let mut c = ConversationController::new(
            ScriptedBackend::with(vec![TransportOutcome::RateLimited]),
            Locale::new("zh"),
        );
        let turn = c.submit("hello").await;

        assert_eq!(turn, TurnOutcome::RateLimited);
        let notice = c.log().last().unwrap();
        assert_eq!(notice.body(), Locale::new("zh").strings().rate_limit);
        assert!(!notice.produces_links());
    }

    #[tokio::test]
    async fn test_client_error_message_is_shown() {
        let mut c = controller(vec![TransportOutcome::ClientError {
            status: 400,
            response: "Message too long. Maximum 500 characters.".to_string(),
        }]);
        assert_eq!(c.submit("hello").await, TurnOutcome::ServerMessage);
        assert_eq!(
            c.log().last().unwrap().body(),
            "Message too long. Maximum 500 characters."
        );
    }

    #[tokio::test]
    async fn test_exhausted_falls_back_to_local_responder() {
        let mut c = controller(vec![TransportOutcome::Exhausted {
            last: TransportFailure::Network("refused".to_string()),
        }]);
        let turn = c.submit("What projects has Gabriel done?").await;

        assert_eq!(turn, TurnOutcome::Fallback);
        let reply = c.log().last().unwrap();
        assert_eq!(
            reply.body(),
            LocalResponder::new().resolve("What projects has Gabriel done?")
        );
        assert!(reply.produces_links());
    }

    #[tokio::test]
    async fn test_three_turns_make_six_messages_in_order() {
        let mut c = controller(vec![
            success("first", false),
            TransportOutcome::RateLimited,
            success("third", false),
        ]);
        assert!(!c.is_busy());

        for text in ["one", "two", "three"] {
            c.submit(text).await;
            assert!(!c.is_busy());
        }

        let origins: Vec<Origin> = c.log().iter().map(Message::origin).collect();
        assert_eq!(
            origins,
            vec![
                Origin::User,
                Origin::Agent,
                Origin::User,
                Origin::Agent,
                Origin::User,
                Origin::Agent,
            ]
        );
        let bodies: Vec<&str> = c.log().iter().map(Message::body).collect();
        assert_eq!(bodies[0], "one");
        assert_eq!(bodies[1], "first");
        assert_eq!(bodies[4], "three");
        assert_eq!(bodies[5], "third");
    }

    #[tokio::test]
    async fn test_busy_submission_leaves_log_untouched() {
        let mut c = controller(vec![success("never", false)]);
        c.busy.store(true, Ordering::Release);
        assert_eq!(c.submit("hello").await, TurnOutcome::Busy);
        assert!(c.log().is_empty());
        assert!(c.backend().sent().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_turn_clears_busy() {
        let mut c = ConversationController::new(StalledBackend, Locale::default());
        let result = tokio::time::timeout(Duration::from_millis(20), c.submit("hello")).await;
        assert!(result.is_err());
        assert!(!c.is_busy());
        // The user message was logged before the attempt started.
        assert_eq!(c.log().len(), 1);
    }

    #[tokio::test]
    async fn test_busy_signal_is_set_while_turn_is_in_flight() {
        let mut c = ConversationController::new(StalledBackend, Locale::default());
        let signal = c.busy_signal();
        assert!(!signal.is_busy());

        {
            let turn = c.submit("hello");
            tokio::pin!(turn);
            tokio::select! {
                _ = &mut turn => panic!("stalled backend answered"),
                _ = tokio::time::sleep(Duration::from_millis(20)) => {}
            }
            assert!(signal.is_busy());
        }

        assert!(!signal.is_busy());
        assert!(!c.is_busy());
    }

    #[test]
    fn test_localized_helpers_follow_locale() {
        let mut c = controller(vec![]);
        assert_eq!(c.welcome(), Locale::default().strings().welcome);
        c.set_locale(Locale::new("tl"));
        assert_eq!(c.placeholder(), Locale::new("tl").strings().placeholder);
        assert_eq!(c.pre_questions().len(), 8);
        assert_eq!(c.locale().tag(), "tl");
    }
}
