//! Conversational core of the Folio chat widget.
//!
//! Resolves a visitor's question into an answer: the input guard screens the
//! message, the transport tries the remote chat endpoints in order, the local
//! responder answers when they all fail, and the link rewriter turns
//! in-page anchors into full routes before the answer joins the log.

pub mod controller;
pub mod error;
pub mod links;
pub mod responder;
pub mod transport;
pub mod types;

pub use controller::{BusySignal, ConversationController, TurnOutcome, INVALID_INPUT_MESSAGE};
pub use error::{ChatError, TransportFailure};
pub use links::{LinkRewriter, ROUTE_MAP};
pub use responder::{KeywordRule, LocalResponder};
pub use transport::{ChatBackend, HttpTransport, TransportOutcome};
pub use types::{ChatReply, ChatRequest, ConversationLog, Message, Origin};
