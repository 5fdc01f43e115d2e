//! Core logic of the joke bot: the transcript, request assembly, the
//! completion client and the chat session that ties them together.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod chat;
mod completion;
pub mod conversation;
pub mod prompt;
pub mod settings;

pub use chat::{
    ChatSession, ChatSessionBuilder, ChatStage, PendingTurn, SubmitError, Turn,
};
pub use completion::{CompletionClient, CompletionError, FALLBACK_TEXT};
