//! An abstraction layer for chat-completion services.
//!
//! This crate establishes an unified protocol for the chat session to
//! interact with text-generation providers, so that the session can
//! switch between a real service and a scripted fake without modifying
//! the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
