//! A terminal chat bot that only tells programming jokes.
//!
//! The crate includes a CLI tool for using in the terminal. The pieces it
//! is built from (command parsing, environment configuration, markdown and
//! screen rendering) are exposed as a library as well.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod command;
pub mod config;
pub mod markdown;
pub mod view;

/// Re-exports of [`code_chuckles_core`] crate.
pub mod core {
    pub use code_chuckles_core::*;
}
