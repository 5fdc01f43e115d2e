use code_chuckles_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// How the test model answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// Replies with the given text as the only candidate.
    #[serde(rename = "reply")]
    Reply(String),
    /// Replies with a deterministic echo of the last user message.
    ///
    /// The echo is padded with whitespace, so callers can check that
    /// they trim it.
    #[serde(rename = "echo")]
    Echo,
    /// Replies with no candidate at all.
    #[serde(rename = "empty")]
    Empty,
    /// Fails the request with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

/// Formats the text [`PresetResponse::Echo`] replies with.
#[inline]
pub fn echo_text(input: &str) -> String {
    format!("  You said: {input}\n")
}
