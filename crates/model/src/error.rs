use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
///
/// Kinds are diagnostic only. Callers of a provider are free to collapse
/// all of them into a single failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The credentials were rejected.
    Authentication,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// The provider answered with something that is not a completion.
    MalformedResponse,
    /// Any other errors, including transport failures.
    Other,
}
