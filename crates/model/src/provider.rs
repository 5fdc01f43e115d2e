use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ModelRequest;
use crate::response::ModelResponse;

/// The error type for a model provider.
pub trait ModelProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a model provider, which samples completions
/// for a list of messages.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
pub trait ModelProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ModelProviderError;

    /// Sends a request to the model and waits for the complete response.
    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static;
}
