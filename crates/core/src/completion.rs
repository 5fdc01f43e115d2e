use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use code_chuckles_model::{
    ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};
use tracing::Instrument;

use crate::conversation::Message;
use crate::settings::{Model, Temperature};

/// The text shown in place of a reply whenever the completion fails.
pub const FALLBACK_TEXT: &str =
    "Oops! I ran into an error while fetching that joke. Please try again.";

/// The only way a completion can fail.
///
/// Transport, authentication, rate-limit and malformed-response failures
/// are not told apart. The details are logged where they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionError {
    /// The external text-generation call failed.
    ExternalCallFailed,
}

impl CompletionError {
    /// Returns the text to show instead of the reply.
    #[inline]
    pub fn fallback_text(&self) -> &'static str {
        FALLBACK_TEXT
    }
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("external call failed")
    }
}

impl StdError for CompletionError {}

type CompleteResult = Result<String, CompletionError>;
type BoxedCompleteFuture =
    Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased
/// interface for the chat session.
#[derive(Clone)]
pub struct CompletionClient {
    handler_fn: HandlerFn,
    timeout: Option<Duration>,
}

impl CompletionClient {
    /// Creates a client that sends requests to `provider`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `CompletionClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    handle_response::<P>(fut.await)
                }
                .instrument(trace_span!("completion client req")),
            )
        });
        Self {
            handler_fn,
            timeout: None,
        }
    }

    /// Gives up on requests that take longer than `timeout`.
    ///
    /// Without a timeout a request may wait forever.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Samples a reply for `messages` and returns the text of the first
    /// candidate with surrounding whitespace trimmed.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the future abandons the
    /// request.
    pub async fn complete(
        &self,
        model: Model,
        temperature: Temperature,
        messages: &[Message],
    ) -> Result<String, CompletionError> {
        let req = ModelRequest {
            model: model.id().to_owned(),
            messages: messages.iter().map(Message::to_model_message).collect(),
            temperature: temperature.value(),
        };
        let fut = (self.handler_fn)(req);
        let Some(timeout) = self.timeout else {
            return fut.await;
        };
        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!("request timed out after {timeout:?}");
                Err(CompletionError::ExternalCallFailed)
            }
        }
    }
}

fn handle_response<P: ModelProvider + 'static>(
    resp_or_err: Result<ModelResponse, P::Error>,
) -> CompleteResult {
    let resp = match resp_or_err {
        Ok(resp) => resp,
        Err(err) => {
            warn!("got an error ({:?}): {err}", err.kind());
            return Err(CompletionError::ExternalCallFailed);
        }
    };

    let Some(text) = resp.first_text() else {
        warn!("response has no usable candidate: {resp:?}");
        return Err(CompletionError::ExternalCallFailed);
    };

    trace!("finished a request");
    Ok(text.trim().to_owned())
}
