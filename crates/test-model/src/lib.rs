//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use code_chuckles_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Shared {
    script: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how
/// the model should respond to each request, in order. Once the script
/// runs out, the fallback response is used; if there is none, an error
/// will be returned.
///
/// Every request is recorded and can be inspected with
/// [`TestModelProvider::requests`]. Clones share the script and the
/// recorded requests.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    shared: Arc<Mutex<Shared>>,
    fallback: Option<PresetResponse>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Creates a provider that echoes every request.
    #[inline]
    pub fn echo() -> Self {
        Self {
            fallback: Some(PresetResponse::Echo),
            ..Default::default()
        }
    }

    /// Creates a provider that fails every request with `kind`.
    #[inline]
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            fallback: Some(PresetResponse::Failure(kind)),
            ..Default::default()
        }
    }

    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.lock().script.push_back(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Shared> {
        // A panicking test thread must not hide the recorded requests.
        self.shared.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut shared = self.lock();
            shared.requests.push(req.clone());
            shared.script.pop_front().or_else(|| self.fallback.clone())
        };
        let result = respond(preset, req);
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        async move {
            sleep(delay).await;
            result
        }
    }
}

fn respond(
    preset: Option<PresetResponse>,
    req: &ModelRequest,
) -> Result<ModelResponse, Error> {
    let Some(preset) = preset else {
        return Err(Error {
            message: "no enough steps",
            kind: ErrorKind::Other,
        });
    };
    match preset {
        PresetResponse::Reply(text) => Ok(ModelResponse::with_text(text)),
        PresetResponse::Echo => {
            let input = req
                .messages
                .iter()
                .rev()
                .find_map(|msg| match msg {
                    ModelMessage::User(text) => Some(text.as_str()),
                    _ => None,
                })
                .unwrap_or_default();
            Ok(ModelResponse::with_text(echo_text(input)))
        }
        PresetResponse::Empty => Ok(ModelResponse::default()),
        PresetResponse::Failure(kind) => Err(Error {
            message: "scripted failure",
            kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use code_chuckles_model::ModelMessage;

    use super::*;

    fn request(input: &str) -> ModelRequest {
        ModelRequest {
            model: "gpt-4".to_owned(),
            messages: vec![
                ModelMessage::System("Tell jokes.".to_owned()),
                ModelMessage::User(input.to_owned()),
            ],
            temperature: 0.8,
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::Reply("Hello, world!".into()));
        provider.add_response(PresetResponse::Echo);
        provider.add_response(PresetResponse::Failure(ErrorKind::Other));

        let resp = provider.send_request(&request("Hi")).await.unwrap();
        assert_eq!(resp.first_text(), Some("Hello, world!"));

        let resp = provider.send_request(&request("Regex")).await.unwrap();
        assert_eq!(resp.first_text(), Some(echo_text("Regex").as_str()));

        let err = provider.send_request(&request("Bye")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        // The script has run out.
        let err = provider.send_request(&request("Bye")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let requests = provider.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[1], request("Regex"));
    }

    #[tokio::test]
    async fn test_fallback_response() {
        let provider = TestModelProvider::echo();
        for input in ["Rust", "Go"] {
            let resp = provider.send_request(&request(input)).await.unwrap();
            assert_eq!(resp.first_text(), Some(echo_text(input).as_str()));
        }

        let provider = TestModelProvider::failing(ErrorKind::Authentication);
        let err = provider.send_request(&request("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_clones_share_requests() {
        let provider = TestModelProvider::echo();
        let clone = provider.clone();
        clone.send_request(&request("Hi")).await.unwrap();
        assert_eq!(provider.requests().len(), 1);
    }
}
