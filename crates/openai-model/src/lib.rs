//! A model provider for OpenAI-compatible chat completion APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use code_chuckles_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};
use mime::Mime;
use reqwest::{Client, StatusCode, header};

pub use config::{OpenAIConfig, OpenAIConfigBuilder};

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req);
        let resp_fut = self
            .client
            .post(self.config.completions_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&openai_req)
            .send();

        async move {
            let resp = resp_fut
                .await
                .map_err(|err| {
                    Error::new(format!("{err}"), ErrorKind::Other)
                })?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                debug!("server returned {status}: {body}");
                return Err(Error::new(
                    format!("Unexpected status: {status}"),
                    kind_for_status(status),
                ));
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_valid_content_type = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype() == mime::JSON)
                .unwrap_or(false);
            if !is_valid_content_type {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::MalformedResponse,
                ));
            }

            // Here we got a successful response.
            let body = resp
                .text()
                .await
                .map_err(|err| {
                    Error::new(format!("{err}"), ErrorKind::Other)
                })?;
            trace!("got response body: {body}");
            proto::parse_response(&body)
        }
    }
}

#[inline]
fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ErrorKind::Authentication
        }
        StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimitExceeded,
        _ => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_status() {
        assert_eq!(
            kind_for_status(StatusCode::UNAUTHORIZED),
            ErrorKind::Authentication
        );
        assert_eq!(
            kind_for_status(StatusCode::FORBIDDEN),
            ErrorKind::Authentication
        );
        assert_eq!(
            kind_for_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::RateLimitExceeded
        );
        assert_eq!(
            kind_for_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::Other
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let config = OpenAIConfigBuilder::with_api_key("sk-xxx")
            .with_base_url("http://127.0.0.1:1/v1")
            .build();
        let provider = OpenAIProvider::new(config);
        let req = ModelRequest {
            model: "gpt-4".to_owned(),
            messages: vec![],
            temperature: 0.8,
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(!err.message().is_empty());
    }
}
