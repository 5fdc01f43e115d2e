use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use code_chuckles_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            let Some(last) = req.messages.last() else {
                break 'blk Err(FakeModelProviderError(ErrorKind::Other));
            };

            let content = match last {
                ModelMessage::User(text) => text.as_str(),
                _ => {
                    break 'blk Err(FakeModelProviderError(
                        ErrorKind::MalformedResponse,
                    ));
                }
            };

            Ok(ModelResponse::with_text(format!(
                "You said {content} ({})",
                req.model
            )))
        };
        async move {
            sleep(Duration::from_millis(1)).await;
            result
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            model: "fake".to_owned(),
            messages: vec![
                ModelMessage::System("Be funny.".to_owned()),
                ModelMessage::User("Good morning".to_owned()),
            ],
            temperature: 0.8,
        };
        let resp = provider.send_request(&req).await.unwrap();
        assert_eq!(resp.first_text(), Some("You said Good morning (fake)"));
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            model: "fake".to_owned(),
            messages: vec![],
            temperature: 0.8,
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let req = ModelRequest {
            model: "fake".to_owned(),
            messages: vec![ModelMessage::Assistant("Hi".to_owned())],
            temperature: 0.8,
        };
        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
