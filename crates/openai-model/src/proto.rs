use code_chuckles_model::{
    ErrorKind, ModelCandidate, ModelMessage, ModelRequest, ModelResponse,
};
use serde::{Deserialize, Serialize};

use crate::Error;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ModelRequest) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        temperature: req.temperature,
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(content) => Message::Assistant {
            content: content.clone(),
        },
    }
}

pub fn parse_response(body: &str) -> Result<ModelResponse, Error> {
    let completion = serde_json::from_str::<ChatCompletion>(body)
        .map_err(|err| {
            Error::new(format!("{err}"), ErrorKind::MalformedResponse)
        })?;
    let candidates = completion
        .choices
        .into_iter()
        .map(|choice| {
            trace!("candidate finished: {:?}", choice.finish_reason);
            ModelCandidate {
                content: choice.message.content,
            }
        })
        .collect();
    Ok(ModelResponse { candidates })
}
