/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// Identifier of the model to sample from, e.g. `gpt-4`.
    pub model: String,
    /// The input messages, in chronological order.
    pub messages: Vec<ModelMessage>,
    /// Sampling temperature.
    pub temperature: f32,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ModelMessage {
    /// Returns the text content of the message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ModelMessage::System(content)
            | ModelMessage::User(content)
            | ModelMessage::Assistant(content) => content,
        }
    }
}
