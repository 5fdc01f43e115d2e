//! Conversation-related types.

use std::fmt::{self, Display};

use code_chuckles_model::ModelMessage;
use serde::{Deserialize, Serialize};

/// The author of a [`Message`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the user.
    User,
    /// A message generated by the model.
    Assistant,
    /// The system instruction. It only appears in requests, never in a
    /// [`Transcript`].
    System,
}

impl Role {
    /// Returns the wire name of the role.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation. Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a message.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Returns the author of the message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of the message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn to_model_message(&self) -> ModelMessage {
        let content = self.content.clone();
        match self.role {
            Role::User => ModelMessage::User(content),
            Role::Assistant => ModelMessage::Assistant(content),
            Role::System => ModelMessage::System(content),
        }
    }
}

/// The ordered user/assistant history of one chat session.
///
/// Insertion order is chronological order. The store has no size cap and
/// never evicts anything; it only shrinks when it is cleared.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Adds a message to the end of the transcript.
    ///
    /// System messages do not belong here; they are injected at request
    /// time only.
    #[inline]
    pub fn append(&mut self, message: Message) {
        debug_assert_ne!(message.role, Role::System);
        self.messages.push(message);
    }

    /// Appends a completed turn as one unit.
    #[inline]
    pub fn append_turn(&mut self, user: Message, assistant: Message) {
        self.messages.reserve(2);
        self.append(user);
        self.append(assistant);
    }

    /// Removes all messages.
    #[inline]
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns all messages in chronological order.
    #[inline]
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
