mod builder;

use std::error::Error as StdError;
use std::fmt::{self, Display};

pub use builder::ChatSessionBuilder;

use crate::completion::CompletionClient;
use crate::conversation::{Message, Transcript};
use crate::prompt;
use crate::settings::{Model, SessionSettings, Temperature};

/// The stage a [`ChatSession`] is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChatStage {
    /// Ready to accept a submission.
    #[default]
    Idle,
    /// A request is in flight; submissions are refused until it resolves.
    AwaitingReply,
}

/// Error returned when a submission or a control is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitError {
    /// Another turn is still waiting for its reply.
    Busy,
    /// The input has no visible characters.
    EmptyInput,
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Busy => f.write_str("still waiting for a reply"),
            SubmitError::EmptyInput => f.write_str("input is empty"),
        }
    }
}

impl StdError for SubmitError {}

/// A turn that has been submitted but not answered yet.
///
/// Obtained from [`ChatSession::begin_turn`] and consumed by
/// [`ChatSession::complete_turn`].
#[derive(Debug)]
#[must_use = "a pending turn keeps the session busy until it is completed"]
pub struct PendingTurn {
    user_message: Message,
    request: Vec<Message>,
    model: Model,
    temperature: Temperature,
}

impl PendingTurn {
    /// Returns the message the user submitted.
    #[inline]
    pub fn user_message(&self) -> &Message {
        &self.user_message
    }

    /// Returns the messages that will be sent to the model, starting
    /// with the system instruction.
    #[inline]
    pub fn request(&self) -> &[Message] {
        &self.request
    }
}

/// A turn that has been recorded in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// The message the user submitted.
    pub user_message: Message,
    /// The reply, or the fallback text if the completion failed.
    pub reply: Message,
    /// Whether `reply` is the fallback text.
    pub is_fallback: bool,
}

/// One interactive chat session: the transcript, the settings and the
/// client used to answer.
///
/// A session handles one submission at a time. While a reply is pending
/// the session is in [`ChatStage::AwaitingReply`] and refuses new
/// submissions as well as [`ChatSession::clear`].
pub struct ChatSession {
    completion_client: CompletionClient,
    transcript: Transcript,
    settings: SessionSettings,
    stage: ChatStage,
}

impl ChatSession {
    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the current settings.
    #[inline]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Returns the current stage.
    #[inline]
    pub fn stage(&self) -> ChatStage {
        self.stage
    }

    /// Selects the model used by subsequent turns.
    #[inline]
    pub fn set_model(&mut self, model: Model) {
        debug!("model changed to {model}");
        self.settings.model = model;
    }

    /// Sets the temperature used by subsequent turns.
    #[inline]
    pub fn set_temperature(&mut self, temperature: Temperature) {
        debug!("temperature changed to {temperature}");
        self.settings.temperature = temperature;
    }

    /// Empties the transcript.
    pub fn clear(&mut self) -> Result<(), SubmitError> {
        if self.stage != ChatStage::Idle {
            return Err(SubmitError::Busy);
        }
        debug!("clearing {} messages", self.transcript.len());
        self.transcript.clear();
        Ok(())
    }

    /// Accepts a submission and assembles its request.
    ///
    /// The session stays in [`ChatStage::AwaitingReply`] until the
    /// returned turn is passed to [`ChatSession::complete_turn`] or the
    /// turn is dropped with [`ChatSession::abort_turn`].
    pub fn begin_turn(
        &mut self,
        input: &str,
    ) -> Result<PendingTurn, SubmitError> {
        if self.stage != ChatStage::Idle {
            return Err(SubmitError::Busy);
        }
        if input.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let user_message = Message::user(input);
        let request = prompt::assemble(self.transcript.all(), &user_message);
        self.stage = ChatStage::AwaitingReply;
        debug!("awaiting reply for a request of {} messages", request.len());

        Ok(PendingTurn {
            user_message,
            request,
            model: self.settings.model,
            temperature: self.settings.temperature,
        })
    }

    /// Asks the model for a reply to `pending` and records the turn.
    ///
    /// A failed completion is recorded with the fallback text as the
    /// reply, so every completed turn adds exactly two messages.
    pub async fn complete_turn(&mut self, pending: PendingTurn) -> Turn {
        let PendingTurn {
            user_message,
            request,
            model,
            temperature,
        } = pending;

        let (reply, is_fallback) = match self
            .completion_client
            .complete(model, temperature, &request)
            .await
        {
            Ok(text) => (text, false),
            Err(err) => {
                debug!("replying with the fallback text: {err}");
                (err.fallback_text().to_owned(), true)
            }
        };

        let reply = Message::assistant(reply);
        self.transcript.append_turn(user_message.clone(), reply.clone());
        self.stage = ChatStage::Idle;

        Turn {
            user_message,
            reply,
            is_fallback,
        }
    }

    /// Gives up on the pending turn without recording it.
    ///
    /// Use this after dropping a [`ChatSession::complete_turn`] future.
    #[inline]
    pub fn abort_turn(&mut self) {
        if self.stage == ChatStage::AwaitingReply {
            debug!("turn aborted");
        }
        self.stage = ChatStage::Idle;
    }

    /// Submits `input` and waits for the turn to be recorded.
    #[inline]
    pub async fn submit(&mut self, input: &str) -> Result<Turn, SubmitError> {
        let pending = self.begin_turn(input)?;
        Ok(self.complete_turn(pending).await)
    }
}
