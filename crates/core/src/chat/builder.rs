use std::time::Duration;

use code_chuckles_model::ModelProvider;

use super::{ChatSession, ChatStage};
use crate::completion::CompletionClient;
use crate::settings::SessionSettings;

/// [`ChatSession`] builder.
pub struct ChatSessionBuilder {
    pub(crate) completion_client: CompletionClient,
    pub(crate) settings: SessionSettings,
    pub(crate) timeout: Option<Duration>,
}

impl ChatSessionBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            completion_client: CompletionClient::new(provider),
            settings: Default::default(),
            timeout: None,
        }
    }

    /// Sets the initial settings.
    #[inline]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Gives up on completions that take longer than `timeout`, replying
    /// with the fallback text instead.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the session with an empty transcript.
    #[inline]
    pub fn build(self) -> ChatSession {
        let Self {
            mut completion_client,
            settings,
            timeout,
        } = self;
        if let Some(timeout) = timeout {
            completion_client = completion_client.with_timeout(timeout);
        }
        ChatSession {
            completion_client,
            transcript: Default::default(),
            settings,
            stage: ChatStage::Idle,
        }
    }
}
