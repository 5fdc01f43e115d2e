use serde::{Deserialize, Serialize};

/// A complete response from the model provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Candidate completions, in the order the provider returned them.
    pub candidates: Vec<ModelCandidate>,
}

impl ModelResponse {
    /// Creates a response with a single text candidate.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            candidates: vec![ModelCandidate {
                content: Some(text.into()),
            }],
        }
    }

    /// Returns the text of the first candidate, if there is any.
    #[inline]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first()?.content.as_deref()
    }
}

/// One candidate completion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelCandidate {
    /// Text of the candidate. Providers may omit it, e.g. when the output
    /// was filtered.
    pub content: Option<String>,
}
