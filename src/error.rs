//! Error types for the response engine.

/// Top-level error type for response generation and template management.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Emotion classifier failed or returned an unusable distribution.
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Sentiment signal failed or returned an unknown polarity.
    #[error("sentiment error: {0}")]
    Sentiment(String),

    /// Word tokenizer failed.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Malformed configuration source or template document.
    #[error("config error: {0}")]
    Config(String),

    /// A response category resolved to no candidates.
    #[error("no response candidates configured for `{0}`")]
    EmptyCategory(String),

    /// Utterance was empty or whitespace only.
    #[error("empty input: nothing to respond to")]
    EmptyInput,

    /// Shared engine state lock was poisoned by a panicking writer.
    #[error("lock error: {0}")]
    Lock(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Whether this error came from an external collaborator (classifier,
    /// sentiment signal or tokenizer) rather than from local configuration.
    #[must_use]
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Classifier(_) | Self::Sentiment(_) | Self::Tokenizer(_)
        )
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EngineError>;
