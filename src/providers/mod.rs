//! Collaborator contracts for the response engine.
//!
//! The engine never talks to a model directly. It consumes three capabilities:
//!
//! - [`EmotionClassifier`] — full label/score distribution for an utterance.
//! - [`SentimentScorer`] — POSITIVE/NEGATIVE polarity with a confidence.
//! - [`WordTokenizer`] — ordered word tokens.
//!
//! Each returns a [`crate::Result`], so a collaborator failure reaches the
//! caller as a typed error instead of a crafted reply. Bundled backends live
//! in [`heuristic`], [`remote`] and [`tokenizer`].

pub mod heuristic;
pub mod remote;
pub mod tokenizer;

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::emotion::EmotionScore;
use crate::error::{EngineError, Result};
use crate::mood::SentimentSignal;
use std::time::Duration;

pub use heuristic::{HeuristicEmotionClassifier, HeuristicSentimentScorer};
pub use remote::{RemoteEmotionClassifier, RemoteSentimentScorer};
pub use tokenizer::PunctuationTokenizer;

/// Emotion classifier contract.
pub trait EmotionClassifier: Send + Sync {
    /// Score `text` against the classifier's whole emotion vocabulary.
    ///
    /// The returned order is the classifier's own and is significant: it
    /// breaks ties when picking the dominant emotion.
    fn classify(&self, text: &str) -> Result<Vec<EmotionScore>>;
}

/// Sentiment signal contract.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentSignal>;
}

/// Word tokenizer contract.
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// Classifier and sentiment backends built from configuration.
pub struct Collaborators {
    pub classifier: Box<dyn EmotionClassifier>,
    pub sentiment: Box<dyn SentimentScorer>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Build the configured classifier/sentiment pair.
///
/// # Errors
///
/// Returns [`EngineError::Config`] when the remote backend is selected without
/// both endpoint URLs.
pub fn build_collaborators(config: &ClassifierConfig) -> Result<Collaborators> {
    match config.backend {
        ClassifierBackend::Heuristic => {
            tracing::debug!("using heuristic emotion and sentiment backends");
            Ok(Collaborators {
                classifier: Box::new(HeuristicEmotionClassifier::new()),
                sentiment: Box::new(HeuristicSentimentScorer::new()),
            })
        }
        ClassifierBackend::Remote => {
            let emotion_url = config.emotion_url.clone().ok_or_else(|| {
                EngineError::Config("classifier.emotion_url is required".to_owned())
            })?;
            let sentiment_url = config.sentiment_url.clone().ok_or_else(|| {
                EngineError::Config("classifier.sentiment_url is required".to_owned())
            })?;
            let timeout = Duration::from_secs(config.timeout_secs.max(1));
            tracing::debug!(%emotion_url, %sentiment_url, "using remote classifier backends");
            Ok(Collaborators {
                classifier: Box::new(RemoteEmotionClassifier::new(
                    emotion_url,
                    config.api_token.clone(),
                    timeout,
                )),
                sentiment: Box::new(RemoteSentimentScorer::new(
                    sentiment_url,
                    config.api_token.clone(),
                    timeout,
                )),
            })
        }
    }
}
