//! Mood analysis from the external sentiment signal.
//!
//! Each turn is scored on its own; there is no smoothing across turns.

use crate::error::{EngineError, Result};
use crate::providers::SentimentScorer;
use serde::{Deserialize, Serialize};

/// Raw output of a sentiment collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub label: String,
    pub score: f32,
}

impl SentimentSignal {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Two-valued mood polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Parse a collaborator label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" => Some(Self::Positive),
            "NEGATIVE" | "NEG" => Some(Self::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("POSITIVE"),
            Self::Negative => f.write_str("NEGATIVE"),
        }
    }
}

/// Per-turn mood verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub sentiment: Polarity,
    pub score: f32,
}

/// Normalises the sentiment collaborator's output.
pub struct MoodAnalyzer {
    scorer: Box<dyn SentimentScorer>,
}

impl std::fmt::Debug for MoodAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodAnalyzer").finish_non_exhaustive()
    }
}

impl MoodAnalyzer {
    pub fn new(scorer: Box<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// # Errors
    ///
    /// Propagates scorer failures, and returns [`EngineError::Sentiment`] for a
    /// label other than POSITIVE/NEGATIVE or a non-finite score.
    pub fn analyze(&self, text: &str) -> Result<MoodAnalysis> {
        let signal = self.scorer.score(text)?;
        let sentiment = Polarity::from_label(&signal.label).ok_or_else(|| {
            EngineError::Sentiment(format!("unknown sentiment label `{}`", signal.label))
        })?;
        if !signal.score.is_finite() {
            return Err(EngineError::Sentiment(format!(
                "non-finite sentiment score for `{}`",
                signal.label
            )));
        }
        tracing::debug!(%sentiment, score = signal.score, "mood analysed");
        Ok(MoodAnalysis {
            sentiment,
            score: signal.score,
        })
    }
}
