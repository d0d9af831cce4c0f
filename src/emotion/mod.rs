//! Emotion signal aggregation.
//!
//! Fuses two signals into one [`EmotionAnalysis`] per utterance:
//!
//! 1. **Classifier distribution** — the external classifier's full label/score
//!    list, whose argmax becomes the dominant emotion.
//! 2. **Lexical counts** — exact-token hits against a fixed indicator table
//!    (see [`lexicon`]).

pub mod lexicon;

use crate::error::{EngineError, Result};
use crate::providers::{EmotionClassifier, WordTokenizer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Labels shared by the classifier and the template library.
pub const EMOTION_VOCABULARY: &[&str] = &["joy", "sadness", "anger", "fear", "surprise", "love"];

/// Emotions that receive a coping suggestion on the emotion-specific path.
pub const NEGATIVE_EMOTIONS: &[&str] = &["sadness", "anger", "fear"];

/// Whether `label` is one of [`NEGATIVE_EMOTIONS`].
#[must_use]
pub fn is_negative(label: &str) -> bool {
    NEGATIVE_EMOTIONS.contains(&label)
}

/// One entry of a classifier distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    /// Confidence in `0.0..=1.0`.
    pub score: f32,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Per-turn emotion verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    /// Highest-scoring label in `all_emotions` (first one wins ties).
    pub dominant_emotion: String,
    /// Score of `dominant_emotion`.
    pub confidence: f32,
    /// Full classifier output, in the classifier's order.
    pub all_emotions: Vec<EmotionScore>,
    /// Indicator-word counts; only emotions with at least one hit appear.
    pub emotion_keywords: BTreeMap<String, usize>,
}

/// Pick the first highest-scoring entry.
///
/// # Errors
///
/// Returns [`EngineError::Classifier`] for an empty distribution or a score
/// outside `0.0..=1.0` (including NaN).
pub fn dominant(scores: &[EmotionScore]) -> Result<&EmotionScore> {
    let mut best: Option<&EmotionScore> = None;
    for entry in scores {
        if !(0.0..=1.0).contains(&entry.score) {
            return Err(EngineError::Classifier(format!(
                "score {} for `{}` is outside 0..=1",
                entry.score, entry.label
            )));
        }
        if best.is_none_or(|b| entry.score > b.score) {
            best = Some(entry);
        }
    }
    best.ok_or_else(|| EngineError::Classifier("classifier returned no labels".to_owned()))
}

/// Combines the external classifier with the lexical indicator counter.
pub struct EmotionRecognizer {
    classifier: Box<dyn EmotionClassifier>,
    tokenizer: Box<dyn WordTokenizer>,
}

impl std::fmt::Debug for EmotionRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionRecognizer").finish_non_exhaustive()
    }
}

impl EmotionRecognizer {
    pub fn new(classifier: Box<dyn EmotionClassifier>, tokenizer: Box<dyn WordTokenizer>) -> Self {
        Self {
            classifier,
            tokenizer,
        }
    }

    /// Analyse one utterance. Classifier and tokenizer failures propagate
    /// unchanged.
    pub fn analyze(&self, text: &str) -> Result<EmotionAnalysis> {
        let all_emotions = self.classifier.classify(text)?;
        let top = dominant(&all_emotions)?;
        let dominant_emotion = top.label.clone();
        let confidence = top.score;

        let emotion_keywords =
            lexicon::count_emotion_words(self.tokenizer.as_ref(), &text.to_lowercase())?;

        tracing::debug!(
            emotion = %dominant_emotion,
            confidence,
            keyword_hits = emotion_keywords.values().sum::<usize>(),
            "emotion analysed"
        );

        Ok(EmotionAnalysis {
            dominant_emotion,
            confidence,
            all_emotions,
            emotion_keywords,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::providers::PunctuationTokenizer;

    struct Fixed(Vec<EmotionScore>);

    impl EmotionClassifier for Fixed {
        fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl EmotionClassifier for Failing {
        fn classify(&self, _text: &str) -> Result<Vec<EmotionScore>> {
            Err(EngineError::Classifier("model offline".into()))
        }
    }

    fn recognizer(scores: Vec<EmotionScore>) -> EmotionRecognizer {
        EmotionRecognizer::new(Box::new(Fixed(scores)), Box::new(PunctuationTokenizer::new()))
    }

    #[test]
    fn dominant_is_argmax() {
        let scores = vec![
            EmotionScore::new("sadness", 0.1),
            EmotionScore::new("joy", 0.7),
            EmotionScore::new("fear", 0.2),
        ];
        assert_eq!(dominant(&scores).unwrap().label, "joy");
    }

    #[test]
    fn dominant_tie_keeps_first_seen() {
        let scores = vec![
            EmotionScore::new("anger", 0.4),
            EmotionScore::new("fear", 0.4),
            EmotionScore::new("joy", 0.2),
        ];
        assert_eq!(dominant(&scores).unwrap().label, "anger");
    }

    #[test]
    fn dominant_rejects_empty_and_out_of_range() {
        assert!(dominant(&[]).is_err());
        assert!(dominant(&[EmotionScore::new("joy", 1.5)]).is_err());
        assert!(dominant(&[EmotionScore::new("joy", f32::NAN)]).is_err());
    }

    #[test]
    fn analysis_combines_classifier_and_keywords() {
        let scores = vec![
            EmotionScore::new("joy", 0.9),
            EmotionScore::new("sadness", 0.05),
            EmotionScore::new("fear", 0.05),
        ];
        let analysis = recognizer(scores.clone())
            .analyze("I feel so HAPPY today, but a little Nervous!")
            .unwrap();
        assert_eq!(analysis.dominant_emotion, "joy");
        assert!((analysis.confidence - 0.9).abs() < f32::EPSILON);
        assert_eq!(analysis.all_emotions, scores);
        assert_eq!(analysis.emotion_keywords.get("joy"), Some(&1));
        assert_eq!(analysis.emotion_keywords.get("fear"), Some(&1));
        assert!(!analysis.emotion_keywords.contains_key("sadness"));
    }

    #[test]
    fn classifier_failure_propagates() {
        let recognizer =
            EmotionRecognizer::new(Box::new(Failing), Box::new(PunctuationTokenizer::new()));
        let err = recognizer.analyze("hello").unwrap_err();
        assert!(matches!(err, EngineError::Classifier(_)));
    }

    #[test]
    fn negative_emotions() {
        assert!(is_negative("sadness"));
        assert!(is_negative("fear"));
        assert!(!is_negative("joy"));
        assert!(!is_negative("neutral"));
    }
}
