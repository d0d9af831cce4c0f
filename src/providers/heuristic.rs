//! Offline keyword heuristics standing in for the emotion and sentiment models.
//!
//! The emotion classifier emits a full distribution over the emotion
//! vocabulary plus `neutral`. With no keyword evidence all mass goes to
//! `neutral`, a label the template library does not carry, which routes the
//! turn through the sentiment fallback the same way an off-vocabulary model
//! label would.

use super::{EmotionClassifier, SentimentScorer};
use crate::emotion::EmotionScore;
use crate::error::Result;
use crate::mood::SentimentSignal;

/// Label reported when no emotion keyword is present.
pub const NEUTRAL_LABEL: &str = "neutral";

/// Residual weight kept on `neutral` when some emotion evidence exists.
const NEUTRAL_WEIGHT: f32 = 0.5;

// ── Keyword tables ──────────────────────────────────────────────────────

/// (emotion, cue words). Broader than the lexical indicator table so the
/// classifier and the keyword counter remain independent signals.
const EMOTION_CUES: &[(&str, &[&str])] = &[
    (
        "anger",
        &[
            "angry", "furious", "irritated", "frustrated", "mad", "annoyed", "rage", "hate",
            "unfair", "livid",
        ],
    ),
    (
        "fear",
        &[
            "scared", "anxious", "worried", "nervous", "terrified", "afraid", "panic", "dread",
            "frightened", "uneasy",
        ],
    ),
    (
        "joy",
        &[
            "happy", "excited", "delighted", "grateful", "blessed", "great", "wonderful",
            "glad", "amazing", "fantastic",
        ],
    ),
    (
        "love",
        &[
            "love", "caring", "affection", "fond", "attached", "adore", "cherish", "darling",
            "sweetheart", "devoted",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "depressed", "down", "unhappy", "miserable", "lonely", "crying", "hopeless",
            "grief", "empty",
        ],
    ),
    (
        "surprise",
        &[
            "shocked", "surprised", "amazed", "astonished", "unexpected", "suddenly", "wow",
            "stunned", "speechless", "startled",
        ],
    ),
];

const POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "great", "wonderful", "love", "glad", "excited", "grateful", "calm",
    "better", "amazing", "nice", "fine", "hopeful", "proud", "fantastic", "delighted",
    "blessed", "relaxed", "thanks",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "terrible", "awful", "hate", "angry", "depressed", "anxious", "scared",
    "worried", "lonely", "miserable", "hopeless", "tired", "hurt", "worse", "upset", "afraid",
    "furious", "stressed",
];

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Keyword-count emotion classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicEmotionClassifier;

impl HeuristicEmotionClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EmotionClassifier for HeuristicEmotionClassifier {
    fn classify(&self, text: &str) -> Result<Vec<EmotionScore>> {
        let tokens: Vec<String> = words(text).collect();

        let hits: Vec<(&str, usize)> = EMOTION_CUES
            .iter()
            .map(|&(label, cues)| {
                let count = tokens.iter().filter(|t| cues.contains(&t.as_str())).count();
                (label, count)
            })
            .collect();
        let total: usize = hits.iter().map(|&(_, n)| n).sum();

        let mut scores = Vec::with_capacity(hits.len() + 1);
        if total == 0 {
            scores.extend(hits.iter().map(|&(label, _)| EmotionScore::new(label, 0.0)));
            scores.push(EmotionScore::new(NEUTRAL_LABEL, 1.0));
            return Ok(scores);
        }

        let mass = total as f32 + NEUTRAL_WEIGHT;
        scores.extend(
            hits.iter()
                .map(|&(label, n)| EmotionScore::new(label, n as f32 / mass)),
        );
        scores.push(EmotionScore::new(NEUTRAL_LABEL, NEUTRAL_WEIGHT / mass));
        Ok(scores)
    }
}

/// Positive/negative word-balance sentiment scorer.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSentimentScorer;

impl HeuristicSentimentScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for HeuristicSentimentScorer {
    fn score(&self, text: &str) -> Result<SentimentSignal> {
        let (mut positive, mut negative) = (0usize, 0usize);
        for word in words(text) {
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }

        // Laplace-smoothed share of positive evidence.
        let p = (positive as f32 + 1.0) / ((positive + negative) as f32 + 2.0);
        let signal = if positive > negative {
            SentimentSignal::new("POSITIVE", p)
        } else {
            SentimentSignal::new("NEGATIVE", 1.0 - p)
        };
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn top(scores: &[EmotionScore]) -> &EmotionScore {
        let mut best = &scores[0];
        for s in scores {
            if s.score > best.score {
                best = s;
            }
        }
        best
    }

    #[test]
    fn happy_text_is_joy() {
        let scores = HeuristicEmotionClassifier::new()
            .classify("I feel so happy today, everything is great!")
            .unwrap();
        assert_eq!(top(&scores).label, "joy");
        assert!(top(&scores).score > 0.5);
    }

    #[test]
    fn distribution_sums_to_one() {
        let scores = HeuristicEmotionClassifier::new()
            .classify("I'm scared and sad and so worried")
            .unwrap();
        let sum: f32 = scores.iter().map(|s| s.score).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(top(&scores).label, "fear");
    }

    #[test]
    fn no_evidence_is_neutral() {
        let scores = HeuristicEmotionClassifier::new()
            .classify("The train leaves at noon.")
            .unwrap();
        assert_eq!(top(&scores).label, NEUTRAL_LABEL);
        assert_eq!(top(&scores).score, 1.0);
        assert_eq!(scores.len(), EMOTION_CUES.len() + 1);
    }

    #[test]
    fn sentiment_positive_requires_majority() {
        let scorer = HeuristicSentimentScorer::new();
        let pos = scorer.score("This is great, I'm so happy").unwrap();
        assert_eq!(pos.label, "POSITIVE");
        assert!(pos.score > 0.5);

        let neg = scorer.score("I feel awful and tired").unwrap();
        assert_eq!(neg.label, "NEGATIVE");
        assert!(neg.score > 0.5);

        let tie = scorer.score("Nothing to report").unwrap();
        assert_eq!(tie.label, "NEGATIVE");
        assert!((tie.score - 0.5).abs() < f32::EPSILON);
    }
}
