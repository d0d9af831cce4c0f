//! Conversation history.
//!
//! Append-only, in insertion order. Turns are never pruned or edited; writing
//! the log anywhere durable is the caller's job (see [`ConversationHistory::to_json`]).

use crate::emotion::EmotionAnalysis;
use crate::mood::MoodAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Captured when the turn is created.
    pub timestamp: DateTime<Utc>,
    pub user_input: String,
    pub emotion_analysis: EmotionAnalysis,
    pub mood_analysis: MoodAnalysis,
    pub response: String,
    pub is_crisis: bool,
}

impl ConversationTurn {
    /// Build a turn stamped with the current time.
    pub fn new(
        user_input: impl Into<String>,
        emotion_analysis: EmotionAnalysis,
        mood_analysis: MoodAnalysis,
        response: impl Into<String>,
        is_crisis: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            user_input: user_input.into(),
            emotion_analysis,
            mood_analysis,
            response: response.into(),
            is_crisis,
        }
    }
}

/// Ordered, append-only turn log.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. No deduplication, no cap.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns that took the crisis path.
    #[must_use]
    pub fn crisis_turns(&self) -> usize {
        self.turns.iter().filter(|t| t.is_crisis).count()
    }

    /// Pretty JSON array of every turn.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a turn cannot be encoded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.turns)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::emotion::EmotionScore;
    use crate::mood::Polarity;
    use std::collections::BTreeMap;

    fn turn(input: &str, is_crisis: bool) -> ConversationTurn {
        ConversationTurn::new(
            input,
            EmotionAnalysis {
                dominant_emotion: "joy".into(),
                confidence: 0.9,
                all_emotions: vec![EmotionScore::new("joy", 0.9)],
                emotion_keywords: BTreeMap::new(),
            },
            MoodAnalysis {
                sentiment: Polarity::Positive,
                score: 0.9,
            },
            "reply",
            is_crisis,
        )
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut history = ConversationHistory::new();
        assert!(history.is_empty());
        history.push(turn("a", false));
        history.push(turn("b", true));
        history.push(turn("a", false));
        assert_eq!(history.len(), 3);
        let inputs: Vec<&str> = history.turns().iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["a", "b", "a"]);
        assert_eq!(history.crisis_turns(), 1);
    }

    #[test]
    fn timestamps_do_not_go_backwards() {
        let mut history = ConversationHistory::new();
        history.push(turn("first", false));
        history.push(turn("second", false));
        let turns = history.turns();
        assert!(turns[0].timestamp <= turns[1].timestamp);
    }

    #[test]
    fn json_export_contains_fields() {
        let mut history = ConversationHistory::new();
        history.push(turn("hello there", false));
        let json = history.to_json().unwrap();
        let parsed: Vec<ConversationTurn> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].user_input, "hello there");
        assert!(json.contains("\"sentiment\": \"POSITIVE\""));
        assert!(json.contains("\"is_crisis\": false"));
    }
}
