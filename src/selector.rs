//! Response selection policy.
//!
//! Strict priority, first match wins:
//!
//! 1. **Crisis** — a crisis turn answers from `crisis` only.
//! 2. **Emotion** — a dominant emotion with its own template list answers from
//!    that list; sadness, anger and fear append a coping suggestion after a
//!    blank line when one is configured.
//! 3. **Sentiment fallback** — any other label answers from `emotions.joy`
//!    for a POSITIVE mood and `emotions.sadness` otherwise, without coping.
//!
//! Each pick is uniform over exactly one resolved list.

use crate::choice::ChoiceSource;
use crate::emotion::{EmotionAnalysis, is_negative};
use crate::error::Result;
use crate::mood::{MoodAnalysis, Polarity};
use crate::templates::{ResponseTemplates, choose};
use serde::{Deserialize, Serialize};

/// Separator between the base response and a coping suggestion.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Which branch of the policy produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum ResponsePath {
    Crisis,
    Emotion { emotion: String, with_coping: bool },
    SentimentFallback { sentiment: Polarity },
}

/// A selected response and the branch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub path: ResponsePath,
}

/// Apply the selection policy to one turn's analyses.
///
/// # Errors
///
/// Returns [`EngineError::EmptyCategory`](crate::error::EngineError::EmptyCategory)
/// when the resolved list is missing or empty.
pub fn select_response(
    emotion: &EmotionAnalysis,
    mood: &MoodAnalysis,
    is_crisis: bool,
    templates: &ResponseTemplates,
    chooser: &dyn ChoiceSource,
) -> Result<Selection> {
    if is_crisis {
        let text = choose(Some(templates.crisis.as_slice()), "crisis", chooser)?;
        return Ok(Selection {
            text: text.to_owned(),
            path: ResponsePath::Crisis,
        });
    }

    let label = emotion.dominant_emotion.as_str();
    if let Some(candidates) = templates.emotions.get(label) {
        let base = choose(
            Some(candidates.as_slice()),
            &format!("emotions.{label}"),
            chooser,
        )?;
        let mut text = base.to_owned();
        let mut with_coping = false;

        if is_negative(label)
            && let Some(coping) = templates.coping_suggestions.get(label)
            && !coping.is_empty()
        {
            let suggestion = choose(
                Some(coping.as_slice()),
                &format!("coping_suggestions.{label}"),
                chooser,
            )?;
            text.push_str(PARAGRAPH_BREAK);
            text.push_str(suggestion);
            with_coping = true;
        }

        return Ok(Selection {
            text,
            path: ResponsePath::Emotion {
                emotion: label.to_owned(),
                with_coping,
            },
        });
    }

    let fallback = match mood.sentiment {
        Polarity::Positive => "joy",
        Polarity::Negative => "sadness",
    };
    tracing::debug!(
        emotion = %label,
        sentiment = %mood.sentiment,
        fallback,
        "no templates for emotion, falling back to sentiment"
    );
    let text = choose(
        templates.emotions.get(fallback).map(Vec::as_slice),
        &format!("emotions.{fallback}"),
        chooser,
    )?;
    Ok(Selection {
        text: text.to_owned(),
        path: ResponsePath::SentimentFallback {
            sentiment: mood.sentiment,
        },
    })
}
