//! Crisis phrase detection.
//!
//! Runs independently of the emotion classifier: a match forces the crisis
//! response path whatever emotion or mood the turn carries. Matching is
//! case-insensitive and total, so every utterance is either crisis or not.

use crate::config::{CrisisConfig, CrisisMatchMode};

/// Configured crisis phrase matcher.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    mode: CrisisMatchMode,
    /// Lowercased phrases, in configuration order.
    phrases: Vec<String>,
    /// Word sequences for [`CrisisMatchMode::Token`], parallel to `phrases`.
    phrase_words: Vec<Vec<String>>,
}

fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl CrisisDetector {
    pub fn new<I, S>(phrases: I, mode: CrisisMatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        let phrase_words = phrases.iter().map(|p| split_words(p)).collect();
        Self {
            mode,
            phrases,
            phrase_words,
        }
    }

    pub fn from_config(config: &CrisisConfig) -> Self {
        Self::new(&config.keywords, config.match_mode)
    }

    /// The first configured phrase present in `text`, if any.
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        match self.mode {
            CrisisMatchMode::Substring => {
                let lower = text.to_lowercase();
                self.phrases
                    .iter()
                    .find(|p| lower.contains(p.as_str()))
                    .map(String::as_str)
            }
            CrisisMatchMode::Token => {
                let words = split_words(text);
                self.phrases
                    .iter()
                    .zip(&self.phrase_words)
                    .find(|(_, needle)| {
                        !needle.is_empty()
                            && words.windows(needle.len()).any(|w| w == needle.as_slice())
                    })
                    .map(|(p, _)| p.as_str())
            }
        }
    }

    pub fn is_crisis(&self, text: &str) -> bool {
        self.matched_phrase(text).is_some()
    }
}
