//! Lexical emotion counter.
//!
//! Exact token match against a fixed indicator table. No stemming: `happy`
//! counts, `happiness` does not.

use crate::error::Result;
use crate::providers::WordTokenizer;
use std::collections::BTreeMap;

/// (emotion, indicator words)
pub const EMOTION_INDICATORS: &[(&str, &[&str])] = &[
    (
        "joy",
        &["happy", "excited", "delighted", "grateful", "blessed"],
    ),
    (
        "sadness",
        &["sad", "depressed", "down", "unhappy", "miserable"],
    ),
    (
        "anger",
        &["angry", "furious", "irritated", "frustrated", "mad"],
    ),
    (
        "fear",
        &["scared", "anxious", "worried", "nervous", "terrified"],
    ),
    ("surprise", &["shocked", "surprised", "amazed", "astonished"]),
    ("love", &["love", "caring", "affection", "fond", "attached"]),
];

/// Count indicator tokens per emotion, omitting emotions with no hits.
pub fn count_indicator_tokens<S: AsRef<str>>(tokens: &[S]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &(emotion, indicators) in EMOTION_INDICATORS {
        let count = tokens
            .iter()
            .filter(|t| indicators.contains(&t.as_ref()))
            .count();
        if count > 0 {
            counts.insert(emotion.to_owned(), count);
        }
    }
    counts
}

/// Tokenize an already-lowercased utterance and count indicator words.
pub fn count_emotion_words(
    tokenizer: &dyn WordTokenizer,
    lowered: &str,
) -> Result<BTreeMap<String, usize>> {
    let tokens = tokenizer.tokenize(lowered)?;
    Ok(count_indicator_tokens(&tokens))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::providers::PunctuationTokenizer;

    #[test]
    fn counts_are_sparse() {
        let counts = count_indicator_tokens(&["i", "am", "sad", "and", "sad", "and", "scared"]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["sadness"], 2);
        assert_eq!(counts["fear"], 1);
    }

    #[test]
    fn no_stemming() {
        let counts = count_indicator_tokens(&["happiness", "sadly", "loved"]);
        assert!(counts.is_empty());
    }

    #[test]
    fn punctuation_adjacent_words_count() {
        let counts =
            count_emotion_words(&PunctuationTokenizer::new(), "so happy! really, happy.").unwrap();
        assert_eq!(counts.get("joy"), Some(&2));
    }

    #[test]
    fn token_may_belong_to_one_emotion_only_once() {
        let counts = count_indicator_tokens(&["love"]);
        assert_eq!(counts.get("love"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 1);
    }
}
