//! Word tokenizer built on the `tokenizers` whitespace pre-tokenizer.
//!
//! Splits on `\w+|[^\w\s]+`, so trailing punctuation becomes its own token:
//! `"happy!"` → `["happy", "!"]`.

use super::WordTokenizer;
use crate::error::{EngineError, Result};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

/// Word/punctuation tokenizer. Holds no model files.
#[derive(Debug, Default, Clone)]
pub struct PunctuationTokenizer {
    splitter: Whitespace,
}

impl PunctuationTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordTokenizer for PunctuationTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.splitter
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| EngineError::Tokenizer(e.to_string()))?;
        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(token, _, _)| token.to_owned())
            .collect())
    }
}
