//! The model vocabulary — token ID to word-fragment lookup plus the
//! distinguished control-token IDs.
//!
//! Loaded once at initialization from a JSON word list (index = token ID)
//! and immutable afterward; every decode call shares it read-only.  The
//! control-token layout follows the upstream Whisper table: the English
//! model places `EOT` at 50256, the multilingual model shifts `EOT`/`SOT`
//! up by one, while `TRANSLATE`/`TRANSCRIBE` stay fixed.

use std::path::Path;

use thiserror::Error;

use crate::stt::engine::Token;

/// End-of-transcript token ID in the English vocabulary.
const BASE_TOKEN_EOT: Token = 50_256;
/// Start-of-transcript token ID in the English vocabulary.
const BASE_TOKEN_SOT: Token = 50_257;
/// Translate task token — same ID in both vocabularies.
const TOKEN_TRANSLATE: Token = 50_358;
/// Transcribe task token — same ID in both vocabularies.
const TOKEN_TRANSCRIBE: Token = 50_359;

// ---------------------------------------------------------------------------
// VocabError
// ---------------------------------------------------------------------------

/// Errors loading the vocabulary table.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("could not read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid vocabulary file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("vocabulary file contains no words")]
    Empty,
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Immutable token → word-fragment table.
///
/// Word fragments already encode their own leading spaces, so decoding is a
/// plain concatenation.  Any token `>= eot()` is a control ("special")
/// token and never contributes to output text.
#[derive(Debug)]
pub struct Vocabulary {
    words: Vec<String>,
    token_eot: Token,
    token_sot: Token,
    token_transcribe: Token,
    token_translate: Token,
}

impl Vocabulary {
    /// Load the word list from a JSON array at `path`.
    ///
    /// `multilingual` selects the control-token layout of the model the
    /// vocabulary belongs to.
    pub fn load(path: &Path, multilingual: bool) -> Result<Self, VocabError> {
        let data = std::fs::read_to_string(path)?;
        let words: Vec<String> = serde_json::from_str(&data)?;
        log::debug!("loaded {} vocabulary entries from {}", words.len(), path.display());
        Self::from_words(words, multilingual)
    }

    /// Build a vocabulary from an in-memory word list (test seam).
    pub fn from_words(words: Vec<String>, multilingual: bool) -> Result<Self, VocabError> {
        if words.is_empty() {
            return Err(VocabError::Empty);
        }
        let shift = Token::from(multilingual);
        Ok(Self {
            words,
            token_eot: BASE_TOKEN_EOT + shift,
            token_sot: BASE_TOKEN_SOT + shift,
            token_transcribe: TOKEN_TRANSCRIBE,
            token_translate: TOKEN_TRANSLATE,
        })
    }

    /// Word fragment for `token`.
    ///
    /// A lookup miss inside the word range yields the empty string — the
    /// decoder must never fail on a token the table does not cover.
    pub fn word_for(&self, token: Token) -> &str {
        usize::try_from(token)
            .ok()
            .and_then(|idx| self.words.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Returns `true` for control tokens (any ID at or above `EOT`).
    pub fn is_special(&self, token: Token) -> bool {
        token >= self.token_eot
    }

    /// End-of-transcript token ID.
    pub fn eot(&self) -> Token {
        self.token_eot
    }

    /// Start-of-transcript token ID.
    pub fn sot(&self) -> Token {
        self.token_sot
    }

    /// Transcribe task token ID.
    pub fn transcribe(&self) -> Token {
        self.token_transcribe
    }

    /// Translate task token ID.
    pub fn translate(&self) -> Token {
        self.token_translate
    }

    /// Number of word entries in the table.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when the table has no entries (never after a
    /// successful load).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
