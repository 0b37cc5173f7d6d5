//! Token stream decoding.
//!
//! [`decode`] turns the raw token sequence from the inference engine into
//! human-readable text: word-range tokens (below `EOT`) contribute their
//! vocabulary fragment, control tokens are recognized for telemetry only,
//! and the first `EOT` ends decoding.

use crate::stt::engine::Token;
use crate::stt::vocab::Vocabulary;

/// Decode `tokens` against `vocab` into the transcript text.
///
/// - Stops at the first `EOT`, which is not included in the output.
/// - Word fragments concatenate directly; the model's fragments already
///   carry leading spaces where needed.
/// - Control tokens (`>= EOT`, including `TRANSCRIBE` and `TRANSLATE`) are
///   skipped; the task tokens are logged at debug level.
/// - An unknown in-range token decodes to the empty string, never an error.
/// - Without an `EOT` the whole stream is consumed.
pub fn decode(tokens: &[Token], vocab: &Vocabulary) -> String {
    let mut text = String::new();

    for &token in tokens {
        if token == vocab.eot() {
            break;
        }

        if token < vocab.eot() {
            text.push_str(vocab.word_for(token));
        } else {
            if token == vocab.transcribe() {
                log::debug!("decode: transcription task token");
            } else if token == vocab.translate() {
                log::debug!("decode: translation task token");
            }
            log::debug!("decode: skipping control token {token}");
        }
    }

    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
