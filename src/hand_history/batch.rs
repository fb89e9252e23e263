//! Batch helpers for files holding many hands back to back.
//!
//! Exported hand history files concatenate transcripts, each opening
//! with the `PokerStars Hand #` banner. These helpers split such a
//! file, decode not quite UTF-8 exports, and drive the single hand
//! parser over every block while keeping going past bad ones.

use std::borrow::Cow;

use tracing::{debug, instrument, warn};

use super::errors::{ParseError, ParseWarning};
use super::parser::parse;
use super::record::HandRecord;

/// Banner that opens every hand block.
pub const HAND_START: &str = "PokerStars Hand #";

/// Split a file's text into per-hand blocks.
///
/// Every block after the first starts with the banner. Text before
/// the first banner (client chatter, partial truncation) is returned
/// as a leading block so callers can count it as skipped.
pub fn split_hands(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut from = 0;
    while let Some(found) = text[from..].find(HAND_START) {
        let at = from + found;
        if at > start {
            blocks.push(&text[start..at]);
        }
        start = at;
        from = at + HAND_START.len();
    }
    if start < text.len() {
        blocks.push(&text[start..]);
    }
    blocks
}

fn is_hand_chunk(chunk: &str) -> bool {
    chunk.trim_start().starts_with(HAND_START)
}

/// Decode raw export bytes, substituting the replacement character
/// for anything that is not UTF-8. Exports occasionally arrive in
/// latin-1 flavored encodings; the grammar anchors are all ASCII so
/// parsing still works on the lossy text.
pub fn decode_lossy(bytes: &[u8]) -> (Cow<'_, str>, Option<ParseWarning>) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), None),
        Err(_) => {
            let text = String::from_utf8_lossy(bytes);
            let substitutions = text.matches(char::REPLACEMENT_CHARACTER).count();
            warn!(substitutions, "input was not valid UTF-8, decoded lossily");
            (text, Some(ParseWarning::EncodingError { substitutions }))
        }
    }
}

/// Lazily parse every hand block in the text. Blocks that do not
/// start with the banner are dropped without an entry.
pub fn parse_iter(text: &str) -> impl Iterator<Item = Result<HandRecord, ParseError>> + '_ {
    split_hands(text)
        .into_iter()
        .filter(|chunk| is_hand_chunk(chunk))
        .map(parse)
}

/// Counts from a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Hands parsed into records.
    pub processed: usize,
    /// Banner blocks the parser rejected.
    pub failed: usize,
    /// Non-banner noise blocks.
    pub skipped: usize,
}

/// A block the parser rejected, kept with its position in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub block_index: usize,
    pub error: ParseError,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub records: Vec<HandRecord>,
    pub failures: Vec<BatchFailure>,
    pub summary: BatchSummary,
}

/// Parse every hand in the text, collecting records and failures
/// side by side. One malformed hand never aborts the file.
#[instrument(level = "debug", skip_all)]
pub fn parse_all(text: &str) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (block_index, chunk) in split_hands(text).into_iter().enumerate() {
        if chunk.trim().is_empty() {
            continue;
        }
        if !is_hand_chunk(chunk) {
            debug!(block_index, "skipping block without a hand banner");
            outcome.summary.skipped += 1;
            continue;
        }
        match parse(chunk) {
            Ok(record) => {
                outcome.records.push(record);
                outcome.summary.processed += 1;
            }
            Err(error) => {
                warn!(block_index, %error, "failed to parse hand block");
                outcome.failures.push(BatchFailure { block_index, error });
                outcome.summary.failed += 1;
            }
        }
    }
    debug!(
        processed = outcome.summary.processed,
        failed = outcome.summary.failed,
        skipped = outcome.summary.skipped,
        "batch finished"
    );
    outcome
}

/// [`parse_all`] over raw bytes. When the bytes were not UTF-8 the
/// encoding warning is attached to every parsed record.
pub fn parse_all_bytes(bytes: &[u8]) -> BatchOutcome {
    let (text, encoding_warning) = decode_lossy(bytes);
    let mut outcome = parse_all(&text);
    if let Some(warning) = encoding_warning {
        for record in &mut outcome.records {
            record.warnings.push(warning.clone());
        }
    }
    outcome
}
