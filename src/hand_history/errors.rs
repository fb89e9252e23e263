use thiserror::Error;

use super::record::Round;

/// Fatal problems that reject a hand outright.
///
/// Only the header requirements and the hole cards marker are load
/// bearing. Everything else the parser meets degrades to an absent
/// field or a [`ParseWarning`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// The header carried no usable hand id, game type, or blind
    /// sizes.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },
    /// No hole cards marker, so the roster scan has no boundary and
    /// there is no hand to parse.
    #[error("hand #{hand_id} has no hole cards section")]
    MissingHoleCardsSection { hand_id: u64 },
}

/// Recoverable oddities noticed while parsing.
///
/// Warnings never reject a hand. They ride along on the parsed
/// record so consumers can decide how much to trust each field.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// A line with an action separator used a verb this parser does
    /// not know. The line was skipped.
    #[error("unrecognized {round} action line: {line:?}")]
    UnrecognizedActionLine { round: Round, line: String },
    /// The button seat or a blind post named nobody in the roster.
    /// The field was left unset.
    #[error("could not resolve the {field} to a seated player")]
    UnresolvedDealerOrBlindPlayer { field: String },
    /// More than one player collected from the pot. The first one
    /// stands as the canonical winner.
    #[error("multiple players collected from the pot: {collectors:?}")]
    AmbiguousWinner { collectors: Vec<String> },
    /// The source bytes were not valid UTF-8 and were decoded with
    /// replacement characters.
    #[error("replaced {substitutions} invalid byte sequences while decoding")]
    EncodingError { substitutions: usize },
}
