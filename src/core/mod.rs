//! Core card types and hand strength evaluation.

pub mod card;
pub mod eval;

pub use card::{Card, ParseCardError, Suit, Value};
pub use eval::{evaluate, BoardCard, HandClass, HandEvaluation};
