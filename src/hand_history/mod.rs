//! # Hand History Parsing
//!
//! This module turns PokerStars style hand history transcripts into
//! typed [`HandRecord`] values.
//!
//! ## Features
//!
//! - **Single hand parsing**: [`parse`] reads one transcript with
//!   warning based degradation for everything short of a missing
//!   header
//! - **Batch parsing**: [`batch`] splits whole export files and keeps
//!   going past malformed hands
//! - **Lossy decoding**: [`batch::decode_lossy`] accepts exports that
//!   are not quite UTF-8
//!
//! ## Usage
//!
//! ```no_run
//! use railbird::hand_history::batch;
//!
//! let text = std::fs::read("hands.txt").unwrap();
//! let outcome = batch::parse_all_bytes(&text);
//! for record in &outcome.records {
//!     println!("hand {} at {:?}", record.hand_id, record.table_name);
//! }
//! ```
pub mod batch;
mod errors;
mod parser;
mod record;

pub use errors::*;
pub use parser::parse;
pub use record::*;
