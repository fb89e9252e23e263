//! # Session Analytics
//!
//! This module reconstructs playing sessions from parsed hands and
//! aggregates them into win rates.
//!
//! ## Features
//!
//! - **Session detection**: [`identify_sessions`] splits a table's
//!   hand stream wherever the player sat out
//! - **Win rates**: [`PlayerStats`] rolls sessions up into hands per
//!   hour and milli big blind rates
//! - **Storage**: [`HandStore`] abstracts where hands live, with
//!   [`MemoryHandStore`] as the in-memory implementation
//!
//! ## Usage
//!
//! ```
//! use railbird::hand_history::parse;
//! use railbird::sessions::{HandStore, MemoryHandStore, SessionAnalyzer};
//!
//! let text = "PokerStars Hand #5:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET
//! Table 'Echo' 2-max Seat #1 is the button
//! Seat 1: alice ($50 in chips)
//! Seat 2: bob ($50 in chips)
//! alice: posts small blind $0.50
//! bob: posts big blind $1
//! *** HOLE CARDS ***
//! alice: folds
//! bob collected $1 from pot
//! ";
//!
//! let mut store = MemoryHandStore::new();
//! store.append(parse(text).unwrap());
//!
//! let analyzer = SessionAnalyzer::default();
//! let stats = analyzer.player_stats(&store, "bob");
//! assert_eq!(1, stats.total_hands);
//! ```
mod session;
mod stats;
mod store;

pub use session::*;
pub use stats::*;
pub use store::*;
