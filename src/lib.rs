//! # Railbird
//!
//! Railbird turns raw poker hand history transcripts into typed
//! records and answers questions about them: what was each hand
//! worth, how strong did a holding run, and how did a player's
//! sessions go.
//!
//! ## Modules
//!
//! - [`core`] has the card types and the hand strength evaluator
//! - [`hand_history`] parses PokerStars style transcripts, one hand
//!   or a whole export file at a time
//! - [`sessions`] reconstructs table sessions and win rates from
//!   parsed hands
//!
//! ## Quick start
//!
//! ```
//! use railbird::hand_history::parse;
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
//! let record = parse(text).unwrap();
//! assert_eq!("Hold'em No Limit", record.game_type);
//! assert_eq!(Some(1.0), record.bb_won);
//! ```
//!
//! Hand strength is scored with [`core::evaluate`], which grades
//! whatever mix of hole cards and board cards is known so far:
//!
//! ```
//! use railbird::core::{evaluate, BoardCard, Card, HandClass};
//!
//! let hole = vec!["Ah".parse::<Card>().unwrap(), "Kh".parse().unwrap()];
//! let board: Vec<BoardCard> = ["Qh", "Jh", "Th"]
//!     .iter()
//!     .map(|c| BoardCard::from(c.parse::<Card>().unwrap()))
//!     .collect();
//!
//! assert_eq!(HandClass::RoyalFlush, evaluate(&hole, &board).class);
//! ```
pub mod core;
pub mod hand_history;
pub mod sessions;
