//! Typed representation of a single parsed hand.

use std::fmt;

use chrono::NaiveDateTime;

use crate::core::card::Card;

use super::errors::ParseWarning;

/// Format tag written into every record this crate produces.
///
/// Bumped whenever the record shape changes, so stored records can
/// be told apart without probing their fields.
pub const HAND_RECORD_VERSION: u32 = 1;

/// Betting rounds in deal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Round {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Round {
    pub const fn name(self) -> &'static str {
        match self {
            Round::Preflop => "preflop",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "river",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a player did, with whatever amounts the line carried.
///
/// Amounts are `None` when the line had none or the figure failed to
/// parse. A missing amount never drops the action itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Fold,
    /// Folded face up.
    FoldShow { cards: Vec<Card> },
    Check,
    Call {
        amount: Option<f64>,
    },
    Bet {
        amount: Option<f64>,
    },
    /// `amount` is the size of the raise, `total` the figure it was
    /// raised to.
    Raise {
        amount: Option<f64>,
        total: Option<f64>,
    },
    /// Showed a hand, with the site's description when present.
    Show {
        cards: Vec<Card>,
        description: Option<String>,
    },
    /// Declined to show.
    Mucked,
}

/// One action line attributed to a player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
}

/// One roster entry from the seat list at the top of a hand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatedPlayer {
    pub seat: u8,
    pub name: String,
    /// Starting stack in currency units.
    pub stack: f64,
}

/// The actions of one street plus any community cards it dealt.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BettingRound {
    pub actions: Vec<Action>,
    /// Cards this street put on the board: three on the flop, one
    /// each on the turn and river, none preflop.
    pub community_cards: Vec<Card>,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShownHand {
    pub player: String,
    pub cards: Vec<Card>,
    /// The site's reading of the hand, e.g. `two pair, Kings and
    /// Nines`.
    pub description: Option<String>,
}

/// One pot collection. Split pots produce several.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotAward {
    pub player: String,
    pub amount: f64,
}

/// The showdown section: who showed what and who collected.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Showdown {
    pub reveals: Vec<ShownHand>,
    pub awards: Vec<PotAward>,
}

/// One `Seat n:` line from the summary section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatResult {
    pub seat: u8,
    pub player: String,
    /// Position marker: `button`, `small blind`, or `big blind`.
    pub position: Option<String>,
    /// The rest of the line: folded, collected, showed and won, ...
    pub outcome: String,
    /// The made hand named after `showed [...] and won/lost with`.
    pub hand_description: Option<String>,
}

/// A fully parsed hand history.
///
/// Everything the transcript yielded lands here. Optional fields are
/// `None` when the hand simply never had them (no flop, no showdown)
/// or when the line carrying them failed to parse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    /// Record format tag, [`HAND_RECORD_VERSION`].
    pub version: u32,
    /// Site assigned hand id.
    pub hand_id: u64,
    /// The unmodified transcript text.
    pub raw_text: String,
    /// Game description from the header, e.g. `Hold'em No Limit`.
    pub game_type: String,
    pub small_blind: f64,
    pub big_blind: f64,
    pub table_name: Option<String>,
    /// Header timestamp. `None` when missing or out of range.
    pub played_at: Option<NaiveDateTime>,
    /// Seat roster in listing order.
    pub players: Vec<SeatedPlayer>,
    /// Seat number holding the button.
    pub dealer_seat: Option<u8>,
    /// Name of the player on the button, resolved through the
    /// roster.
    pub dealer: Option<String>,
    pub small_blind_poster: Option<String>,
    pub big_blind_poster: Option<String>,
    pub preflop: Option<BettingRound>,
    pub flop: Option<BettingRound>,
    pub turn: Option<BettingRound>,
    pub river: Option<BettingRound>,
    pub showdown: Option<Showdown>,
    /// First player seen collecting from the pot.
    pub winner: Option<String>,
    /// What that player collected, in currency units.
    pub amount_won: Option<f64>,
    /// `amount_won` divided by the big blind.
    pub bb_won: Option<f64>,
    /// Total pot from the summary.
    pub pot_total: Option<f64>,
    /// Rake from the summary.
    pub rake: Option<f64>,
    /// Final board from the summary.
    pub board: Vec<Card>,
    /// Per seat outcome lines from the summary.
    pub seat_results: Vec<SeatResult>,
    /// Everything odd the parser noticed without rejecting the hand.
    pub warnings: Vec<ParseWarning>,
}

impl HandRecord {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Roster names in seat listing order.
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    /// Whether `name` was dealt into this hand.
    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn seat(&self, seat: u8) -> Option<&SeatedPlayer> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// The betting round for a street, if the hand reached it.
    pub fn round(&self, round: Round) -> Option<&BettingRound> {
        match round {
            Round::Preflop => self.preflop.as_ref(),
            Round::Flop => self.flop.as_ref(),
            Round::Turn => self.turn.as_ref(),
            Round::River => self.river.as_ref(),
        }
    }

    /// Every street the hand reached, in deal order.
    pub fn rounds(&self) -> impl Iterator<Item = (Round, &BettingRound)> {
        [Round::Preflop, Round::Flop, Round::Turn, Round::River]
            .into_iter()
            .filter_map(|round| self.round(round).map(|betting| (round, betting)))
    }

    pub fn has_showdown(&self) -> bool {
        self.showdown.is_some()
    }
}
