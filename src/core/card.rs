use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced when a two character card code can't be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCardError {
    /// Card codes are exactly one value character and one suit character.
    #[error("card strings are two characters, got {length}")]
    InvalidLength { length: usize },
    /// The first character wasn't a recognized value.
    #[error("unexpected value character {value_char:?}")]
    InvalidValue { value_char: char },
    /// The second character wasn't a recognized suit.
    #[error("unexpected suit character {suit_char:?}")]
    InvalidSuit { suit_char: char },
}

/// Card rank, ordered from `Two` up to `Ace`.
///
/// The discriminants are stable and dense so a value can index a
/// 13 slot count table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// All values in ascending order.
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Every value, from `Two` to `Ace`.
    pub const fn values() -> [Self; 13] {
        VALUES
    }

    /// Parse a single character into a value.
    ///
    /// Ten is written `T`. Lowercase is accepted since hand history
    /// exports are not consistent about case.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbird::core::Value;
    ///
    /// assert_eq!(Some(Value::Ace), Value::from_char('A'));
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(None, Value::from_char('x'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' | 't' => Some(Value::Ten),
            'J' | 'j' => Some(Value::Jack),
            'Q' | 'q' => Some(Value::Queen),
            'K' | 'k' => Some(Value::King),
            'A' | 'a' => Some(Value::Ace),
            _ => None,
        }
    }

    /// The canonical character for this value.
    pub const fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }

    /// Absolute rank distance between two values.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbird::core::Value;
    ///
    /// assert_eq!(1, Value::Ace.gap(Value::King));
    /// assert_eq!(4, Value::Six.gap(Value::Ten));
    /// ```
    pub fn gap(self, other: Self) -> u8 {
        (self as i8 - other as i8).unsigned_abs()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All suits.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Every suit.
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    /// Parse a single character into a suit.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' | 'S' => Some(Suit::Spade),
            'c' | 'C' => Some(Suit::Club),
            'h' | 'H' => Some(Suit::Heart),
            'd' | 'D' => Some(Suit::Diamond),
            _ => None,
        }
    }

    /// The canonical character for this suit.
    pub const fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A playing card, a value and a suit.
///
/// Cards order by value first so sorting a hand puts the highest rank
/// last regardless of suit.
///
/// # Examples
///
/// ```
/// use railbird::core::{Card, Suit, Value};
///
/// let card: Card = "Kh".parse().unwrap();
/// assert_eq!(Card::new(Value::King, Suit::Heart), card);
/// assert_eq!("Kh", card.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    /// The face value.
    pub value: Value,
    /// The suit.
    pub suit: Suit,
}

impl Card {
    /// Create a new card.
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (value_char, suit_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(v), Some(s), None) => (v, s),
            _ => {
                return Err(ParseCardError::InvalidLength {
                    length: s.chars().count(),
                });
            }
        };
        let value = Value::from_char(value_char).ok_or(ParseCardError::InvalidValue { value_char })?;
        let suit = Suit::from_char(suit_char).ok_or(ParseCardError::InvalidSuit { suit_char })?;
        Ok(Card { value, suit })
    }
}
