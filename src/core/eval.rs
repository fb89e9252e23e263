//! Hand strength evaluation over whatever slice of a hand a
//! transcript exposes.
//!
//! Unlike a showdown ranker this module never assumes all seven cards
//! are known. Two hole cards with no board are scored with preflop
//! heuristics, three or four known cards report draws, and five or
//! more cards rank as a made hand.

use crate::core::card::{Card, Suit, Value};

/// Everything a hand can be classified as, weakest first.
///
/// The declaration order is the comparison order. Draw classes sort
/// below every made hand since a draw has not connected yet, and the
/// preflop heuristic classes slot in between a bare high card and a
/// made pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum HandClass {
    /// Too few known cards to say anything.
    Incomplete,
    /// Partial board with the distinct ranks close enough to fill a
    /// straight.
    StraightDraw,
    /// Partial board with three or more of one suit.
    FlushDraw,
    /// Nothing made and the best rank is below a queen.
    LowCard,
    /// Nothing made, queen high or better.
    HighCard,
    /// Offsuit hole cards no more than four ranks apart.
    Connectors,
    /// Suited hole cards too far apart to straighten easily.
    SuitedCards,
    /// Suited hole cards no more than four ranks apart.
    SuitedConnectors,
    /// Two broadway hole cards, queen high or better with a ten or
    /// better behind it.
    StrongHighCards,
    /// One pair.
    Pair,
    /// A pocket pair of tens or better.
    HighPair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five ranks in a row.
    Straight,
    /// Five of one suit.
    Flush,
    /// Three of a kind plus a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// A straight all in one suit.
    StraightFlush,
    /// Ten through ace, all in one suit.
    RoyalFlush,
}

impl HandClass {
    /// Human readable label, as a hand history would describe it.
    pub const fn name(self) -> &'static str {
        match self {
            HandClass::Incomplete => "Incomplete",
            HandClass::StraightDraw => "Straight Draw",
            HandClass::FlushDraw => "Flush Draw",
            HandClass::LowCard => "Low Card",
            HandClass::HighCard => "High Card",
            HandClass::Connectors => "Connectors",
            HandClass::SuitedCards => "Suited Cards",
            HandClass::SuitedConnectors => "Suited Connectors",
            HandClass::StrongHighCards => "Strong High Cards",
            HandClass::Pair => "Pair",
            HandClass::HighPair => "High Pair",
            HandClass::TwoPair => "Two Pair",
            HandClass::ThreeOfAKind => "Three of a Kind",
            HandClass::Straight => "Straight",
            HandClass::Flush => "Flush",
            HandClass::FullHouse => "Full House",
            HandClass::FourOfAKind => "Four of a Kind",
            HandClass::StraightFlush => "Straight Flush",
            HandClass::RoyalFlush => "Royal Flush",
        }
    }

    /// Coarse numeric tier for aggregation.
    ///
    /// Draws and incomplete hands are `-1` since they carry no made
    /// strength. All the unmade heuristic classes share tier `0` with
    /// high card, pocket pairs share tier `1` with any other pair,
    /// and the made hands count up from two pair at `2` to a royal
    /// flush at `9`.
    pub const fn rank_index(self) -> i8 {
        match self {
            HandClass::Incomplete | HandClass::StraightDraw | HandClass::FlushDraw => -1,
            HandClass::LowCard
            | HandClass::HighCard
            | HandClass::Connectors
            | HandClass::SuitedCards
            | HandClass::SuitedConnectors
            | HandClass::StrongHighCards => 0,
            HandClass::Pair | HandClass::HighPair => 1,
            HandClass::TwoPair => 2,
            HandClass::ThreeOfAKind => 3,
            HandClass::Straight => 4,
            HandClass::Flush => 5,
            HandClass::FullHouse => 6,
            HandClass::FourOfAKind => 7,
            HandClass::StraightFlush => 8,
            HandClass::RoyalFlush => 9,
        }
    }
}

impl std::fmt::Display for HandClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The outcome of evaluating a hand.
///
/// Evaluations order by class first and tie break ranks second, so
/// two hands of the same class fall to their kickers.
///
/// # Examples
///
/// ```
/// use railbird::core::{evaluate, Card, HandClass};
///
/// let aces: Vec<Card> = ["Ah", "Ad"].iter().map(|s| s.parse().unwrap()).collect();
/// let kings: Vec<Card> = ["Kh", "Kd"].iter().map(|s| s.parse().unwrap()).collect();
///
/// let aces_up = evaluate(&aces, &[]);
/// let kings_up = evaluate(&kings, &[]);
/// assert_eq!(HandClass::HighPair, aces_up.class);
/// assert!(aces_up > kings_up);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandEvaluation {
    /// What the cards make.
    pub class: HandClass,
    /// Ranks that break ties inside the class, most significant
    /// first.
    pub tie_breaks: Vec<Value>,
}

impl HandEvaluation {
    fn new(class: HandClass, tie_breaks: Vec<Value>) -> Self {
        Self { class, tie_breaks }
    }

    /// Human readable label for the class.
    pub const fn name(&self) -> &'static str {
        self.class.name()
    }

    /// Coarse numeric tier for the class.
    pub const fn rank_index(&self) -> i8 {
        self.class.rank_index()
    }
}

/// One community card slot as a transcript reports it.
///
/// Exports pad undealt streets with `**` placeholders. A placeholder
/// slot carries no rank information so evaluation skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BoardCard {
    /// A face down placeholder.
    Hidden,
    /// A dealt, visible card.
    Seen(Card),
}

impl From<Card> for BoardCard {
    fn from(card: Card) -> Self {
        BoardCard::Seen(card)
    }
}

/// Evaluate hole cards against the visible community cards.
///
/// The amount of known information picks the mode:
///
/// * Exactly two hole cards and no visible board scores with the
///   preflop heuristics.
/// * Two hole cards and a full board ranks the made hand, from
///   [`HandClass::HighCard`] through [`HandClass::RoyalFlush`].
/// * Anything in between, or a hand with hidden hole cards, scores
///   as a partial hand which can surface draws. Fewer than three
///   known cards in total yields [`HandClass::Incomplete`].
///
/// The function never panics and never mutates its inputs. The same
/// cards always produce the same evaluation.
///
/// # Examples
///
/// ```
/// use railbird::core::{evaluate, BoardCard, Card, HandClass, Value};
///
/// let hole: Vec<Card> = ["Ah", "2d"].iter().map(|s| s.parse().unwrap()).collect();
/// let board: Vec<BoardCard> = ["3c", "4s", "5h"]
///     .iter()
///     .map(|s| s.parse::<Card>().unwrap().into())
///     .collect();
///
/// let wheel = evaluate(&hole, &board);
/// assert_eq!(HandClass::Straight, wheel.class);
/// assert_eq!(vec![Value::Five], wheel.tie_breaks);
/// ```
pub fn evaluate(private: &[Card], board: &[BoardCard]) -> HandEvaluation {
    let community: Vec<Card> = board
        .iter()
        .filter_map(|slot| match slot {
            BoardCard::Seen(card) => Some(*card),
            BoardCard::Hidden => None,
        })
        .collect();

    if private.len() == 2 && community.is_empty() {
        return evaluate_preflop(private[0], private[1]);
    }
    if private.len() >= 2 && private.len() + community.len() >= 5 {
        return evaluate_full(private, &community);
    }
    evaluate_partial(private, &community)
}

fn evaluate_preflop(first: Card, second: Card) -> HandEvaluation {
    let high = first.value.max(second.value);
    let low = first.value.min(second.value);

    if high == low {
        let class = if high >= Value::Ten {
            HandClass::HighPair
        } else {
            HandClass::Pair
        };
        return HandEvaluation::new(class, vec![high]);
    }

    // A queen or better high card outranks the texture classes.
    if high >= Value::Queen {
        let class = if low >= Value::Ten {
            HandClass::StrongHighCards
        } else {
            HandClass::HighCard
        };
        return HandEvaluation::new(class, vec![high, low]);
    }

    let suited = first.suit == second.suit;
    let connected = high.gap(low) <= 4;
    let class = match (suited, connected) {
        (true, true) => HandClass::SuitedConnectors,
        (true, false) => HandClass::SuitedCards,
        (false, true) => HandClass::Connectors,
        (false, false) => HandClass::HighCard,
    };
    HandEvaluation::new(class, vec![high, low])
}

fn evaluate_partial(private: &[Card], community: &[Card]) -> HandEvaluation {
    let cards = combine(private, community);
    if cards.len() < 3 {
        return HandEvaluation::new(HandClass::Incomplete, vec![]);
    }

    let counts = value_counts(&cards);

    let paired = values_with_at_least(&counts, 2);
    if paired.len() >= 2 {
        return HandEvaluation::new(HandClass::TwoPair, vec![paired[0], paired[1]]);
    }
    if let Some(&trips) = values_with_at_least(&counts, 3).first() {
        return HandEvaluation::new(HandClass::ThreeOfAKind, vec![trips]);
    }
    if let Some(&pair) = paired.first() {
        return HandEvaluation::new(HandClass::Pair, vec![pair]);
    }

    // Three of one suit is already a draw on a short board.
    for suit in Suit::suits() {
        let of_suit = suited_values_desc(&cards, suit);
        if of_suit.len() >= 3 {
            return HandEvaluation::new(HandClass::FlushDraw, vec![of_suit[0]]);
        }
    }

    // No pairs above, so every rank here is distinct.
    let distinct = values_desc(&counts);
    if distinct.len() >= 3 {
        let missing: u8 = distinct
            .windows(2)
            .map(|pair| pair[0] as u8 - pair[1] as u8 - 1)
            .sum();
        if missing <= 2 {
            return HandEvaluation::new(HandClass::StraightDraw, vec![distinct[0]]);
        }
    }

    let best = distinct[0];
    if best >= Value::Queen {
        HandEvaluation::new(HandClass::HighCard, vec![best])
    } else {
        HandEvaluation::new(HandClass::LowCard, vec![best])
    }
}

fn evaluate_full(private: &[Card], community: &[Card]) -> HandEvaluation {
    let cards = combine(private, community);
    let counts = value_counts(&cards);
    let distinct = values_desc(&counts);

    let flush_suit = Suit::suits()
        .into_iter()
        .find(|&suit| cards.iter().filter(|c| c.suit == suit).count() >= 5);

    // A straight flush must run inside the flush suit. A straight
    // spread over several suits alongside a flush is only a flush.
    if let Some(suit) = flush_suit {
        let suited = suited_values_desc(&cards, suit);
        if let Some(high) = straight_high(&suited) {
            if high == Value::Ace {
                return HandEvaluation::new(HandClass::RoyalFlush, vec![]);
            }
            return HandEvaluation::new(HandClass::StraightFlush, vec![high]);
        }
    }

    if let Some(&quads) = values_with_at_least(&counts, 4).first() {
        let kicker = distinct.iter().copied().find(|&v| v != quads);
        let mut tie_breaks = vec![quads];
        tie_breaks.extend(kicker);
        return HandEvaluation::new(HandClass::FourOfAKind, tie_breaks);
    }

    let trips = values_with_at_least(&counts, 3);
    let pairs: Vec<Value> = distinct
        .iter()
        .copied()
        .filter(|&v| counts[v as usize] == 2)
        .collect();

    // Two sets of trips also fill a full house, the lower set plays
    // as the pair.
    if let Some(&three) = trips.first() {
        let pair = trips
            .get(1)
            .copied()
            .into_iter()
            .chain(pairs.first().copied())
            .max();
        if let Some(pair) = pair {
            return HandEvaluation::new(HandClass::FullHouse, vec![three, pair]);
        }
    }

    if let Some(suit) = flush_suit {
        let mut suited = suited_values_desc(&cards, suit);
        suited.truncate(5);
        return HandEvaluation::new(HandClass::Flush, suited);
    }

    if let Some(high) = straight_high(&distinct) {
        return HandEvaluation::new(HandClass::Straight, vec![high]);
    }

    if let Some(&three) = trips.first() {
        let mut tie_breaks = vec![three];
        tie_breaks.extend(distinct.iter().copied().filter(|&v| v != three).take(2));
        return HandEvaluation::new(HandClass::ThreeOfAKind, tie_breaks);
    }

    if pairs.len() >= 2 {
        let kicker = distinct
            .iter()
            .copied()
            .find(|&v| v != pairs[0] && v != pairs[1]);
        let mut tie_breaks = vec![pairs[0], pairs[1]];
        tie_breaks.extend(kicker);
        return HandEvaluation::new(HandClass::TwoPair, tie_breaks);
    }
    if let Some(&pair) = pairs.first() {
        let mut tie_breaks = vec![pair];
        tie_breaks.extend(distinct.iter().copied().filter(|&v| v != pair).take(3));
        return HandEvaluation::new(HandClass::Pair, tie_breaks);
    }

    let tie_breaks = distinct.iter().copied().take(5).collect();
    HandEvaluation::new(HandClass::HighCard, tie_breaks)
}

fn combine(private: &[Card], community: &[Card]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(private.len() + community.len());
    cards.extend_from_slice(private);
    cards.extend_from_slice(community);
    cards
}

fn value_counts(cards: &[Card]) -> [u32; 13] {
    let mut counts = [0u32; 13];
    for card in cards {
        counts[card.value as usize] += 1;
    }
    counts
}

/// Distinct values present, descending.
fn values_desc(counts: &[u32; 13]) -> Vec<Value> {
    Value::values()
        .into_iter()
        .rev()
        .filter(|&v| counts[v as usize] > 0)
        .collect()
}

/// Values with at least `n` copies, descending.
fn values_with_at_least(counts: &[u32; 13], n: u32) -> Vec<Value> {
    Value::values()
        .into_iter()
        .rev()
        .filter(|&v| counts[v as usize] >= n)
        .collect()
}

/// Distinct values of one suit, descending.
fn suited_values_desc(cards: &[Card], suit: Suit) -> Vec<Value> {
    let mut values: Vec<Value> = cards
        .iter()
        .filter(|c| c.suit == suit)
        .map(|c| c.value)
        .collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values
}

/// Highest straight found in a descending list of distinct values.
///
/// Scans the high runs first so a six high straight on a wheel board
/// wins over the five high reading. The ace low wheel is only the
/// fallback.
fn straight_high(distinct_desc: &[Value]) -> Option<Value> {
    for window in distinct_desc.windows(5) {
        if window[0] as u8 - window[4] as u8 == 4 {
            return Some(window[0]);
        }
    }
    let wheel = [Value::Five, Value::Four, Value::Three, Value::Two];
    if distinct_desc.first() == Some(&Value::Ace) && wheel.iter().all(|v| distinct_desc.contains(v))
    {
        return Some(Value::Five);
    }
    None
}
