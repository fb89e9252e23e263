//! Line oriented parser for PokerStars style hand history text.
//!
//! A transcript is segmented by its stage markers (`*** HOLE CARDS
//! ***`, `*** FLOP ***`, ...). The segmenter only ever moves forward
//! through the stages and each stage owns its own line grammar, so a
//! showdown line can never be misread as a seat listing.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, instrument, warn};

use crate::core::card::Card;

use super::errors::{ParseError, ParseWarning};
use super::record::{
    Action, ActionKind, BettingRound, HandRecord, PotAward, Round, SeatResult, SeatedPlayer,
    Showdown, ShownHand, HAND_RECORD_VERSION,
};

/// Stage of the transcript the segmenter is in. Ordering is document
/// order; transitions only move up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    #[default]
    Header,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Summary,
}

const MARKERS: [(&str, Section); 6] = [
    ("*** HOLE CARDS ***", Section::Preflop),
    ("*** FLOP ***", Section::Flop),
    ("*** TURN ***", Section::Turn),
    ("*** RIVER ***", Section::River),
    ("*** SHOW DOWN ***", Section::Showdown),
    ("*** SUMMARY ***", Section::Summary),
];

/// The marker a line starts with, plus the rest of the line.
fn marker(line: &str) -> Option<(Section, &str)> {
    MARKERS
        .iter()
        .find_map(|&(text, section)| line.strip_prefix(text).map(|rest| (section, rest)))
}

/// Parse one hand history transcript into a typed record.
///
/// Only two conditions are fatal: a header without a hand id and
/// positive blind sizes, and a transcript without the hole cards
/// marker that bounds the roster scan. Every other extraction gap
/// degrades to an absent field, at most with a [`ParseWarning`]
/// recorded on the record.
///
/// # Examples
///
/// ```
/// use railbird::hand_history::parse;
///
/// let text = "PokerStars Hand #5:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET
/// Table 'Echo' 2-max Seat #1 is the button
/// Seat 1: alice ($50 in chips)
/// Seat 2: bob ($50 in chips)
/// alice: posts small blind $0.50
/// bob: posts big blind $1
/// *** HOLE CARDS ***
/// alice: folds
/// bob collected $1 from pot
/// ";
///
/// let record = parse(text).unwrap();
/// assert_eq!(5, record.hand_id);
/// assert_eq!(Some("bob".to_string()), record.winner);
/// ```
#[instrument(level = "trace", skip_all)]
pub fn parse(raw_hand: &str) -> Result<HandRecord, ParseError> {
    let mut parser = HandParser::default();
    for raw_line in raw_hand.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        parser.feed(line);
    }
    parser.finish(raw_hand)
}

#[derive(Default)]
struct HandParser {
    section: Section,
    hand_id: Option<u64>,
    game: Option<(String, f64, f64)>,
    table_name: Option<String>,
    played_at: Option<NaiveDateTime>,
    players: Vec<SeatedPlayer>,
    dealer_seat: Option<u8>,
    small_blind_poster: Option<String>,
    big_blind_poster: Option<String>,
    preflop: Option<BettingRound>,
    flop: Option<BettingRound>,
    turn: Option<BettingRound>,
    river: Option<BettingRound>,
    showdown: Option<Showdown>,
    pot_total: Option<f64>,
    rake: Option<f64>,
    board: Option<Vec<Card>>,
    seat_results: Vec<SeatResult>,
    collectors: Vec<PotAward>,
    warnings: Vec<ParseWarning>,
}

impl HandParser {
    fn feed(&mut self, line: &str) {
        if let Some((section, rest)) = marker(line) {
            // Repeated or out of order markers are dropped whole.
            if section > self.section {
                self.enter(section, rest.trim());
            }
            return;
        }

        if self.section != Section::Header {
            if let Some(award) = collected_award(line) {
                if self.section == Section::Showdown {
                    if let Some(showdown) = self.showdown.as_mut() {
                        showdown.awards.push(award.clone());
                    }
                }
                self.collectors.push(award);
            }
        }

        match self.section {
            Section::Header => self.header_line(line),
            Section::Preflop => self.action_line(Round::Preflop, line),
            Section::Flop => self.action_line(Round::Flop, line),
            Section::Turn => self.action_line(Round::Turn, line),
            Section::River => self.action_line(Round::River, line),
            Section::Showdown => self.showdown_line(line),
            Section::Summary => self.summary_line(line),
        }
    }

    /// Open a stage. The marker line's remainder carries the cards
    /// dealt for the street.
    fn enter(&mut self, section: Section, rest: &str) {
        self.section = section;
        match section {
            Section::Header => {}
            Section::Preflop => {
                self.preflop = Some(BettingRound::default());
            }
            Section::Flop => {
                self.flop = Some(BettingRound {
                    actions: vec![],
                    community_cards: first_card_group(rest).unwrap_or_default(),
                });
            }
            Section::Turn | Section::River => {
                // The marker repeats the board so far; the newest
                // card is the last one of the last bracket group.
                let community_cards = last_card_of_last_group(rest).into_iter().collect();
                let round = BettingRound {
                    actions: vec![],
                    community_cards,
                };
                if section == Section::Turn {
                    self.turn = Some(round);
                } else {
                    self.river = Some(round);
                }
            }
            Section::Showdown => {
                self.showdown = Some(Showdown::default());
            }
            Section::Summary => {}
        }
    }

    fn header_line(&mut self, line: &str) {
        if self.hand_id.is_none() {
            self.hand_id = scan_hand_id(line);
        }
        if self.game.is_none() {
            self.game = scan_game_info(line);
        }
        if self.table_name.is_none() {
            self.table_name = scan_table_name(line);
        }
        if self.played_at.is_none() {
            self.played_at = scan_timestamp(line);
        }
        if self.dealer_seat.is_none() {
            self.dealer_seat = scan_button_seat(line);
        }
        if line.starts_with("Seat ") {
            self.roster_line(line);
        }
        if self.small_blind_poster.is_none() {
            self.small_blind_poster = poster(line, ": posts small blind");
        }
        if self.big_blind_poster.is_none() {
            self.big_blind_poster = poster(line, ": posts big blind");
        }
    }

    fn roster_line(&mut self, line: &str) {
        let Some(player) = parse_seat_line(line) else {
            return;
        };
        // First listing wins when a seat number repeats.
        if self.players.iter().any(|p| p.seat == player.seat) {
            return;
        }
        self.players.push(player);
    }

    fn action_line(&mut self, round: Round, line: &str) {
        // No separator means chatter like uncalled bet returns.
        let Some(colon) = line.find(": ") else {
            return;
        };
        let player = line[..colon].trim().to_string();
        let text = line[colon + 2..].trim();
        let Some(kind) = action_kind(text) else {
            self.warning(ParseWarning::UnrecognizedActionLine {
                round,
                line: line.to_string(),
            });
            return;
        };
        if let Some(betting) = self.round_mut(round) {
            betting.actions.push(Action { player, kind });
        }
    }

    fn showdown_line(&mut self, line: &str) {
        let Some(at) = line.find(": shows [") else {
            return;
        };
        let player = line[..at].trim().to_string();
        let rest = &line[at + ": shows ".len()..];
        let reveal = ShownHand {
            player,
            cards: first_card_group(rest).unwrap_or_default(),
            description: parenthetical_after_bracket(rest),
        };
        if let Some(showdown) = self.showdown.as_mut() {
            showdown.reveals.push(reveal);
        }
    }

    fn summary_line(&mut self, line: &str) {
        if self.pot_total.is_none() {
            if let Some((pot, rake)) = scan_pot_and_rake(line) {
                self.pot_total = Some(pot);
                self.rake = Some(rake);
            }
        }
        if self.board.is_none() {
            self.board = scan_board(line);
        }
        if line.starts_with("Seat ") {
            if let Some(result) = self.parse_summary_seat(line) {
                self.seat_results.push(result);
            }
        }
    }

    fn parse_summary_seat(&self, line: &str) -> Option<SeatResult> {
        let rest = line.strip_prefix("Seat ")?;
        let colon = rest.find(": ")?;
        let seat: u8 = rest[..colon].parse().ok()?;
        let body = &rest[colon + 2..];

        // The roster already knows the exact name for this seat,
        // which keeps names containing parentheses intact.
        if let Some(player) = self.seat_name(seat) {
            if let Some(after) = body.strip_prefix(player.as_str()) {
                if after.is_empty() || after.starts_with(' ') {
                    let (position, outcome) = split_position(after.trim_start());
                    let hand_description = outcome_description(&outcome);
                    return Some(SeatResult {
                        seat,
                        player,
                        position,
                        outcome,
                        hand_description,
                    });
                }
            }
        }

        // Seat without a roster entry. Fall back to splitting at the
        // first parenthetical: name, position, outcome.
        let open = body.find(" (")?;
        let player = body[..open].to_string();
        let after = &body[open + 2..];
        let close = after.find(')')?;
        let position = after[..close].to_string();
        let outcome = after.get(close + 1..)?.strip_prefix(' ')?.to_string();
        let hand_description = outcome_description(&outcome);
        Some(SeatResult {
            seat,
            player,
            position: Some(position),
            outcome,
            hand_description,
        })
    }

    fn seat_name(&self, seat: u8) -> Option<String> {
        self.players
            .iter()
            .find(|p| p.seat == seat)
            .map(|p| p.name.clone())
    }

    fn round_mut(&mut self, round: Round) -> Option<&mut BettingRound> {
        match round {
            Round::Preflop => self.preflop.as_mut(),
            Round::Flop => self.flop.as_mut(),
            Round::Turn => self.turn.as_mut(),
            Round::River => self.river.as_mut(),
        }
    }

    fn warning(&mut self, warning: ParseWarning) {
        warn!(hand_id = ?self.hand_id, %warning, "problem while parsing hand");
        self.warnings.push(warning);
    }

    fn finish(mut self, raw_hand: &str) -> Result<HandRecord, ParseError> {
        let Some(hand_id) = self.hand_id else {
            return Err(ParseError::MalformedHeader {
                reason: "no hand id found".to_string(),
            });
        };
        let Some((game_type, small_blind, big_blind)) = self.game.take() else {
            return Err(ParseError::MalformedHeader {
                reason: "no game type and blind sizes found".to_string(),
            });
        };
        if big_blind <= 0.0 {
            return Err(ParseError::MalformedHeader {
                reason: "big blind must be positive".to_string(),
            });
        }
        if self.preflop.is_none() {
            return Err(ParseError::MissingHoleCardsSection { hand_id });
        }

        let dealer = self
            .dealer_seat
            .and_then(|seat| self.seat_name(seat));
        if self.dealer_seat.is_some() && dealer.is_none() {
            self.warning(ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "dealer".to_string(),
            });
        }
        if self.small_blind_poster.is_none() {
            self.warning(ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "small blind poster".to_string(),
            });
        }
        if self.big_blind_poster.is_none() {
            self.warning(ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "big blind poster".to_string(),
            });
        }

        let mut collectors: Vec<String> = Vec::new();
        for award in &self.collectors {
            if !collectors.contains(&award.player) {
                collectors.push(award.player.clone());
            }
        }
        if collectors.len() > 1 {
            self.warning(ParseWarning::AmbiguousWinner { collectors });
        }
        let winner = self.collectors.first().map(|award| award.player.clone());
        let amount_won = self.collectors.first().map(|award| award.amount);
        let bb_won = amount_won.map(|amount| amount / big_blind);

        let record = HandRecord {
            version: HAND_RECORD_VERSION,
            hand_id,
            raw_text: raw_hand.to_string(),
            game_type,
            small_blind,
            big_blind,
            table_name: self.table_name,
            played_at: self.played_at,
            players: self.players,
            dealer_seat: self.dealer_seat,
            dealer,
            small_blind_poster: self.small_blind_poster,
            big_blind_poster: self.big_blind_poster,
            preflop: self.preflop,
            flop: self.flop,
            turn: self.turn,
            river: self.river,
            showdown: self.showdown,
            winner,
            amount_won,
            bb_won,
            pot_total: self.pot_total,
            rake: self.rake,
            board: self.board.unwrap_or_default(),
            seat_results: self.seat_results,
            warnings: self.warnings,
        };
        debug!(
            hand_id = record.hand_id,
            players = record.players.len(),
            warnings = record.warnings.len(),
            "parsed hand"
        );
        Ok(record)
    }
}

fn scan_hand_id(line: &str) -> Option<u64> {
    let mut rest = line;
    while let Some(at) = rest.find("Hand #") {
        let tail = &rest[at + "Hand #".len()..];
        let digits = leading_digits(tail);
        if !digits.is_empty() {
            if let Ok(id) = digits.parse() {
                return Some(id);
            }
        }
        rest = tail;
    }
    None
}

/// Match the header's game description and blind sizes: a colon,
/// whitespace, the game name, then `($X/$Y`.
fn scan_game_info(line: &str) -> Option<(String, f64, f64)> {
    for (idx, _) in line.match_indices(':') {
        let after = &line[idx + 1..];
        let ws = after.len() - after.trim_start().len();
        if ws == 0 {
            continue;
        }
        let rest = &after[ws..];
        let run_end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\'' || c == ' '))
            .unwrap_or(rest.len());
        if run_end == 0 {
            continue;
        }
        let run = &rest[..run_end];
        let mut tail = &rest[run_end..];
        let tail_ws = tail.len() - tail.trim_start().len();
        // At least one space must sit between the name and the paren.
        if !run.ends_with(' ') && tail_ws == 0 {
            continue;
        }
        tail = &tail[tail_ws..];
        let name = run.trim();
        if name.is_empty() {
            continue;
        }
        let Some(tail) = tail.strip_prefix("($") else {
            continue;
        };
        let Some((small, tail)) = leading_float(tail) else {
            continue;
        };
        let Some(tail) = tail.strip_prefix("/$") else {
            continue;
        };
        let Some((big, _)) = leading_float(tail) else {
            continue;
        };
        return Some((name.to_string(), small, big));
    }
    None
}

fn scan_table_name(line: &str) -> Option<String> {
    let at = line.find("Table '")?;
    let rest = &line[at + "Table '".len()..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Find `YYYY/MM/DD H:MM:SS` in the line, one or two digit hour. The
/// first textual match wins; an out of range date degrades to `None`
/// rather than scanning on.
fn scan_timestamp(line: &str) -> Option<NaiveDateTime> {
    let bytes = line.as_bytes();
    for start in 0..bytes.len() {
        let Some([year, month, day, hour, minute, second]) = match_timestamp(&bytes[start..])
        else {
            continue;
        };
        return NaiveDate::from_ymd_opt(year as i32, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second));
    }
    None
}

fn match_timestamp(bytes: &[u8]) -> Option<[u32; 6]> {
    let (year, i) = read_digits(bytes, 0, 4)?;
    let i = expect_byte(bytes, i, b'/')?;
    let (month, i) = read_digits(bytes, i, 2)?;
    let i = expect_byte(bytes, i, b'/')?;
    let (day, i) = read_digits(bytes, i, 2)?;
    let i = expect_byte(bytes, i, b' ')?;
    let (hour, i) = read_digits(bytes, i, 2).or_else(|| read_digits(bytes, i, 1))?;
    let i = expect_byte(bytes, i, b':')?;
    let (minute, i) = read_digits(bytes, i, 2)?;
    let i = expect_byte(bytes, i, b':')?;
    let (second, _) = read_digits(bytes, i, 2)?;
    Some([year, month, day, hour, minute, second])
}

fn read_digits(bytes: &[u8], at: usize, n: usize) -> Option<(u32, usize)> {
    if at + n > bytes.len() {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[at..at + n] {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Some((value, at + n))
}

fn expect_byte(bytes: &[u8], at: usize, byte: u8) -> Option<usize> {
    (bytes.get(at) == Some(&byte)).then_some(at + 1)
}

fn scan_button_seat(line: &str) -> Option<u8> {
    let mut rest = line;
    while let Some(at) = rest.find("Seat #") {
        let tail = &rest[at + "Seat #".len()..];
        let digits = leading_digits(tail);
        if !digits.is_empty() && tail[digits.len()..].starts_with(" is the button") {
            if let Ok(seat) = digits.parse() {
                return Some(seat);
            }
        }
        rest = tail;
    }
    None
}

/// Parse `Seat <n>: <name> ($<stack>)`, with or without the trailing
/// `in chips`. The name runs up to the first parenthetical that opens
/// a stack figure, so names that contain parentheses survive.
fn parse_seat_line(line: &str) -> Option<SeatedPlayer> {
    let rest = line.strip_prefix("Seat ")?;
    let colon = rest.find(':')?;
    let seat: u8 = rest[..colon].parse().ok()?;
    let name_zone = rest.get(colon + 1..)?.strip_prefix(' ')?;
    for (idx, _) in name_zone.match_indices(" (") {
        let tail = &name_zone[idx + 2..];
        let tail = tail.strip_prefix('$').unwrap_or(tail);
        if let Some((stack, _)) = leading_float(tail) {
            return Some(SeatedPlayer {
                seat,
                name: name_zone[..idx].to_string(),
                stack,
            });
        }
    }
    None
}

fn poster(line: &str, needle: &str) -> Option<String> {
    let at = line.find(needle)?;
    Some(line[..at].trim().to_string())
}

fn action_kind(text: &str) -> Option<ActionKind> {
    if let Some(rest) = text.strip_prefix("raises ") {
        let (amount, rest) = money_prefix(rest);
        let total = match rest.strip_prefix(" to ") {
            Some(rest) if amount.is_some() => money_prefix(rest).0,
            _ => None,
        };
        return Some(ActionKind::Raise { amount, total });
    }
    if let Some(rest) = text.strip_prefix("calls ") {
        return Some(ActionKind::Call {
            amount: money_prefix(rest).0,
        });
    }
    if let Some(rest) = text.strip_prefix("bets ") {
        return Some(ActionKind::Bet {
            amount: money_prefix(rest).0,
        });
    }
    if text == "folds" {
        return Some(ActionKind::Fold);
    }
    if text.starts_with("folds [") {
        return Some(ActionKind::FoldShow {
            cards: first_card_group(text).unwrap_or_default(),
        });
    }
    if text == "checks" {
        return Some(ActionKind::Check);
    }
    if text == "doesn't show hand" {
        return Some(ActionKind::Mucked);
    }
    if let Some(rest) = text.strip_prefix("shows ") {
        return Some(ActionKind::Show {
            cards: first_card_group(rest).unwrap_or_default(),
            description: parenthetical_after_bracket(rest),
        });
    }
    None
}

/// Parse `$X` or `X` at the start of the text.
fn money_prefix(text: &str) -> (Option<f64>, &str) {
    let stripped = text.strip_prefix('$').unwrap_or(text);
    match leading_float(stripped) {
        Some((value, rest)) => (Some(value), rest),
        None => (None, text),
    }
}

/// Parse a leading digits-and-dots run as a float, returning the
/// rest of the text.
fn leading_float(text: &str) -> Option<(f64, &str)> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

/// Cards inside the first `[...]` group. Unreadable tokens are
/// dropped.
fn first_card_group(text: &str) -> Option<Vec<Card>> {
    let open = text.find('[')?;
    let rest = &text[open + 1..];
    let close = rest.find(']')?;
    Some(parse_cards(&rest[..close]))
}

fn parse_cards(text: &str) -> Vec<Card> {
    text.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// The final card of the final `[...]` group, how turn and river
/// marker lines carry the street's new card.
fn last_card_of_last_group(text: &str) -> Option<Card> {
    let mut last = None;
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find(']') else {
            break;
        };
        if let Some(&card) = parse_cards(&tail[..close]).last() {
            last = Some(card);
        }
        rest = &tail[close + 1..];
    }
    last
}

/// The ` (...)` group right after the first `]`, used for shown hand
/// descriptions.
fn parenthetical_after_bracket(text: &str) -> Option<String> {
    let close = text.find(']')?;
    let rest = text[close + 1..].strip_prefix(" (")?;
    let end = rest.find(')')?;
    Some(rest[..end].to_string())
}

/// Match `<name> collected $X`. A digit must follow the optional
/// dollar sign, so the summary's parenthesized `collected ($X)` form
/// never matches.
fn collected_award(line: &str) -> Option<PotAward> {
    let mut from = 0;
    while let Some(found) = line[from..].find(" collected ") {
        let at = from + found;
        let tail = &line[at + " collected ".len()..];
        let tail = tail.strip_prefix('$').unwrap_or(tail);
        if let Some((amount, _)) = leading_float(tail) {
            return Some(PotAward {
                player: line[..at].trim().to_string(),
                amount,
            });
        }
        from = at + " collected ".len();
    }
    None
}

/// Match `Total pot $X | Rake $Y`. The two figures parse together or
/// not at all.
fn scan_pot_and_rake(line: &str) -> Option<(f64, f64)> {
    let at = line.find("Total pot ")?;
    let rest = &line[at + "Total pot ".len()..];
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let (pot, rest) = leading_float(rest)?;
    let rest = rest.strip_prefix(" | Rake ")?;
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let (rake, _) = leading_float(rest)?;
    Some((pot, rake))
}

fn scan_board(line: &str) -> Option<Vec<Card>> {
    let at = line.find("Board [")?;
    first_card_group(&line[at..])
}

/// Strip at most one leading position marker from a summary outcome.
fn split_position(text: &str) -> (Option<String>, String) {
    for position in ["button", "small blind", "big blind"] {
        let stripped = text
            .strip_prefix('(')
            .and_then(|t| t.strip_prefix(position))
            .and_then(|t| t.strip_prefix(')'));
        if let Some(rest) = stripped {
            return (Some(position.to_string()), rest.trim_start().to_string());
        }
    }
    (None, text.to_string())
}

/// The made hand named by `showed [...] and won/lost ... with <desc>`.
fn outcome_description(outcome: &str) -> Option<String> {
    let at = outcome.find("showed [")?;
    let rest = &outcome[at..];
    let close = rest.find("] and ")?;
    let rest = &rest[close + "] and ".len()..];
    let rest = rest
        .strip_prefix("won")
        .or_else(|| rest.strip_prefix("lost"))?;
    let rest = strip_amount(rest);
    let description = rest.strip_prefix(" with ")?;
    Some(description.trim().to_string())
}

/// Drop a ` $X` or ` ($X)` amount clause when one is present.
fn strip_amount(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(' ') else {
        return text;
    };
    let (parenthesized, rest) = match rest.strip_prefix('(') {
        Some(inner) => (true, inner),
        None => (false, rest),
    };
    let inner = rest.strip_prefix('$').unwrap_or(rest);
    let Some((_, after)) = leading_float(inner) else {
        return text;
    };
    if parenthesized {
        match after.strip_prefix(')') {
            Some(after) => after,
            None => text,
        }
    } else {
        after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Suit, Value};

    const CASH_HAND: &str = r#"PokerStars Hand #243490149070:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET
Table 'Aenna III' 6-max Seat #1 is the button
Seat 1: adevlupec ($53.06 in chips)
Seat 2: Dette32 ($43.45 in chips)
Seat 3: Drug08 ($70.35 in chips)
Seat 4: FluffyStutt ($58.62 in chips)
Dette32: posts small blind $0.50
Drug08: posts big blind $1
*** HOLE CARDS ***
FluffyStutt: folds
adevlupec: calls $1
Dette32: calls $0.50
Drug08: checks
*** FLOP *** [4s 7h 9d]
Dette32: checks
Drug08: bets $2
adevlupec: calls $2
Dette32: folds
*** TURN *** [4s 7h 9d] [2c]
Drug08: bets $4.50
adevlupec: raises $4.50 to $9
Drug08: calls $4.50
*** RIVER *** [4s 7h 9d 2c] [Qh]
Drug08: checks
adevlupec: bets $21
Drug08: folds
Uncalled bet ($21) returned to adevlupec
adevlupec collected $24.45 from pot
adevlupec: doesn't show hand
*** SUMMARY ***
Total pot $25.75 | Rake $1.30
Board [4s 7h 9d 2c Qh]
Seat 1: adevlupec (button) collected ($24.45)
Seat 2: Dette32 (small blind) folded on the Flop
Seat 3: Drug08 (big blind) folded on the River
Seat 4: FluffyStutt folded before Flop (didn't bet)
"#;

    const SHOWDOWN_HAND: &str = r#"PokerStars Hand #243490149071:  Hold'em No Limit ($0.25/$0.50 USD) - 2020/06/25 10:02:11 ET
Table 'Aenna III' 6-max Seat #2 is the button
Seat 2: Dette32 ($50 in chips)
Seat 3: Drug08 ($50 in chips)
Dette32: posts small blind $0.25
Drug08: posts big blind $0.50
*** HOLE CARDS ***
Dette32: raises $0.50 to $1
Drug08: calls $0.50
*** FLOP *** [Kc 7d 2s]
Drug08: checks
Dette32: bets $1
Drug08: calls $1
*** TURN *** [Kc 7d 2s] [9h]
Drug08: checks
Dette32: checks
*** RIVER *** [Kc 7d 2s 9h] [9c]
Drug08: checks
Dette32: checks
*** SHOW DOWN ***
Drug08: shows [Ah Kh] (two pair, Kings and Nines)
Dette32: shows [Kd Qd] (two pair, Kings and Nines)
Drug08 collected $1.90 from pot
Dette32 collected $1.90 from pot
*** SUMMARY ***
Total pot $4 | Rake $0.20
Board [Kc 7d 2s 9h 9c]
Seat 2: Dette32 (button) (small blind) showed [Kd Qd] and won ($1.90) with two pair, Kings and Nines
Seat 3: Drug08 (big blind) showed [Ah Kh] and won ($1.90) with two pair, Kings and Nines
"#;

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    #[test_log::test]
    fn test_parse_header() {
        let record = parse(CASH_HAND).unwrap();
        assert_eq!(HAND_RECORD_VERSION, record.version);
        assert_eq!(243490149070, record.hand_id);
        assert_eq!("Hold'em No Limit", record.game_type);
        assert_eq!(0.50, record.small_blind);
        assert_eq!(1.0, record.big_blind);
        assert_eq!(Some("Aenna III".to_string()), record.table_name);
        assert_eq!(
            NaiveDate::from_ymd_opt(2020, 6, 25)
                .unwrap()
                .and_hms_opt(9, 37, 30),
            record.played_at
        );
        assert_eq!(Some(1), record.dealer_seat);
        assert_eq!(Some("adevlupec".to_string()), record.dealer);
        assert_eq!(Some("Dette32".to_string()), record.small_blind_poster);
        assert_eq!(Some("Drug08".to_string()), record.big_blind_poster);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_parse_roster() {
        let record = parse(CASH_HAND).unwrap();
        assert_eq!(4, record.player_count());
        let names: Vec<&str> = record.player_names().collect();
        assert_eq!(vec!["adevlupec", "Dette32", "Drug08", "FluffyStutt"], names);
        assert_eq!(53.06, record.seat(1).unwrap().stack);
        assert_eq!(58.62, record.seat(4).unwrap().stack);
    }

    #[test]
    fn test_parse_streets() {
        let record = parse(CASH_HAND).unwrap();

        let preflop = record.preflop.as_ref().unwrap();
        assert_eq!(4, preflop.actions.len());
        assert!(preflop.community_cards.is_empty());
        assert_eq!(ActionKind::Fold, preflop.actions[0].kind);
        assert_eq!("FluffyStutt", preflop.actions[0].player);
        assert_eq!(
            ActionKind::Call { amount: Some(1.0) },
            preflop.actions[1].kind
        );

        let flop = record.flop.as_ref().unwrap();
        assert_eq!(
            vec![card("4s"), card("7h"), card("9d")],
            flop.community_cards
        );
        assert_eq!(4, flop.actions.len());
        assert_eq!(ActionKind::Bet { amount: Some(2.0) }, flop.actions[1].kind);

        let turn = record.turn.as_ref().unwrap();
        assert_eq!(vec![card("2c")], turn.community_cards);
        assert_eq!(
            ActionKind::Raise {
                amount: Some(4.5),
                total: Some(9.0),
            },
            turn.actions[1].kind
        );

        let river = record.river.as_ref().unwrap();
        assert_eq!(vec![card("Qh")], river.community_cards);
        // check, bet, fold, muck; the uncalled bet return line and
        // the pot collection line carry no action separator.
        assert_eq!(4, river.actions.len());
        assert_eq!(ActionKind::Mucked, river.actions[3].kind);
        assert!(!record.has_showdown());
    }

    #[test]
    fn test_parse_winner_and_summary() {
        let record = parse(CASH_HAND).unwrap();
        assert_eq!(Some("adevlupec".to_string()), record.winner);
        assert_eq!(Some(24.45), record.amount_won);
        assert_eq!(Some(24.45), record.bb_won);
        assert_eq!(Some(25.75), record.pot_total);
        assert_eq!(Some(1.30), record.rake);
        assert_eq!(5, record.board.len());
        assert_eq!(card("Qh"), record.board[4]);
    }

    #[test]
    fn test_parse_seat_results() {
        let record = parse(CASH_HAND).unwrap();
        assert_eq!(4, record.seat_results.len());

        let button = &record.seat_results[0];
        assert_eq!(1, button.seat);
        assert_eq!("adevlupec", button.player);
        assert_eq!(Some("button".to_string()), button.position);
        assert_eq!("collected ($24.45)", button.outcome);
        assert_eq!(None, button.hand_description);

        // A parenthetical that is not a position stays in the
        // outcome text.
        let utg = &record.seat_results[3];
        assert_eq!("FluffyStutt", utg.player);
        assert_eq!(None, utg.position);
        assert_eq!("folded before Flop (didn't bet)", utg.outcome);
    }

    #[test]
    fn test_parse_showdown() {
        let record = parse(SHOWDOWN_HAND).unwrap();
        let showdown = record.showdown.as_ref().unwrap();

        assert_eq!(2, showdown.reveals.len());
        assert_eq!("Drug08", showdown.reveals[0].player);
        assert_eq!(vec![card("Ah"), card("Kh")], showdown.reveals[0].cards);
        assert_eq!(
            Some("two pair, Kings and Nines".to_string()),
            showdown.reveals[0].description
        );

        assert_eq!(2, showdown.awards.len());
        assert_eq!(1.90, showdown.awards[0].amount);
        assert_eq!("Dette32", showdown.awards[1].player);
    }

    #[test_log::test]
    fn test_split_pot_takes_first_collector_and_warns() {
        let record = parse(SHOWDOWN_HAND).unwrap();
        assert_eq!(Some("Drug08".to_string()), record.winner);
        assert_eq!(Some(1.90), record.amount_won);
        assert_eq!(Some(3.8), record.bb_won);
        assert!(record.warnings.contains(&ParseWarning::AmbiguousWinner {
            collectors: vec!["Drug08".to_string(), "Dette32".to_string()],
        }));
    }

    #[test]
    fn test_summary_hand_description() {
        let record = parse(SHOWDOWN_HAND).unwrap();

        let dette = &record.seat_results[0];
        assert_eq!("Dette32", dette.player);
        // Only one position strips; the second stays in the outcome.
        assert_eq!(Some("button".to_string()), dette.position);
        assert!(dette.outcome.starts_with("(small blind) showed [Kd Qd]"));
        assert_eq!(
            Some("two pair, Kings and Nines".to_string()),
            dette.hand_description
        );

        let drug = &record.seat_results[1];
        assert_eq!(Some("big blind".to_string()), drug.position);
        assert_eq!(
            Some("two pair, Kings and Nines".to_string()),
            drug.hand_description
        );
    }

    #[test]
    fn test_description_amount_forms() {
        // Exports write the amount bare, parenthesized, or not at all.
        assert_eq!(
            Some("two pair, Kings and Nines".to_string()),
            outcome_description("showed [Kd Qd] and won $1.90 with two pair, Kings and Nines")
        );
        assert_eq!(
            Some("two pair, Kings and Nines".to_string()),
            outcome_description("showed [Kd Qd] and won ($1.90) with two pair, Kings and Nines")
        );
        assert_eq!(
            Some("a pair of Nines".to_string()),
            outcome_description("showed [9d 8c] and lost with a pair of Nines")
        );
    }

    #[test]
    fn test_raw_text_is_preserved() {
        let record = parse(CASH_HAND).unwrap();
        assert_eq!(CASH_HAND, record.raw_text);
    }

    #[test]
    fn test_missing_hole_cards_is_fatal() {
        let text = "PokerStars Hand #900:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Aenna III' 6-max Seat #1 is the button\n\
                    Seat 1: adevlupec ($53.06 in chips)\n";
        assert_eq!(
            Err(ParseError::MissingHoleCardsSection { hand_id: 900 }),
            parse(text)
        );
    }

    #[test]
    fn test_missing_hand_id_is_fatal() {
        assert!(matches!(
            parse("some random text\n*** HOLE CARDS ***\n"),
            Err(ParseError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_unparsable_blinds_are_fatal() {
        // Play money blinds carry no dollar sign.
        let text = "PokerStars Hand #55:  Hold'em No Limit (100/200) - 2020/06/25 9:37:30 ET\n\
                    *** HOLE CARDS ***\n";
        assert!(matches!(
            parse(text),
            Err(ParseError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_zero_big_blind_is_fatal() {
        let text = "PokerStars Hand #56:  Hold'em No Limit ($0/$0) - 2020/06/25 9:37:30 ET\n\
                    *** HOLE CARDS ***\n";
        assert!(matches!(
            parse(text),
            Err(ParseError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_multi_word_names_survive() {
        let text = "PokerStars Hand #57:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 6-max Seat #3 is the button\n\
                    Seat 3: Long Player Name ($100 in chips)\n\
                    Seat 4: the (real) deal ($20 in chips)\n\
                    Long Player Name: posts small blind $0.50\n\
                    the (real) deal: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    Long Player Name: raises $2 to $3\n\
                    the (real) deal: folds\n\
                    Long Player Name collected $2 from pot\n\
                    *** SUMMARY ***\n\
                    Seat 3: Long Player Name (button) collected ($2)\n\
                    Seat 4: the (real) deal (big blind) folded before Flop\n";
        let record = parse(text).unwrap();

        assert_eq!("Long Player Name", record.seat(3).unwrap().name);
        assert_eq!("the (real) deal", record.seat(4).unwrap().name);
        assert_eq!(100.0, record.seat(3).unwrap().stack);
        assert_eq!(Some("Long Player Name".to_string()), record.dealer);
        assert_eq!(Some("the (real) deal".to_string()), record.big_blind_poster);

        let preflop = record.preflop.as_ref().unwrap();
        assert_eq!("Long Player Name", preflop.actions[0].player);
        assert_eq!(Some("Long Player Name".to_string()), record.winner);

        // Roster aware summary parsing keeps the parenthesized name
        // whole.
        let seat4 = &record.seat_results[1];
        assert_eq!("the (real) deal", seat4.player);
        assert_eq!(Some("big blind".to_string()), seat4.position);
        assert_eq!("folded before Flop", seat4.outcome);
    }

    #[test]
    fn test_seat_line_without_in_chips_suffix() {
        // Roster stacks read with or without the "in chips" tail.
        let text = "PokerStars Hand #58:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 6-max Seat #3 is the button\n\
                    Seat 3: Long Player Name ($100)\n\
                    Seat 4: bob ($20)\n\
                    Long Player Name: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    bob: folds\n\
                    Long Player Name collected $1 from pot\n";
        let record = parse(text).unwrap();

        assert_eq!("Long Player Name", record.seat(3).unwrap().name);
        assert_eq!(100.0, record.seat(3).unwrap().stack);
        assert_eq!(20.0, record.seat(4).unwrap().stack);
        assert_eq!(Some("Long Player Name".to_string()), record.winner);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_parenthesized_collected_is_not_a_winner() {
        let text = "PokerStars Hand #77:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n\
                    *** SUMMARY ***\n\
                    Total pot $1 | Rake $0.05\n\
                    Seat 2: bob (big blind) collected ($1)\n";
        let record = parse(text).unwrap();
        assert_eq!(None, record.winner);
        assert_eq!(None, record.amount_won);
        assert_eq!(None, record.bb_won);
        // The seat result still records the collection.
        assert_eq!("collected ($1)", record.seat_results[0].outcome);
    }

    #[test]
    fn test_preflop_only_hand() {
        let text = "PokerStars Hand #78:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n\
                    bob collected $1 from pot\n\
                    *** SUMMARY ***\n\
                    Total pot $1 | Rake $0\n";
        let record = parse(text).unwrap();
        assert!(record.flop.is_none());
        assert!(record.turn.is_none());
        assert!(record.river.is_none());
        assert!(record.board.is_empty());
        assert_eq!(Some("bob".to_string()), record.winner);
        assert_eq!(Some(1.0), record.bb_won);
    }

    #[test]
    fn test_unrecognized_action_line_warns() {
        let text = "PokerStars Hand #79:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: straddles $2\n\
                    alice is sitting out\n\
                    alice: folds\n";
        let record = parse(text).unwrap();
        assert_eq!(
            vec![ParseWarning::UnrecognizedActionLine {
                round: Round::Preflop,
                line: "alice: straddles $2".to_string(),
            }],
            record.warnings
        );
        // The unknown verb and the separator-free line are skipped.
        assert_eq!(1, record.preflop.as_ref().unwrap().actions.len());
    }

    #[test]
    fn test_unresolved_dealer_warns() {
        let text = "PokerStars Hand #80:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 6-max Seat #9 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n";
        let record = parse(text).unwrap();
        assert_eq!(Some(9), record.dealer_seat);
        assert_eq!(None, record.dealer);
        assert!(record
            .warnings
            .contains(&ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "dealer".to_string(),
            }));
    }

    #[test]
    fn test_missing_blind_posts_warn() {
        let text = "PokerStars Hand #81:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n";
        let record = parse(text).unwrap();
        assert_eq!(None, record.small_blind_poster);
        assert!(record
            .warnings
            .contains(&ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "small blind poster".to_string(),
            }));
        assert!(record
            .warnings
            .contains(&ParseWarning::UnresolvedDealerOrBlindPlayer {
                field: "big blind poster".to_string(),
            }));
    }

    #[test]
    fn test_malformed_timestamp_degrades_to_none() {
        let text = "PokerStars Hand #82:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/13/45 9:99:99 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n";
        let record = parse(text).unwrap();
        assert_eq!(None, record.played_at);
        assert_eq!(82, record.hand_id);
    }

    #[test]
    fn test_fold_shows_cards() {
        let text = "PokerStars Hand #83:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: folds [9h 9d]\n";
        let record = parse(text).unwrap();
        assert_eq!(
            ActionKind::FoldShow {
                cards: vec![
                    Card::new(Value::Nine, Suit::Heart),
                    Card::new(Value::Nine, Suit::Diamond),
                ],
            },
            record.preflop.as_ref().unwrap().actions[0].kind
        );
    }

    #[test]
    fn test_raise_without_parsable_amount() {
        let text = "PokerStars Hand #84:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: raises to $5\n";
        let record = parse(text).unwrap();
        assert_eq!(
            ActionKind::Raise {
                amount: None,
                total: None,
            },
            record.preflop.as_ref().unwrap().actions[0].kind
        );
    }

    #[test]
    fn test_backward_markers_are_ignored() {
        let text = "PokerStars Hand #85:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 2: bob ($50 in chips)\n\
                    alice: posts small blind $0.50\n\
                    bob: posts big blind $1\n\
                    *** HOLE CARDS ***\n\
                    alice: calls $0.50\n\
                    bob: checks\n\
                    *** FLOP *** [4s 7h 9d]\n\
                    bob: checks\n\
                    *** FLOP *** [As Ks Qs]\n\
                    alice: checks\n";
        let record = parse(text).unwrap();
        let flop = record.flop.as_ref().unwrap();
        // The repeated marker is dropped; its cards never replace
        // the first flop.
        assert_eq!(
            vec![card("4s"), card("7h"), card("9d")],
            flop.community_cards
        );
        assert_eq!(2, flop.actions.len());
    }

    #[test]
    fn test_duplicate_seat_keeps_first() {
        let text = "PokerStars Hand #86:  Hold'em No Limit ($0.50/$1.00 USD) - 2020/06/25 9:37:30 ET\n\
                    Table 'Echo' 2-max Seat #1 is the button\n\
                    Seat 1: alice ($50 in chips)\n\
                    Seat 1: mallory ($66 in chips)\n\
                    alice: posts small blind $0.50\n\
                    *** HOLE CARDS ***\n\
                    alice: folds\n";
        let record = parse(text).unwrap();
        assert_eq!(1, record.player_count());
        assert_eq!("alice", record.seat(1).unwrap().name);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_serde_round_trip() {
        let record = parse(SHOWDOWN_HAND).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"hand_id\":243490149071"));
        let back: HandRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
