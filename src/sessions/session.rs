//! Table session reconstruction from parsed hands.
//!
//! A session is a maximal run of consecutive hands at one table in
//! which the player was dealt in. The run breaks the moment a hand at
//! that table goes by without the player; sitting out even one hand
//! ends the session.

use chrono::NaiveDateTime;

use crate::hand_history::HandRecord;

use super::stats::AnalyzerConfig;

/// One hand's contribution to a session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionHand {
    pub hand_id: u64,
    pub played_at: NaiveDateTime,
    /// Big blinds won, or -1.0 for a hand played and not won.
    pub bb_result: f64,
}

/// A contiguous stretch of hands one player played at one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSession {
    pub player: String,
    pub table: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hands: Vec<SessionHand>,
    /// Sum of the per-hand big blind results.
    pub total_bb: f64,
}

impl TableSession {
    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// Wall clock span of the session in hours, unfloored.
    pub fn raw_duration_hours(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Session length with the configured floor applied. A one hand
    /// session has zero wall clock span; the floor keeps its rates
    /// finite.
    pub fn duration_hours(&self, config: &AnalyzerConfig) -> f64 {
        self.raw_duration_hours().max(config.min_session_hours)
    }

    pub fn hands_per_hour(&self, config: &AnalyzerConfig) -> f64 {
        self.hand_count() as f64 / self.duration_hours(config)
    }

    /// Milli big blinds won per hand over the session.
    pub fn mbb_per_hand(&self) -> f64 {
        if self.hands.is_empty() {
            return 0.0;
        }
        self.total_bb * 1000.0 / self.hands.len() as f64
    }

    pub fn mbb_per_hour(&self, config: &AnalyzerConfig) -> f64 {
        self.mbb_per_hand() * self.hands_per_hour(config)
    }
}

/// Split one table's time ordered hand stream into the player's
/// sessions.
///
/// A hand without a timestamp cannot be placed on the timeline and is
/// ignored entirely; it neither extends nor breaks a session. A hand
/// the player won counts for its big blind winnings, any other hand
/// the player was dealt counts -1 bb.
pub fn identify_sessions(player: &str, hands: &[HandRecord]) -> Vec<TableSession> {
    let mut sessions = Vec::new();
    let mut open: Option<TableSession> = None;

    for record in hands {
        let Some(played_at) = record.played_at else {
            continue;
        };
        if !record.has_player(player) {
            if let Some(session) = open.take() {
                sessions.push(session);
            }
            continue;
        }

        let bb_result = if record.winner.as_deref() == Some(player) {
            record.bb_won.unwrap_or(0.0)
        } else {
            -1.0
        };
        let hand = SessionHand {
            hand_id: record.hand_id,
            played_at,
            bb_result,
        };

        match open.as_mut() {
            Some(session) => {
                session.end = played_at;
                session.total_bb += bb_result;
                session.hands.push(hand);
            }
            None => {
                open = Some(TableSession {
                    player: player.to_string(),
                    table: record.table_name.clone().unwrap_or_default(),
                    start: played_at,
                    end: played_at,
                    total_bb: bb_result,
                    hands: vec![hand],
                });
            }
        }
    }

    if let Some(session) = open.take() {
        sessions.push(session);
    }
    sessions
}

/// Hours in which at least one of the sessions was running.
/// Overlapping sessions on different tables count once.
pub fn active_hours(sessions: &[TableSession]) -> f64 {
    let mut events: Vec<(NaiveDateTime, i32)> = Vec::with_capacity(sessions.len() * 2);
    for session in sessions {
        events.push((session.start, 1));
        events.push((session.end, -1));
    }
    events.sort_by_key(|&(time, _)| time);

    let mut active = 0i32;
    let mut total_ms = 0i64;
    let mut prev: Option<NaiveDateTime> = None;
    for (time, delta) in events {
        if let Some(prev_time) = prev {
            if active > 0 {
                total_ms += (time - prev_time).num_milliseconds();
            }
        }
        active += delta;
        prev = Some(time);
    }
    total_ms as f64 / 3_600_000.0
}
