//! Win rate aggregation across a player's sessions.

use std::collections::BTreeSet;

use super::session::{active_hours, TableSession};

/// Tuning knobs for session analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzerConfig {
    /// Rate assumed when no timed activity exists to divide by.
    pub default_hands_per_hour: f64,
    /// Floor for a single session's duration in hours.
    pub min_session_hours: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_hands_per_hour: 30.0,
            min_session_hours: 0.25,
        }
    }
}

/// Aggregate win rate figures for one player.
///
/// There is no eligibility threshold here; callers wanting only
/// players with a meaningful sample filter on [`total_hands`]
/// themselves.
///
/// [`total_hands`]: PlayerStats::total_hands
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub player: String,
    pub total_hands: usize,
    /// Big blinds won and lost across all sessions.
    pub total_bb: f64,
    /// Hours with at least one session running, overlap merged.
    pub active_hours: f64,
    pub hands_per_hour: f64,
    pub mbb_per_hand: f64,
    pub mbb_per_hour: f64,
    pub table_count: usize,
    pub session_count: usize,
}

impl PlayerStats {
    /// Roll a player's sessions up into overall rates.
    ///
    /// With no timed activity at all the hourly rate falls back to
    /// the configured default and the win rates read zero.
    pub fn compute(player: &str, sessions: &[TableSession], config: &AnalyzerConfig) -> Self {
        let total_hands: usize = sessions.iter().map(TableSession::hand_count).sum();
        let total_bb: f64 = sessions.iter().map(|s| s.total_bb).sum();
        let active_hours = active_hours(sessions);
        let table_count = sessions
            .iter()
            .map(|s| s.table.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let (hands_per_hour, mbb_per_hand, mbb_per_hour) = if active_hours > 0.0 {
            let hands_per_hour = total_hands as f64 / active_hours;
            let mbb_per_hand = if total_hands > 0 {
                total_bb * 1000.0 / total_hands as f64
            } else {
                0.0
            };
            (hands_per_hour, mbb_per_hand, mbb_per_hand * hands_per_hour)
        } else {
            (config.default_hands_per_hour, 0.0, 0.0)
        };

        Self {
            player: player.to_string(),
            total_hands,
            total_bb,
            active_hours,
            hands_per_hour,
            mbb_per_hand,
            mbb_per_hour,
            table_count,
            session_count: sessions.len(),
        }
    }
}
