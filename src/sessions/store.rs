//! Hand storage behind the session analyzer.

use std::collections::{BTreeMap, BTreeSet};

use tracing::instrument;

use crate::hand_history::HandRecord;

use super::session::{identify_sessions, TableSession};
use super::stats::{AnalyzerConfig, PlayerStats};

/// Source of parsed hands for analysis. The in-memory store below is
/// the default; anything that can hand back per-table streams in time
/// order can stand in for it.
pub trait HandStore {
    /// Add a hand. Returns false when a hand with the same id is
    /// already stored, leaving the stored one in place.
    fn append(&mut self, record: HandRecord) -> bool;

    /// All dated hands seen at a table, in play order.
    fn hands_for_table(&self, table: &str) -> Vec<HandRecord>;

    /// Distinct tables a player has dated hands at, sorted by name.
    fn tables_for_player(&self, player: &str) -> Vec<String>;
}

/// Hands kept in memory, keyed by hand id.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandStore {
    hands: BTreeMap<u64, HandRecord>,
}

impl MemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

impl HandStore for MemoryHandStore {
    fn append(&mut self, record: HandRecord) -> bool {
        if self.hands.contains_key(&record.hand_id) {
            return false;
        }
        self.hands.insert(record.hand_id, record);
        true
    }

    fn hands_for_table(&self, table: &str) -> Vec<HandRecord> {
        let mut hands: Vec<HandRecord> = self
            .hands
            .values()
            .filter(|record| {
                record.played_at.is_some() && record.table_name.as_deref() == Some(table)
            })
            .cloned()
            .collect();
        hands.sort_by_key(|record| record.played_at);
        hands
    }

    fn tables_for_player(&self, player: &str) -> Vec<String> {
        let tables: BTreeSet<&str> = self
            .hands
            .values()
            .filter(|record| record.played_at.is_some() && record.has_player(player))
            .filter_map(|record| record.table_name.as_deref())
            .collect();
        tables.into_iter().map(str::to_string).collect()
    }
}

/// Rebuilds sessions and win rates from stored hands.
#[derive(Debug, Clone, Default)]
pub struct SessionAnalyzer {
    config: AnalyzerConfig,
}

impl SessionAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Every session the player has across every table they appear
    /// at.
    pub fn sessions_for_player(&self, store: &dyn HandStore, player: &str) -> Vec<TableSession> {
        let mut sessions = Vec::new();
        for table in store.tables_for_player(player) {
            let hands = store.hands_for_table(&table);
            sessions.extend(identify_sessions(player, &hands));
        }
        sessions
    }

    /// Overall win rates for a player from everything in the store.
    #[instrument(level = "debug", skip(self, store))]
    pub fn player_stats(&self, store: &dyn HandStore, player: &str) -> PlayerStats {
        let sessions = self.sessions_for_player(store, player);
        PlayerStats::compute(player, &sessions, &self.config)
    }
}
