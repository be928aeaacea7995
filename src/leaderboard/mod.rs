//! Shared hall of fame
//!
//! One table (`hall_of_fame`) holds the rows of all three games. Writes are
//! fire-and-forget: a failed insert is logged and never retried, and nothing
//! on the page waits for it.

#[cfg(target_arch = "wasm32")]
pub mod remote;

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::GameKind;
use crate::consts::{HALL_OF_FAME_LIMIT, LOCAL_HALL_SIZE};

/// Table name in the store
pub const TABLE: &str = "hall_of_fame";

const MAX_NAME_LEN: usize = 40;
const MAX_CONTACT_LEN: usize = 120;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub game: GameKind,
    pub name: String,
    pub score: i64,
    pub contact: Option<String>,
    /// ISO-8601; left to the store when absent
    pub date: Option<String>,
}

/// Why an entry would be refused by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    NameTooLong(usize),
    ContactTooLong(usize),
    NegativeScore(i64),
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::NameTooLong(n) => {
                write!(f, "name is {} characters, at most {} allowed", n, MAX_NAME_LEN)
            }
            EntryError::ContactTooLong(n) => {
                write!(f, "contact is {} characters, at most {} allowed", n, MAX_CONTACT_LEN)
            }
            EntryError::NegativeScore(s) => write!(f, "score {} is negative", s),
        }
    }
}

impl std::error::Error for EntryError {}

impl LeaderboardEntry {
    /// Insert body, with the game under its table name
    pub fn to_row(&self) -> Value {
        let mut row = json!({
            "game": self.game.as_str(),
            "name": self.name,
            "score": self.score,
            "contact": self.contact,
        });
        if let Some(date) = &self.date {
            row["date"] = Value::String(date.clone());
        }
        row
    }

    pub fn validate(&self) -> Result<(), EntryError> {
        let name_len = self.name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(EntryError::NameTooLong(name_len));
        }
        if let Some(contact) = &self.contact {
            let contact_len = contact.chars().count();
            if contact_len > MAX_CONTACT_LEN {
                return Err(EntryError::ContactTooLong(contact_len));
            }
        }
        if self.score < 0 {
            return Err(EntryError::NegativeScore(self.score));
        }
        Ok(())
    }
}

/// A row as the store returns it. Older rows use lowercase game names and
/// may lack a score.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRow {
    pub game: String,
    pub name: String,
    pub score: Option<i64>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl StoredRow {
    /// `None` for rows of games this crate does not know
    pub fn into_entry(self) -> Option<LeaderboardEntry> {
        let game = self.game.parse::<GameKind>().ok()?;
        Some(LeaderboardEntry {
            game,
            name: self.name,
            score: self.score.unwrap_or(0),
            contact: self.contact,
            date: self.date,
        })
    }
}

/// Top-N by score, optionally for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub game: Option<GameKind>,
    pub limit: usize,
}

impl LeaderboardQuery {
    /// Combined hall of fame page
    pub fn all() -> Self {
        Self {
            game: None,
            limit: HALL_OF_FAME_LIMIT,
        }
    }

    /// Top entries shown beside one game
    pub fn for_game(game: GameKind) -> Self {
        Self {
            game: Some(game),
            limit: LOCAL_HALL_SIZE,
        }
    }

    /// Run the query over rows held in memory
    pub fn apply(&self, entries: &[LeaderboardEntry]) -> Vec<LeaderboardEntry> {
        let mut out: Vec<LeaderboardEntry> = entries
            .iter()
            .filter(|e| self.game.is_none_or(|g| e.game == g))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal scores
        out.sort_by(|a, b| b.score.cmp(&a.score));
        out.truncate(self.limit);
        out
    }

    /// PostgREST query string for the `hall_of_fame` table
    pub fn to_query_string(&self) -> String {
        let mut q = format!("select=*&order=score.desc&limit={}", self.limit);
        if let Some(game) = self.game {
            q.push_str("&game=ilike.");
            q.push_str(game.as_str());
        }
        q
    }
}

/// Split a combined listing into per-game columns, `per_game` rows each
pub fn group_by_game(
    entries: &[LeaderboardEntry],
    per_game: usize,
) -> BTreeMap<GameKind, Vec<LeaderboardEntry>> {
    GameKind::ALL
        .iter()
        .map(|&game| {
            let column = LeaderboardQuery {
                game: Some(game),
                limit: per_game,
            }
            .apply(entries);
            (game, column)
        })
        .collect()
}

/// Medal beside the first three places of a column, `rank` counted from zero
pub fn medal(rank: usize) -> Option<&'static str> {
    match rank {
        0 => Some("🏆"),
        1 => Some("🥈"),
        2 => Some("🥉"),
        _ => None,
    }
}

/// One row of a top list as shown on the pages
pub fn hall_line(rank: usize, name: &str, score: i64) -> String {
    match medal(rank) {
        Some(medal) => format!("{}. {} {}: {}", rank + 1, medal, name, score),
        None => format!("{}. {}: {}", rank + 1, name, score),
    }
}

/// Where finished runs are reported
pub trait Leaderboard {
    /// Hand off an entry. Never blocks and never fails the caller.
    fn submit(&mut self, entry: LeaderboardEntry);
}

/// No store configured: log and drop
impl<L: Leaderboard> Leaderboard for Option<L> {
    fn submit(&mut self, entry: LeaderboardEntry) {
        match self {
            Some(inner) => inner.submit(entry),
            None => log::warn!(
                "No leaderboard configured, dropping {} score {} for {}",
                entry.game,
                entry.score,
                entry.name
            ),
        }
    }
}

/// In-memory store (native demo and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn top(&self, query: LeaderboardQuery) -> Vec<LeaderboardEntry> {
        query.apply(&self.entries)
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit(&mut self, entry: LeaderboardEntry) {
        log::info!("Recorded {} score {} for {}", entry.game, entry.score, entry.name);
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(game: GameKind, name: &str, score: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            game,
            name: name.to_string(),
            score,
            contact: None,
            date: None,
        }
    }

    #[test]
    fn test_query_string() {
        assert_eq!(
            LeaderboardQuery::all().to_query_string(),
            "select=*&order=score.desc&limit=50"
        );
        assert_eq!(
            LeaderboardQuery::for_game(GameKind::Flyer).to_query_string(),
            "select=*&order=score.desc&limit=5&game=ilike.MelloTap"
        );
    }

    #[test]
    fn test_apply_filters_sorts_and_limits() {
        let rows = vec![
            entry(GameKind::Runner, "a", 4),
            entry(GameKind::Flyer, "b", 9),
            entry(GameKind::Runner, "c", 12),
            entry(GameKind::Runner, "d", 4),
        ];
        let top = LeaderboardQuery {
            game: Some(GameKind::Runner),
            limit: 2,
        }
        .apply(&rows);
        let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }

    #[test]
    fn test_group_by_game() {
        let rows = vec![
            entry(GameKind::Runner, "a", 4),
            entry(GameKind::TicTacToe, "b", 1),
            entry(GameKind::Runner, "c", 6),
        ];
        let groups = group_by_game(&rows, 5);
        assert_eq!(groups[&GameKind::Runner].len(), 2);
        assert_eq!(groups[&GameKind::Runner][0].name, "c");
        assert!(groups[&GameKind::Flyer].is_empty());
        assert_eq!(groups[&GameKind::TicTacToe].len(), 1);
    }

    #[test]
    fn test_hall_of_fame_page_columns() {
        // The combined listing arrives sorted and capped at 50 rows
        let mut rows: Vec<LeaderboardEntry> = (0..8)
            .map(|i| entry(GameKind::Flyer, &format!("f{}", i), 100 - i))
            .collect();
        rows.push(entry(GameKind::Runner, "r", 12));
        let rows = LeaderboardQuery::all().apply(&rows);
        assert!(rows.len() <= HALL_OF_FAME_LIMIT);

        let groups = group_by_game(&rows, LOCAL_HALL_SIZE);
        assert_eq!(groups.len(), GameKind::ALL.len());
        assert_eq!(groups[&GameKind::Flyer].len(), 5);
        assert_eq!(groups[&GameKind::Flyer][0].name, "f0");
        assert_eq!(groups[&GameKind::Runner].len(), 1);
        assert!(groups[&GameKind::TicTacToe].is_empty());
    }

    #[test]
    fn test_hall_line_medals() {
        assert_eq!(hall_line(0, "Mia", 42), "1. 🏆 Mia: 42");
        assert_eq!(hall_line(2, "Jo", 7), "3. 🥉 Jo: 7");
        assert_eq!(hall_line(3, "Ben", 1), "4. Ben: 1");
        assert_eq!(medal(1), Some("🥈"));
    }

    #[test]
    fn test_stored_rows_tolerate_old_shapes() {
        let json = r#"[
            {"id":"1","game":"mellotap","name":"Mia","score":7,"date":"2025-01-01"},
            {"id":"2","game":"TicTacToe","name":"Jo","score":null,"contact":"jo@x.de","date":"2025-01-02"},
            {"id":"3","game":"snake","name":"Old","score":3,"date":"2024-01-01"}
        ]"#;
        let rows: Vec<StoredRow> = serde_json::from_str(json).unwrap();
        let entries: Vec<LeaderboardEntry> = rows.into_iter().filter_map(StoredRow::into_entry).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].game, GameKind::Flyer);
        assert_eq!(entries[1].score, 0);
        assert_eq!(entries[1].contact.as_deref(), Some("jo@x.de"));
    }

    #[test]
    fn test_validate() {
        assert!(entry(GameKind::Runner, "Mia", 3).validate().is_ok());
        assert_eq!(
            entry(GameKind::Runner, "Mia", -1).validate(),
            Err(EntryError::NegativeScore(-1))
        );
        let long = "x".repeat(41);
        assert_eq!(
            entry(GameKind::Runner, &long, 3).validate(),
            Err(EntryError::NameTooLong(41))
        );
    }

    #[test]
    fn test_unconfigured_store_drops() {
        let mut store: Option<MemoryLeaderboard> = None;
        store.submit(entry(GameKind::Flyer, "Mia", 2));
        assert!(store.is_none());

        let mut store = Some(MemoryLeaderboard::new());
        store.submit(entry(GameKind::Flyer, "Mia", 2));
        assert_eq!(store.as_ref().map(|s| s.entries().len()), Some(1));
    }

    #[test]
    fn test_row_uses_table_names() {
        let row = entry(GameKind::Runner, "Mia", 3).to_row();
        assert_eq!(row["game"], "MelloRush");
        assert_eq!(row["contact"], Value::Null);
        assert!(row.get("date").is_none());

        let mut dated = entry(GameKind::TicTacToe, "Jo", 1);
        dated.date = Some("2025-05-01T10:00:00.000Z".to_string());
        assert_eq!(dated.to_row()["date"], "2025-05-01T10:00:00.000Z");
    }
}
