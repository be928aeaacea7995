//! Local records: personal bests and the per-game local hall of fame
//!
//! Persisted to LocalStorage as one JSON document. The shared leaderboard
//! lives in [`crate::leaderboard`]; this is what the browser remembers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::GameKind;
use crate::consts::{ANONYMOUS_NAME, LOCAL_HALL_SIZE};

/// A single local hall of fame entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallEntry {
    pub name: String,
    pub score: u32,
}

/// Everything this browser remembers about past runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalRecords {
    /// Highest score per game
    #[serde(default)]
    pub bests: BTreeMap<GameKind, u32>,
    /// Top entries per game, sorted descending by score
    #[serde(default)]
    pub halls: BTreeMap<GameKind, Vec<HallEntry>>,
}

impl LocalRecords {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mello_records";

    pub fn new() -> Self {
        Self::default()
    }

    /// Personal best for `kind` (0 if never played)
    pub fn best(&self, kind: GameKind) -> u32 {
        self.bests.get(&kind).copied().unwrap_or(0)
    }

    /// Store `score` as the new best if it is strictly greater.
    /// Returns true when the best changed.
    pub fn record_best(&mut self, kind: GameKind, score: u32) -> bool {
        if score <= self.best(kind) {
            return false;
        }
        self.bests.insert(kind, score);
        true
    }

    /// Forget all personal bests (the hall of fame is kept)
    pub fn reset_bests(&mut self) {
        self.bests.clear();
    }

    pub fn hall(&self, kind: GameKind) -> &[HallEntry] {
        self.halls.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a score makes it into the local hall of fame
    pub fn qualifies(&self, kind: GameKind, score: u32) -> bool {
        let hall = self.hall(kind);
        if hall.len() < LOCAL_HALL_SIZE {
            return true;
        }
        // Check if score beats the lowest entry
        hall.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add an entry to the local hall of fame (if it qualifies).
    /// Returns the rank achieved (1-indexed).
    pub fn add_to_hall(&mut self, kind: GameKind, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(kind, score) {
            return None;
        }

        let name = name.trim();
        let entry = HallEntry {
            name: if name.is_empty() { ANONYMOUS_NAME.to_string() } else { name.to_string() },
            score,
        };

        // Find insertion point (sorted descending, ties keep earlier entries first)
        let hall = self.halls.entry(kind).or_default();
        let pos = hall.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                hall.insert(i, entry);
                i + 1
            }
            None => {
                hall.push(entry);
                hall.len()
            }
        };

        hall.truncate(LOCAL_HALL_SIZE);

        Some(rank)
    }

    /// Load records from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<LocalRecords>(&json) {
                    Ok(records) => {
                        log::info!("Loaded local records ({} bests)", records.bests.len());
                        return records;
                    }
                    Err(e) => log::warn!("Discarding unreadable local records: {}", e),
                }
            }
        }

        log::info!("No local records found, starting fresh");
        Self::new()
    }

    /// Save records to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not write local records");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    /// Load, honoring the opt-in reset of personal bests
    pub fn load_with(settings: &crate::Settings) -> Self {
        let mut records = Self::load();
        if settings.reset_best_on_load {
            log::info!("Resetting personal bests on load");
            records.reset_bests();
            records.save();
        }
        records
    }
}
