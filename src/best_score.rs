//! Best-score persistence
//!
//! A single integer stored under a fixed key: a JSON file on native,
//! LocalStorage on the web, or plain memory for tests and embedding.

use crate::sim::GameEvent;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "stephenRunnerBest";

/// Where the best score lives between sessions
pub trait BestScoreStore {
    /// Stored best, or 0 when nothing usable is stored
    fn load(&self) -> u64;
    /// Persist a new best. Failures are logged, never raised.
    fn save(&mut self, value: u64);
}

/// Persist the newest `BestScoreUpdated` in `events`, if any.
/// Returns the value written.
pub fn persist_events(store: &mut dyn BestScoreStore, events: &[GameEvent]) -> Option<u64> {
    let best = events.iter().rev().find_map(|e| match e {
        GameEvent::BestScoreUpdated(value) => Some(*value),
        _ => None,
    })?;
    store.save(best);
    Some(best)
}

/// Parse a stored value leniently: integers, or non-negative finite numbers
/// rounded down. Anything else reads as 0.
pub fn parse_stored_best(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return value;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.floor() as u64,
        _ => 0,
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
    writes: u32,
}

impl MemoryStore {
    pub fn new(value: u64) -> Self {
        Self { value, writes: 0 }
    }

    /// Number of `save` calls so far
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value
    }

    fn save(&mut self, value: u64) {
        self.value = value;
        self.writes += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{BEST_SCORE_KEY, BestScoreStore};

    /// JSON file holding `{ "stephenRunnerBest": <n> }`
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read(&self) -> io::Result<u64> {
            let json = std::fs::read_to_string(&self.path)?;
            let map: BTreeMap<String, u64> = serde_json::from_str(&json)?;
            Ok(map.get(BEST_SCORE_KEY).copied().unwrap_or(0))
        }

        fn write(&self, value: u64) -> io::Result<()> {
            let map = BTreeMap::from([(BEST_SCORE_KEY, value)]);
            let json = serde_json::to_string(&map)?;
            std::fs::write(&self.path, json)
        }
    }

    impl BestScoreStore for FileStore {
        fn load(&self) -> u64 {
            match self.read() {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    value
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::info!("No best score found, starting fresh");
                    0
                }
                Err(e) => {
                    log::warn!("Unreadable best score {}: {}", self.path.display(), e);
                    0
                }
            }
        }

        fn save(&mut self, value: u64) {
            match self.write(value) {
                Ok(()) => log::info!("Best score saved ({})", value),
                Err(e) => log::warn!("Failed to save best score to {}: {}", self.path.display(), e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::{BEST_SCORE_KEY, BestScoreStore, parse_stored_best};

    /// Browser LocalStorage, value stored as a decimal string
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl BestScoreStore for LocalStorageStore {
        fn load(&self) -> u64 {
            if let Some(storage) = Self::storage() {
                if let Ok(Some(raw)) = storage.get_item(BEST_SCORE_KEY) {
                    let value = parse_stored_best(&raw);
                    log::info!("Loaded best score {}", value);
                    return value;
                }
            }
            log::info!("No best score found, starting fresh");
            0
        }

        fn save(&mut self, value: u64) {
            match Self::storage() {
                Some(storage) => match storage.set_item(BEST_SCORE_KEY, &value.to_string()) {
                    Ok(()) => log::info!("Best score saved ({})", value),
                    Err(e) => log::warn!("Failed to save best score: {:?}", e),
                },
                None => log::warn!("LocalStorage unavailable; best score not saved"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_best() {
        assert_eq!(parse_stored_best("123"), 123);
        assert_eq!(parse_stored_best(" 42\n"), 42);
        assert_eq!(parse_stored_best("99.9"), 99);
        assert_eq!(parse_stored_best(""), 0);
        assert_eq!(parse_stored_best("NaN"), 0);
        assert_eq!(parse_stored_best("-5"), 0);
        assert_eq!(parse_stored_best("garbage"), 0);
    }

    #[test]
    fn test_persist_events_writes_newest_best() {
        let mut store = MemoryStore::new(10);
        let events = [
            GameEvent::Started,
            GameEvent::Died { score: 50 },
            GameEvent::BestScoreUpdated(50),
        ];
        assert_eq!(persist_events(&mut store, &events), Some(50));
        assert_eq!(store.load(), 50);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_persist_events_without_new_best() {
        let mut store = MemoryStore::new(10);
        let events = [GameEvent::Started, GameEvent::Died { score: 5 }];
        assert_eq!(persist_events(&mut store, &events), None);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.load(), 10);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "stone_runner_best_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert_eq!(store.load(), 0);
        store.save(321);
        assert_eq!(FileStore::new(&path).load(), 321);

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains(BEST_SCORE_KEY));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_corrupt_reads_zero() {
        let path = std::env::temp_dir().join(format!(
            "stone_runner_corrupt_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(FileStore::new(&path).load(), 0);
        let _ = std::fs::remove_file(&path);
    }
}
