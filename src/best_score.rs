//! Best-score persistence
//!
//! A single number, stored as JSON in LocalStorage on the web. Anything
//! missing or unreadable counts as "no prior best".

use crate::platform::{BestScoreStore, PlatformError};

/// LocalStorage key
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "gap_glider_best_score";

/// Decode a stored value
pub fn parse_best(raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(best) => Some(best),
        Err(e) => {
            log::warn!("Ignoring unreadable best score {raw:?}: {e}");
            None
        }
    }
}

/// Process-local store (native runs, tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    best: Option<u64>,
    /// Every value written, in order
    pub writes: Vec<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            writes: Vec::new(),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.best
    }

    fn save(&mut self, best: u64) -> Result<(), PlatformError> {
        self.best = Some(best);
        self.writes.push(best);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{STORAGE_KEY, parse_best};
    use crate::platform::{BestScoreStore, PlatformError};

    /// Browser LocalStorage store
    #[derive(Debug, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl BestScoreStore for LocalStorageStore {
        fn load(&self) -> Option<u64> {
            let storage = Self::storage()?;
            let raw = storage.get_item(STORAGE_KEY).ok().flatten();
            let best = parse_best(raw.as_deref());
            match best {
                Some(best) => log::info!("Loaded best score {best}"),
                None => log::info!("No best score found, starting fresh"),
            }
            best
        }

        fn save(&mut self, best: u64) -> Result<(), PlatformError> {
            let storage = Self::storage().ok_or(PlatformError::Unavailable("LocalStorage"))?;
            let json = serde_json::to_string(&best)
                .map_err(|e| PlatformError::Host(e.to_string()))?;
            storage
                .set_item(STORAGE_KEY, &json)
                .map_err(|e| PlatformError::Host(format!("{e:?}")))?;
            log::info!("Best score saved ({best})");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best() {
        assert_eq!(parse_best(None), None);
        assert_eq!(parse_best(Some("17")), Some(17));
        assert_eq!(parse_best(Some(" 3 ")), Some(3));
        assert_eq!(parse_best(Some("")), None);
        assert_eq!(parse_best(Some("-4")), None);
        assert_eq!(parse_best(Some("lots")), None);
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryStore::with_best(4);
        assert_eq!(store.load(), Some(4));
        store.save(9).unwrap();
        assert_eq!(store.load(), Some(9));
        assert_eq!(store.writes, vec![9]);
    }
}
