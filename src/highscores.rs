//! High score persistence
//!
//! A single integer persisted under a fixed key. Read once at startup,
//! written only when a finished game beats it.

use crate::storage::{Storage, StorageError};

/// Best score seen across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    value: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "space_invaders_high_score";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Load the stored high score, falling back to 0 on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match Self::try_load(storage) {
            Ok(Some(value)) => {
                log::info!("Loaded high score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("High score unavailable ({}), using 0", err);
                Self::default()
            }
        }
    }

    fn try_load(storage: &dyn Storage) -> Result<Option<u64>, StorageError> {
        let Some(raw) = storage.get(Self::STORAGE_KEY)? else {
            return Ok(None);
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|_| StorageError::Corrupt {
                key: Self::STORAGE_KEY.to_string(),
                value: raw,
            })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a final score. Returns true if it set a new high score.
    ///
    /// The in-memory value is updated even if persisting fails.
    pub fn record(&mut self, score: u64, storage: &mut dyn Storage) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        match storage.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(err) => log::warn!("Failed to save high score {}: {}", score, err),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};

    #[test]
    fn test_load_defaults_to_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(HighScore::load(&storage).value(), 0);
        assert_eq!(HighScore::load(&UnavailableStorage).value(), 0);
    }

    #[test]
    fn test_load_corrupt_value() {
        let mut storage = MemoryStorage::new();
        storage.set(HighScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(HighScore::load(&storage).value(), 0);
    }

    #[test]
    fn test_load_trims_whitespace() {
        let mut storage = MemoryStorage::new();
        storage.set(HighScore::STORAGE_KEY, "1250\n").unwrap();
        assert_eq!(HighScore::load(&storage).value(), 1250);
    }

    #[test]
    fn test_record_only_writes_improvements() {
        let mut storage = MemoryStorage::new();
        let mut high = HighScore::new(500);

        assert!(!high.record(500, &mut storage));
        assert!(!high.record(120, &mut storage));
        assert_eq!(storage.write_count(), 0);

        assert!(high.record(800, &mut storage));
        assert_eq!(high.value(), 800);
        assert_eq!(storage.write_count(), 1);
        assert_eq!(HighScore::load(&storage).value(), 800);
    }

    #[test]
    fn test_record_survives_write_failure() {
        let mut high = HighScore::default();
        assert!(high.record(40, &mut UnavailableStorage));
        assert_eq!(high.value(), 40);
    }
}
