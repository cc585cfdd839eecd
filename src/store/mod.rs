pub mod file;

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::app::{HopefulError, Result};

pub use file::FileStore;

/// Client-side preferences that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

pub trait PreferenceStore {
    fn load(&self) -> Result<Preferences>;
    fn save(&self, prefs: &Preferences) -> Result<()>;
}

/// Process-local store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prefs: Mutex<Preferences>,
}

impl MemoryStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences> {
        self.prefs
            .lock()
            .map(|p| *p)
            .map_err(|_| HopefulError::Preferences("preference lock poisoned".into()))
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        let mut guard = self
            .prefs
            .lock()
            .map_err(|_| HopefulError::Preferences("preference lock poisoned".into()))?;
        *guard = *prefs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().dark_mode);

        store.save(&Preferences { dark_mode: false }).unwrap();
        assert!(!store.load().unwrap().dark_mode);
    }
}
