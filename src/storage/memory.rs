use std::{collections::HashMap, sync::Mutex};

use crate::{errors::LedgerError, ledger::Ledger};

use super::{Result, StorageBackend};

/// In-process storage holding serialized blobs, mirroring the on-disk format.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw blob, e.g. to simulate data written by an older build.
    pub fn insert_raw(&self, key: &str, blob: impl Into<String>) -> Result<()> {
        self.lock()?.insert(key.to_string(), blob.into());
        Ok(())
    }

    pub fn raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| LedgerError::Validation("memory storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Ledger>> {
        match self.lock()?.get(key) {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, ledger: &Ledger) -> Result<()> {
        let blob = serde_json::to_string(ledger)?;
        self.lock()?.insert(key.to_string(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_serialized_blob() {
        let storage = MemoryStorage::new();
        assert!(storage.load("k").unwrap().is_none());
        storage.save("k", &Ledger::default()).unwrap();
        assert!(storage.raw("k").unwrap().unwrap().contains("qt-netflix"));
        assert_eq!(storage.load("k").unwrap(), Some(Ledger::default()));
    }
}
