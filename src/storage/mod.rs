pub mod json_backend;
pub mod memory;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Persistence collaborator: one serialized ledger blob per storage key.
pub trait StorageBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<Ledger>>;
    fn save(&self, key: &str, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
