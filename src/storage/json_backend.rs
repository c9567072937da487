use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::ledger::Ledger;

use super::{Result, StorageBackend};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed storage writing `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, key: &str) -> Result<Option<Ledger>> {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, key: &str, ledger: &Ledger) -> Result<()> {
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&path, &json)
    }
}

/// Keeps storage keys filesystem-safe: `@finance_app_data_v3` -> `finance_app_data_v3`.
fn canonical_key(key: &str) -> String {
    let cleaned: String = key
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-') {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        "ledger".into()
    } else {
        trimmed.to_string()
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(format!("{}.{}", FILE_EXTENSION, TMP_SUFFIX));
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use tempfile::tempdir;

    #[test]
    fn canonical_key_strips_unsafe_characters() {
        assert_eq!(canonical_key("@finance_app_data_v3"), "finance_app_data_v3");
        assert_eq!(canonical_key("My Ledger"), "my_ledger");
        assert_eq!(canonical_key("@@"), "ledger");
    }

    #[test]
    fn missing_key_loads_as_none() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path().to_path_buf()).expect("storage");
        assert!(storage.load("nothing").expect("load").is_none());
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path().to_path_buf()).expect("storage");
        fs::write(storage.path_for("broken"), "{ not json").expect("write");
        let err = storage.load("broken").expect_err("malformed");
        assert!(matches!(err, LedgerError::Serde(_)));
    }

    #[test]
    fn save_replaces_file_without_leaving_temp() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path().to_path_buf()).expect("storage");
        let ledger = Ledger::default();
        storage.save("key", &ledger).expect("save");
        storage.save("key", &ledger).expect("save again");
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(storage.load("key").expect("load"), Some(ledger));
    }
}
