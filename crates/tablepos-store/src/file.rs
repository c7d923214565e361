//! # JSON File Store
//!
//! Keeps the order map in a single JSON file, the desktop counterpart of
//! the browser's local storage slot.
//!
//! ## Write Path
//! ```text
//! save(orders)
//!     │
//!     ▼
//! create parent dir (first save only)
//!     │
//!     ▼
//! write restaurant_orders.json.tmp ──► rename over restaurant_orders.json
//!
//! A crash mid-save leaves the previous file intact.
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tablepos_core::persistence::{decode_orders, encode_orders};
use tablepos_core::{OrderMap, PersistenceAdapter};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name used when only a directory is configured.
pub const DEFAULT_FILE_NAME: &str = "restaurant_orders.json";

/// Order map persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Store backed by [`DEFAULT_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, orders: &OrderMap) -> StoreResult<()> {
        let json = encode_orders(orders)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

impl PersistenceAdapter for JsonFileStore {
    type Error = StoreError;

    fn load(&self) -> OrderMap {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let orders = decode_orders(&raw);
                info!(path = ?self.path, tables = orders.len(), "Loaded saved orders");
                orders
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No saved orders yet");
                OrderMap::new()
            }
            Err(err) => {
                warn!(path = ?self.path, %err, "Could not read saved orders; starting empty");
                OrderMap::new()
            }
        }
    }

    fn save(&mut self, orders: &OrderMap) -> StoreResult<()> {
        self.write(orders)?;
        debug!(path = ?self.path, tables = orders.len(), "Orders saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablepos_core::{Money, OrderLine};

    fn orders() -> OrderMap {
        let mut orders = OrderMap::new();
        orders.insert(
            2,
            vec![OrderLine {
                id: 11,
                name: "Hyderabadi Biryani".to_string(),
                price: Money::new(350.0),
                quantity: 2,
                category: "rice".to_string(),
            }],
        );
        orders
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path().join("nested"));

        store.save(&orders()).unwrap();
        assert_eq!(store.load(), orders());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_empty_map_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());

        store.save(&orders()).unwrap();
        store.save(&OrderMap::new()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{\"2\": [garbage").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        // A regular file where the parent directory should be.
        let mut store = JsonFileStore::in_dir(&blocker);
        assert!(matches!(store.save(&orders()), Err(StoreError::Io { .. })));
    }
}
