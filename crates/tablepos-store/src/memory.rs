//! # In-Memory Store
//!
//! Keeps the last saved order map in memory. Used by tests and by hosts
//! that run without a data directory.

use std::convert::Infallible;

use tablepos_core::persistence::{decode_orders, encode_orders};
use tablepos_core::{OrderMap, PersistenceAdapter};

/// Order map held as the serialized string a real backend would store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw stored text (possibly corrupt).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStore {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PersistenceAdapter for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> OrderMap {
        self.raw.as_deref().map(decode_orders).unwrap_or_default()
    }

    fn save(&mut self, orders: &OrderMap) -> Result<(), Infallible> {
        // A BTreeMap of plain records always encodes.
        self.raw = encode_orders(orders).ok();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_empty() {
        assert!(MemoryStore::new().load().is_empty());
    }

    #[test]
    fn test_corrupt_seed_is_empty() {
        assert!(MemoryStore::with_raw("{oops").load().is_empty());
    }

    #[test]
    fn test_counts_saves() {
        let mut store = MemoryStore::new();
        store.save(&OrderMap::new()).unwrap();
        store.save(&OrderMap::new()).unwrap();
        assert_eq!(store.saves(), 2);
        assert_eq!(store.raw(), Some("{}"));
    }
}
