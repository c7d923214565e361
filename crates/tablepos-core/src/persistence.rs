//! # Persistence Port
//!
//! The contract storage backends implement, and the stored format.
//!
//! ## Stored Format
//! A JSON object keyed by table id (as a string), each value the table's
//! order lines in display order. There is no version field.
//!
//! ```json
//! {
//!   "2": [
//!     { "id": 11, "name": "Hyderabadi Biryani", "price": 350.0,
//!       "quantity": 2, "category": "rice" }
//!   ]
//! }
//! ```
//!
//! Decoding never fails: anything unreadable is treated as "no saved
//! orders".

use tracing::warn;

use crate::types::OrderMap;

/// Load/save of the order map.
///
/// `load` is called once at startup; `save` after every committed change.
pub trait PersistenceAdapter {
    type Error: std::error::Error;

    /// The saved orders, or an empty map when nothing usable is stored.
    fn load(&self) -> OrderMap;

    fn save(&mut self, orders: &OrderMap) -> Result<(), Self::Error>;
}

/// Parses stored orders, falling back to an empty map on corrupt input.
pub fn decode_orders(raw: &str) -> OrderMap {
    if raw.trim().is_empty() {
        return OrderMap::new();
    }

    match serde_json::from_str::<OrderMap>(raw) {
        Ok(orders) => orders,
        Err(err) => {
            warn!(%err, "Discarding unreadable saved orders");
            OrderMap::new()
        }
    }
}

pub fn encode_orders(orders: &OrderMap) -> serde_json::Result<String> {
    serde_json::to_string(orders)
}
