//! # Domain Types
//!
//! Core domain types used throughout TablePOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │     Table       │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id (u32)       │   │  id → MenuItem  │       │
//! │  │  name           │   │  name           │   │  name  (frozen) │       │
//! │  │  category       │   │  capacity       │   │  price (frozen) │       │
//! │  │  price          │   └─────────────────┘   │  quantity ≥ 1   │       │
//! │  │  icon           │                         │  category       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  OrderMap = BTreeMap<TableId, Vec<OrderLine>>                          │
//! │  A key is present only while its Vec is non-empty.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Menu item identifier.
pub type ItemId = u32;

/// Table identifier.
pub type TableId = u32;

/// Every table's running order, keyed by table id.
///
/// Serialized as a JSON object whose keys are the table ids as strings.
pub type OrderMap = BTreeMap<TableId, Vec<OrderLine>>;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink the restaurant sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    /// Category slug, e.g. `"rice"` or `"beverages"`.
    pub category: String,
    pub price: Money,
    /// Opaque display tag (an emoji in the browser UI).
    pub icon: String,
}

// =============================================================================
// Table
// =============================================================================

/// A dining table orders can be placed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
}

// =============================================================================
// Order Line
// =============================================================================

/// One distinct menu item within a table's order.
///
/// Snapshot pattern: name, price and category are copied from the menu
/// when the line is created, so later menu edits never change an order
/// that is already running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    /// Menu item this line was created from.
    pub id: ItemId,
    /// Item name at time of ordering (frozen).
    pub name: String,
    /// Unit price at time of ordering (frozen).
    pub price: Money,
    /// Always at least 1.
    pub quantity: u32,
    pub category: String,
}

impl OrderLine {
    /// Creates a quantity-1 line from the menu item's current data.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        OrderLine {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            category: item.category.clone(),
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
