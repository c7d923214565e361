//! # Menu Catalog & Table Registry
//!
//! Read-only lookup tables built once at startup from static data.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │    MenuCatalog::standard()    ──► 23 menu items, 6 categories           │
//! │    TableRegistry::standard()  ──► 8 tables                              │
//! │                                                                         │
//! │  Runtime (shared, never mutated)                                        │
//! │    find_by_id(id)   ──► Some(&entity) | None                           │
//! │    filter / search  ──► read-only views for the presentation layer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ItemId, MenuItem, OrderMap, Table, TableId};
use crate::validation::{validate_capacity, validate_name, validate_price, validate_search_query};

// =============================================================================
// Menu Catalog
// =============================================================================

/// The restaurant's menu.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
    index: HashMap<ItemId, usize>,
}

impl MenuCatalog {
    /// Builds a catalog, rejecting blank names, negative prices and
    /// duplicate ids.
    pub fn new(items: Vec<MenuItem>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(items.len());

        for (pos, item) in items.iter().enumerate() {
            validate_name("menu item name", &item.name)?;
            validate_name("menu item category", &item.category)?;
            validate_price(item.price.amount())?;

            if index.insert(item.id, pos).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "menu item id".to_string(),
                    value: item.id.to_string(),
                }
                .into());
            }
        }

        Ok(MenuCatalog { items, index })
    }

    /// The built-in menu.
    pub fn standard() -> CoreResult<Self> {
        let items = STANDARD_MENU
            .iter()
            .map(|&(id, name, category, price, icon)| MenuItem {
                id,
                name: name.to_string(),
                category: category.to_string(),
                price: Money::new(price),
                icon: icon.to_string(),
            })
            .collect();

        Self::new(items)
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&MenuItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// All items in menu order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in the order they first appear on the menu.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// Items matching the category tab and search box, in menu order.
    ///
    /// An over-long search term matches nothing.
    pub fn filter(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        let Ok(term) = validate_search_query(&filter.term) else {
            return Vec::new();
        };
        let term = term.to_lowercase();

        self.items
            .iter()
            .filter(|item| match &filter.category {
                Some(category) => item.category.eq_ignore_ascii_case(category),
                None => true,
            })
            .filter(|item| term.is_empty() || item.name.to_lowercase().contains(&term))
            .collect()
    }
}

/// Criteria from the menu panel's category tabs and search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// `None` shows every category.
    pub category: Option<String>,
    pub term: String,
}

impl MenuFilter {
    /// Builds a filter from raw UI values; the `"all"` tab (or a blank
    /// one) means no category restriction.
    pub fn new(category: &str, term: impl Into<String>) -> Self {
        let category = category.trim();
        let category = if category.is_empty() || category.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category.to_string())
        };

        MenuFilter {
            category,
            term: term.into(),
        }
    }
}

// =============================================================================
// Table Registry
// =============================================================================

/// The dining room's tables.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: Vec<Table>,
    index: HashMap<TableId, usize>,
}

impl TableRegistry {
    /// Builds a registry, rejecting blank names, zero capacity and
    /// duplicate ids.
    pub fn new(tables: Vec<Table>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(tables.len());

        for (pos, table) in tables.iter().enumerate() {
            validate_name("table name", &table.name)?;
            validate_capacity(table.capacity)?;

            if index.insert(table.id, pos).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "table id".to_string(),
                    value: table.id.to_string(),
                }
                .into());
            }
        }

        Ok(TableRegistry { tables, index })
    }

    /// The built-in floor plan.
    pub fn standard() -> CoreResult<Self> {
        let tables = STANDARD_TABLE_CAPACITIES
            .iter()
            .zip(1..)
            .map(|(&capacity, id)| Table {
                id,
                name: format!("Table {id}"),
                capacity,
            })
            .collect();

        Self::new(tables)
    }

    pub fn find_by_id(&self, id: TableId) -> Option<&Table> {
        self.index.get(&id).map(|&pos| &self.tables[pos])
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables whose name matches the term, or whose running order
    /// contains a matching item. An empty term returns every table.
    ///
    /// An over-long search term matches nothing.
    pub fn search(&self, term: &str, orders: &OrderMap) -> Vec<&Table> {
        let Ok(term) = validate_search_query(term) else {
            return Vec::new();
        };
        if term.is_empty() {
            return self.tables.iter().collect();
        }
        let term = term.to_lowercase();

        self.tables
            .iter()
            .filter(|table| {
                table.name.to_lowercase().contains(&term)
                    || orders.get(&table.id).is_some_and(|lines| {
                        lines
                            .iter()
                            .any(|line| line.name.to_lowercase().contains(&term))
                    })
            })
            .collect()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// (id, name, category, price, icon)
const STANDARD_MENU: &[(ItemId, &str, &str, f64, &str)] = &[
    (1, "Paneer Tikka", "starters", 220.0, "🧀"),
    (2, "Chicken 65", "starters", 240.0, "🍗"),
    (3, "Veg Samosa", "starters", 60.0, "🥟"),
    (4, "Onion Bhaji", "starters", 90.0, "🧅"),
    (5, "Butter Chicken", "mains", 320.0, "🍛"),
    (6, "Paneer Butter Masala", "mains", 280.0, "🥘"),
    (7, "Dal Makhani", "mains", 210.0, "🍲"),
    (8, "Mutton Rogan Josh", "mains", 380.0, "🍖"),
    (9, "Chana Masala", "mains", 190.0, "🫘"),
    (10, "Jeera Rice", "rice", 150.0, "🍚"),
    (11, "Hyderabadi Biryani", "rice", 350.0, "🍛"),
    (12, "Veg Pulao", "rice", 180.0, "🍚"),
    (13, "Butter Naan", "breads", 50.0, "🫓"),
    (14, "Garlic Naan", "breads", 60.0, "🫓"),
    (15, "Tandoori Roti", "breads", 30.0, "🫓"),
    (16, "Laccha Paratha", "breads", 55.0, "🥞"),
    (17, "Gulab Jamun", "desserts", 80.0, "🍮"),
    (18, "Rasmalai", "desserts", 100.0, "🍨"),
    (19, "Kulfi", "desserts", 90.0, "🍦"),
    (20, "Masala Chai", "beverages", 40.0, "☕"),
    (21, "Mango Lassi", "beverages", 110.0, "🥭"),
    (22, "Sweet Lime Soda", "beverages", 70.0, "🍋"),
    (23, "Filter Coffee", "beverages", 50.0, "☕"),
];

/// Seat counts for tables 1..=8.
const STANDARD_TABLE_CAPACITIES: &[u32] = &[2, 4, 4, 6, 2, 4, 6, 8];
