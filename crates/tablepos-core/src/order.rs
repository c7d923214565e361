//! # Order Store
//!
//! Owns every table's running order and the open-table session.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Store Operations                               │
//! │                                                                         │
//! │  UI Action               Operation                 Order Map Change     │
//! │  ─────────               ─────────                 ────────────────     │
//! │                                                                         │
//! │  Drop item on table ────► add_item() ────────────► push line / qty+1   │
//! │                                                                         │
//! │  Click + / − ───────────► change_quantity() ─────► qty±1 (0 ⇒ remove) │
//! │                                                                         │
//! │  Click remove ──────────► remove_line() ─────────► line gone           │
//! │                                                                         │
//! │  Clear / End session ───► clear_order() ─────────► table key gone      │
//! │                                                                         │
//! │  Open / close table ────► open/close_session() ──► (session only)      │
//! │                                                                         │
//! │  INVARIANT: a table id is a key of the order map iff it has lines.     │
//! │  A committed change returns [Save, Render]; a no-op returns [].        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::MenuCatalog;
use crate::effect::{committed, Effect};
use crate::types::{ItemId, OrderLine, OrderMap, TableId};

/// Table → order lines, plus the currently open table.
#[derive(Debug, Clone)]
pub struct OrderStore {
    catalog: Arc<MenuCatalog>,
    orders: OrderMap,
    current_table: Option<TableId>,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        OrderStore {
            catalog,
            orders: OrderMap::new(),
            current_table: None,
        }
    }

    /// Replaces the order map with one loaded from storage.
    ///
    /// Stored data is untrusted: zero-quantity lines are dropped,
    /// repeated item ids within a table are merged into the first line,
    /// and tables left empty are removed.
    pub fn restore(&mut self, loaded: OrderMap) {
        let mut orders = OrderMap::new();

        for (table_id, lines) in loaded {
            let mut kept: Vec<OrderLine> = Vec::with_capacity(lines.len());
            for line in lines {
                if line.quantity == 0 {
                    warn!(table_id, item_id = line.id, "Dropping zero-quantity order line");
                    continue;
                }
                match kept.iter_mut().find(|existing| existing.id == line.id) {
                    Some(existing) => {
                        warn!(table_id, item_id = line.id, "Merging duplicate order line");
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                    None => kept.push(line),
                }
            }
            if !kept.is_empty() {
                orders.insert(table_id, kept);
            }
        }

        self.orders = orders;
        self.check_invariant();
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one of `item_id` to the table's order.
    ///
    /// A new line snapshots the menu's current name, price and category;
    /// an existing line just gains one. Unknown items are ignored.
    pub fn add_item(&mut self, table_id: TableId, item_id: ItemId) -> Vec<Effect> {
        let Some(item) = self.catalog.find_by_id(item_id) else {
            debug!(table_id, item_id, "Ignoring add of unknown menu item");
            return Vec::new();
        };

        let lines = self.orders.entry(table_id).or_default();
        match lines.iter_mut().find(|line| line.id == item_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(OrderLine::from_menu_item(item)),
        }

        debug!(table_id, item_id, "Item added to order");
        self.check_invariant();
        committed()
    }

    /// Adjusts a line's quantity by `delta`. A result of zero or less
    /// removes the line. Unknown tables or lines are ignored.
    pub fn change_quantity(&mut self, table_id: TableId, item_id: ItemId, delta: i32) -> Vec<Effect> {
        if delta == 0 {
            return Vec::new();
        }

        let Some(line) = self
            .orders
            .get_mut(&table_id)
            .and_then(|lines| lines.iter_mut().find(|line| line.id == item_id))
        else {
            debug!(table_id, item_id, "Ignoring quantity change on missing line");
            return Vec::new();
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            return self.remove_line(table_id, item_id);
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        debug!(table_id, item_id, quantity = line.quantity, "Quantity changed");
        self.check_invariant();
        committed()
    }

    /// Deletes a line, and the table's entry if it was the last one.
    pub fn remove_line(&mut self, table_id: TableId, item_id: ItemId) -> Vec<Effect> {
        let Some(lines) = self.orders.get_mut(&table_id) else {
            return Vec::new();
        };

        let before = lines.len();
        lines.retain(|line| line.id != item_id);
        if lines.len() == before {
            return Vec::new();
        }
        if lines.is_empty() {
            self.orders.remove(&table_id);
        }

        debug!(table_id, item_id, "Order line removed");
        self.check_invariant();
        committed()
    }

    /// Drops the table's whole order.
    pub fn clear_order(&mut self, table_id: TableId) -> Vec<Effect> {
        if self.orders.remove(&table_id).is_none() {
            return Vec::new();
        }

        debug!(table_id, "Order cleared");
        self.check_invariant();
        committed()
    }

    /// Marks a table's detail view as open.
    ///
    /// The session is not persisted, so this only asks for a render.
    pub fn open_session(&mut self, table_id: TableId) -> Vec<Effect> {
        if self.current_table == Some(table_id) {
            return Vec::new();
        }
        self.current_table = Some(table_id);
        vec![Effect::Render]
    }

    pub fn close_session(&mut self) -> Vec<Effect> {
        if self.current_table.take().is_none() {
            return Vec::new();
        }
        vec![Effect::Render]
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Read-only view of every table's order.
    pub fn snapshot(&self) -> &OrderMap {
        &self.orders
    }

    /// The table whose detail view is open, if any.
    pub fn current_table(&self) -> Option<TableId> {
        self.current_table
    }

    /// A table's lines in display order; empty when it has no order.
    pub fn lines(&self, table_id: TableId) -> &[OrderLine] {
        self.orders.get(&table_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_orders(&self, table_id: TableId) -> bool {
        self.orders.contains_key(&table_id)
    }

    /// Ids of tables with a running order, ascending.
    pub fn occupied_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        self.orders.keys().copied()
    }

    /// Sum of quantities on a table.
    pub fn item_count(&self, table_id: TableId) -> u32 {
        self.lines(table_id).iter().map(|line| line.quantity).sum()
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    fn check_invariant(&self) {
        debug_assert!(
            self.orders.values().all(|lines| {
                !lines.is_empty()
                    && lines.iter().all(|line| line.quantity >= 1)
                    && lines
                        .iter()
                        .enumerate()
                        .all(|(i, line)| lines[..i].iter().all(|prev| prev.id != line.id))
            }),
            "order map holds an empty order, a zero quantity or a repeated item"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    fn store() -> OrderStore {
        OrderStore::new(Arc::new(MenuCatalog::standard().unwrap()))
    }

    fn invariant_holds(store: &OrderStore) -> bool {
        store.snapshot().values().all(|lines| !lines.is_empty())
    }

    #[test]
    fn test_add_item_creates_line() {
        let mut store = store();
        let effects = store.add_item(2, 11);

        assert_eq!(effects, vec![Effect::Save, Effect::Render]);
        let lines = store.lines(2);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, 11);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].price, Money::new(350.0));
        assert_eq!(lines[0].name, "Hyderabadi Biryani");
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut store = store();
        store.add_item(2, 11);
        store.add_item(2, 11);
        store.add_item(2, 11);

        assert_eq!(store.lines(2).len(), 1);
        assert_eq!(store.lines(2)[0].quantity, 3);
    }

    #[test]
    fn test_add_then_increment_matches_repeated_add() {
        let mut repeated = store();
        for _ in 0..3 {
            repeated.add_item(4, 5);
        }

        let mut incremented = store();
        incremented.add_item(4, 5);
        incremented.change_quantity(4, 5, 1);
        incremented.change_quantity(4, 5, 1);

        assert_eq!(repeated.snapshot(), incremented.snapshot());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut store = store();
        store.add_item(1, 13);
        store.add_item(1, 5);
        store.add_item(1, 13);

        let ids: Vec<_> = store.lines(1).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![13, 5]);
    }

    #[test]
    fn test_unknown_item_is_silent_noop() {
        let mut store = store();
        assert!(store.add_item(2, 999).is_empty());
        assert!(!store.has_orders(2));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_decrement_to_zero_removes_line_and_table() {
        let mut store = store();
        store.add_item(2, 11);
        store.add_item(2, 11);

        let effects = store.change_quantity(2, 11, -2);
        assert_eq!(effects, vec![Effect::Save, Effect::Render]);
        assert!(!store.has_orders(2));
        assert!(!store.snapshot().contains_key(&2));
    }

    #[test]
    fn test_decrement_keeps_other_lines() {
        let mut store = store();
        store.add_item(2, 11);
        store.add_item(2, 13);

        store.change_quantity(2, 11, -1);
        assert!(store.has_orders(2));
        assert_eq!(store.lines(2).len(), 1);
        assert_eq!(store.lines(2)[0].id, 13);
    }

    #[test]
    fn test_change_quantity_on_missing_line_is_noop() {
        let mut store = store();
        assert!(store.change_quantity(3, 11, 1).is_empty());
        store.add_item(3, 13);
        assert!(store.change_quantity(3, 11, -1).is_empty());
        assert!(store.change_quantity(3, 13, 0).is_empty());
        assert_eq!(store.lines(3)[0].quantity, 1);
    }

    #[test]
    fn test_clear_order_removes_key() {
        let mut store = store();
        store.add_item(2, 11);
        store.add_item(2, 20);

        assert_eq!(store.clear_order(2), vec![Effect::Save, Effect::Render]);
        assert!(!store.snapshot().contains_key(&2));
        assert!(store.clear_order(2).is_empty());
    }

    #[test]
    fn test_line_price_is_frozen() {
        let catalog = MenuCatalog::standard().unwrap();
        let mut store = OrderStore::new(Arc::new(catalog.clone()));
        store.add_item(1, 11);

        let mut repriced: Vec<_> = catalog.items().to_vec();
        for item in &mut repriced {
            item.price = Money::new(999.0);
        }
        let mut newer = OrderStore::new(Arc::new(MenuCatalog::new(repriced).unwrap()));
        newer.restore(store.snapshot().clone());
        newer.add_item(1, 11);

        assert_eq!(newer.lines(1)[0].price, Money::new(350.0));
        assert_eq!(newer.lines(1)[0].quantity, 2);
    }

    #[test]
    fn test_session_open_close() {
        let mut store = store();
        assert_eq!(store.open_session(3), vec![Effect::Render]);
        assert_eq!(store.current_table(), Some(3));
        assert!(store.open_session(3).is_empty());
        assert_eq!(store.close_session(), vec![Effect::Render]);
        assert_eq!(store.current_table(), None);
        assert!(store.close_session().is_empty());
    }

    #[test]
    fn test_restore_normalizes_corrupt_entries() {
        let catalog = MenuCatalog::standard().unwrap();
        let biryani = OrderLine::from_menu_item(catalog.find_by_id(11).unwrap());

        let mut loaded = OrderMap::new();
        loaded.insert(1, Vec::new());
        loaded.insert(2, vec![OrderLine { quantity: 0, ..biryani.clone() }]);
        loaded.insert(3, vec![biryani.clone(), biryani.clone()]);

        let mut store = store();
        store.restore(loaded);

        assert_eq!(store.occupied_tables().collect::<Vec<_>>(), vec![3]);
        assert_eq!(store.lines(3).len(), 1);
        assert_eq!(store.item_count(3), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(TableId, ItemId),
        Change(TableId, ItemId, i32),
        Remove(TableId, ItemId),
        Clear(TableId),
    }

    fn item() -> impl Strategy<Value = ItemId> {
        prop_oneof![1u32..6, Just(999u32)]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u32..4, item()).prop_map(|(t, i)| Op::Add(t, i)),
            (1u32..4, item(), -3i32..3).prop_map(|(t, i, d)| Op::Change(t, i, d)),
            (1u32..4, item()).prop_map(|(t, i)| Op::Remove(t, i)),
            (1u32..4).prop_map(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn has_orders_invariant_after_every_mutation(ops in prop::collection::vec(op(), 0..60)) {
            let mut store = store();
            for op in ops {
                let effects = match op {
                    Op::Add(t, i) => store.add_item(t, i),
                    Op::Change(t, i, d) => store.change_quantity(t, i, d),
                    Op::Remove(t, i) => store.remove_line(t, i),
                    Op::Clear(t) => store.clear_order(t),
                };
                prop_assert!(effects.is_empty() || effects == vec![Effect::Save, Effect::Render]);
                prop_assert!(invariant_holds(&store));
            }
        }

        #[test]
        fn decrement_by_full_quantity_removes_line(adds in 1usize..6) {
            let mut store = store();
            for _ in 0..adds {
                store.add_item(2, 11);
            }
            let qty = store.lines(2)[0].quantity as i32;
            store.change_quantity(2, 11, -qty);
            prop_assert!(!store.snapshot().contains_key(&2));
        }
    }
}
