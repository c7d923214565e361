//! # POS Engine
//!
//! Composes the catalog, registry, order store and drag controller, and
//! turns every user intent into an ordered list of [`Effect`]s.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Intent::Touch / Pointer ──► DragController ──► Dropped{item,table}     │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │  Intent::ChangeQuantity ─────────────────────► OrderStore              │
//! │  Intent::ClearOrder / EndSession ─────────────►    │                   │
//! │                                                     ▼                   │
//! │                           [drag visuals…, Save, Render, Notify…]       │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                               host shell runs them     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here fails loudly. Lookup misses are no-ops, an empty order
//! turns into a warning toast.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::bill::{Bill, Totals};
use crate::catalog::{MenuCatalog, MenuFilter, TableRegistry};
use crate::drag::{DragConfig, DragController, DragEffect, HitTest, PointerInput, TouchInput};
use crate::effect::Effect;
use crate::error::{CoreError, CoreResult};
use crate::order::OrderStore;
use crate::types::{ItemId, MenuItem, OrderMap, Severity, Table, TableId};

/// Everything the presentation layer can ask of the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Raw mouse drag-and-drop input.
    Pointer(PointerInput),
    /// Raw touch input.
    Touch(TouchInput),
    /// A hold timer requested by `DragEffect::StartHoldTimer` fired.
    HoldElapsed { generation: u64 },
    /// Abort any drag in progress.
    InterruptGesture,
    /// The table layout moved under the pointer (scroll or re-arrange).
    LayoutChanged,
    OpenTable(TableId),
    CloseTable,
    ChangeQuantity {
        table: TableId,
        item: ItemId,
        delta: i32,
    },
    RemoveLine {
        table: TableId,
        item: ItemId,
    },
    /// "Clear Order" on the open table.
    ClearOrder,
    /// "End Session" on the open table.
    EndSession,
    /// "Generate Bill" on the open table, stamped by the host's clock.
    GenerateBill { at: DateTime<Local> },
    FilterMenu { category: String, term: String },
    SearchTables { term: String },
}

/// One table as the floor view draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCard<'a> {
    pub table: &'a Table,
    pub has_orders: bool,
    pub item_count: u32,
    pub totals: Totals,
}

/// The ordering core for one device.
#[derive(Debug)]
pub struct PosEngine {
    tables: TableRegistry,
    orders: OrderStore,
    drag: DragController,
    menu_filter: MenuFilter,
    table_search: String,
}

impl PosEngine {
    pub fn new(catalog: MenuCatalog, tables: TableRegistry, drag: DragConfig) -> Self {
        PosEngine {
            tables,
            orders: OrderStore::new(Arc::new(catalog)),
            drag: DragController::new(drag),
            menu_filter: MenuFilter::default(),
            table_search: String::new(),
        }
    }

    /// The built-in menu and floor plan.
    pub fn standard(drag: DragConfig) -> CoreResult<Self> {
        Ok(Self::new(
            MenuCatalog::standard()?,
            TableRegistry::standard()?,
            drag,
        ))
    }

    /// Seeds the order map from storage. Called once at startup.
    pub fn restore(&mut self, loaded: OrderMap) {
        self.orders.restore(loaded);
        info!(
            tables = self.orders.snapshot().len(),
            "Restored saved orders"
        );
    }

    /// Applies one intent and returns the effects to run, in order.
    pub fn handle(&mut self, intent: Intent, layout: &dyn HitTest) -> Vec<Effect> {
        let mut batch = EffectBatch::default();

        match intent {
            Intent::Pointer(input) => {
                let effects = self.drag.pointer(input, layout);
                self.apply_drag(effects, &mut batch);
            }
            Intent::Touch(input) => {
                let effects = self.drag.touch(input, layout);
                self.apply_drag(effects, &mut batch);
            }
            Intent::HoldElapsed { generation } => {
                let effects = self.drag.hold_elapsed(generation);
                self.apply_drag(effects, &mut batch);
            }
            Intent::InterruptGesture => {
                let effects = self.drag.interrupt();
                self.apply_drag(effects, &mut batch);
            }
            Intent::LayoutChanged => {
                let effects = self.drag.relocate(layout);
                self.apply_drag(effects, &mut batch);
            }
            Intent::OpenTable(table) => {
                if self.tables.find_by_id(table).is_some() {
                    batch.extend(self.orders.open_session(table));
                } else {
                    debug!(table, "Ignoring open of unknown table");
                }
            }
            Intent::CloseTable => batch.extend(self.orders.close_session()),
            Intent::ChangeQuantity { table, item, delta } => {
                batch.extend(self.orders.change_quantity(table, item, delta));
            }
            Intent::RemoveLine { table, item } => {
                batch.extend(self.orders.remove_line(table, item));
            }
            Intent::ClearOrder => {
                let result = self.try_clear_order();
                self.settle(result, &mut batch);
            }
            Intent::EndSession => {
                let result = self.try_end_session();
                self.settle(result, &mut batch);
            }
            Intent::GenerateBill { at } => {
                let result = self.try_generate_bill(at).map(|bill| vec![Effect::PrintBill(bill)]);
                self.settle(result, &mut batch);
            }
            Intent::FilterMenu { category, term } => {
                self.menu_filter = MenuFilter::new(&category, term);
                batch.push(Effect::Render);
            }
            Intent::SearchTables { term } => {
                self.table_search = term;
                batch.push(Effect::Render);
            }
        }

        batch.into_effects()
    }

    /// Clears the open table's order and closes it.
    pub fn try_clear_order(&mut self) -> CoreResult<Vec<Effect>> {
        let table = self.open_table()?;
        let name = table.name.clone();
        let id = table.id;

        let mut effects = self.orders.clear_order(id);
        effects.extend(self.orders.close_session());
        effects.push(Effect::notify(format!("Order cleared for {name}"), Severity::Info));
        Ok(effects)
    }

    /// Settles the open table: its order is cleared and the view closed.
    ///
    /// Refused with [`CoreError::EmptyOrder`] when nothing was ordered.
    pub fn try_end_session(&mut self) -> CoreResult<Vec<Effect>> {
        let table = self.open_table()?;
        let name = table.name.clone();
        let id = table.id;

        if !self.orders.has_orders(id) {
            return Err(CoreError::EmptyOrder { table: name });
        }

        let mut effects = self.orders.clear_order(id);
        effects.extend(self.orders.close_session());
        effects.push(Effect::notify(format!("Session ended for {name}"), Severity::Success));
        info!(table = id, "Session ended");
        Ok(effects)
    }

    /// Builds the open table's bill.
    pub fn try_generate_bill(&self, at: DateTime<Local>) -> CoreResult<Bill> {
        let table = self.open_table()?;
        Bill::for_table(table, self.orders.lines(table.id), at)
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub fn catalog(&self) -> &MenuCatalog {
        self.orders.catalog()
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn menu_filter(&self) -> &MenuFilter {
        &self.menu_filter
    }

    pub fn table_search(&self) -> &str {
        &self.table_search
    }

    /// Menu items passing the current category/search filter.
    pub fn visible_menu(&self) -> Vec<&MenuItem> {
        self.catalog().filter(&self.menu_filter)
    }

    /// Tables passing the current search, with their order summary.
    pub fn visible_tables(&self) -> Vec<TableCard<'_>> {
        self.tables
            .search(&self.table_search, self.orders.snapshot())
            .into_iter()
            .map(|table| {
                let lines = self.orders.lines(table.id);
                TableCard {
                    table,
                    has_orders: !lines.is_empty(),
                    item_count: self.orders.item_count(table.id),
                    totals: Totals::of(lines),
                }
            })
            .collect()
    }

    /// Totals for any table (zero when it has no order).
    pub fn totals(&self, table: TableId) -> Totals {
        Totals::of(self.orders.lines(table))
    }

    fn open_table(&self) -> CoreResult<&Table> {
        let id = self.orders.current_table().ok_or(CoreError::NoOpenSession)?;
        self.tables.find_by_id(id).ok_or(CoreError::TableNotFound(id))
    }

    /// Routes drag output: drops become order mutations, everything is
    /// passed on for the host to draw.
    fn apply_drag(&mut self, effects: Vec<DragEffect>, batch: &mut EffectBatch) {
        for effect in effects {
            if let DragEffect::Dropped { item, table } = effect {
                batch.extend(self.drop_item(item, table));
            }
            batch.push(Effect::Drag(effect));
        }
    }

    fn drop_item(&mut self, item: ItemId, table: TableId) -> Vec<Effect> {
        let Some(target) = self.tables.find_by_id(table) else {
            debug!(table, item, "Ignoring drop on unknown table");
            return Vec::new();
        };
        let target_name = target.name.clone();

        let mut effects = self.orders.add_item(table, item);
        if let Some(menu_item) = self.catalog().find_by_id(item) {
            if !effects.is_empty() {
                effects.push(Effect::notify(
                    format!("{} added to {}", menu_item.name, target_name),
                    Severity::Success,
                ));
            }
        }
        effects
    }

    /// Converts a refused action into what the user sees.
    fn settle(&self, result: CoreResult<Vec<Effect>>, batch: &mut EffectBatch) {
        match result {
            Ok(effects) => batch.extend(effects),
            Err(CoreError::EmptyOrder { table }) => batch.push(Effect::notify(
                format!("No items ordered for {table}"),
                Severity::Warning,
            )),
            Err(err) => debug!(%err, "Ignoring action"),
        }
    }
}

/// Collects effects for one intent, coalescing saves and renders.
///
/// Output order: drag effects, then at most one `Save`, then at most one
/// `Render`, then notifications and print requests.
#[derive(Debug, Default)]
struct EffectBatch {
    drag: Vec<Effect>,
    save: bool,
    render: bool,
    after: Vec<Effect>,
}

impl EffectBatch {
    fn push(&mut self, effect: Effect) {
        match effect {
            Effect::Save => self.save = true,
            Effect::Render => self.render = true,
            Effect::Drag(_) => self.drag.push(effect),
            Effect::Notify { .. } | Effect::PrintBill(_) => self.after.push(effect),
        }
    }

    fn extend(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.push(effect);
        }
    }

    fn into_effects(self) -> Vec<Effect> {
        let mut out = self.drag;
        if self.save {
            out.push(Effect::Save);
        }
        if self.render {
            out.push(Effect::Render);
        }
        out.extend(self.after);
        out
    }
}
