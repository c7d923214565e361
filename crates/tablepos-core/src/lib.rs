//! # tablepos-core: Ordering Logic for TablePOS
//!
//! The order state engine and the drag-and-drop gesture controller for a
//! restaurant's table-side point of sale. Pure logic, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TablePOS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (browser / console)             │   │
//! │  │    Menu panel ──► Table grid ──► Order modal ──► Printed bill   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Intent                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tablepos-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   order   │  │   drag    │  │   bill    │  │   │
//! │  │   │  Menu     │  │ OrderStore│  │ Gesture   │  │ Subtotal  │  │   │
//! │  │   │  Tables   │  │ Session   │  │ machine   │  │ Tax/Total │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                         engine: Intent → [Effect]               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO TIMERS • EFFECTS ARE RETURNED         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Effect                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Host shell: Save → tablepos-store, Render, Notify        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Table, OrderLine, OrderMap)
//! - [`money`] - Full-precision money and the fixed 5% tax rate
//! - [`catalog`] - Menu catalog and table registry
//! - [`order`] - The order store
//! - [`bill`] - Bill math and printable bills
//! - [`drag`] - Unified pointer/touch drag controller
//! - [`engine`] - Intent handling
//! - [`persistence`] - The storage port and the stored format
//!
//! ## Example Usage
//!
//! ```rust
//! use tablepos_core::drag::{DragConfig, HitTest, Point, PointerInput};
//! use tablepos_core::engine::{Intent, PosEngine};
//! use tablepos_core::TableId;
//!
//! struct OneTable;
//! impl HitTest for OneTable {
//!     fn table_at(&self, _at: Point) -> Option<TableId> {
//!         Some(2)
//!     }
//! }
//!
//! let mut engine = PosEngine::standard(DragConfig::default()).unwrap();
//! let at = Point::new(10.0, 10.0);
//! engine.handle(Intent::Pointer(PointerInput::DragStart { item: 11, at }), &OneTable);
//! engine.handle(Intent::Pointer(PointerInput::Drop { at }), &OneTable);
//!
//! assert_eq!(engine.totals(2).grand_total.to_string(), "367.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod catalog;
pub mod drag;
pub mod effect;
pub mod engine;
pub mod error;
pub mod money;
pub mod order;
pub mod persistence;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use effect::Effect;
pub use engine::{Intent, PosEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use persistence::PersistenceAdapter;
pub use types::*;
