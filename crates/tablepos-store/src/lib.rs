//! # tablepos-store: Order Persistence for TablePOS
//!
//! Implementations of the core's [`PersistenceAdapter`] port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TablePOS Data Flow                               │
//! │                                                                         │
//! │  Effect::Save (from tablepos-core)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tablepos-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐          ┌────────────────────┐       │   │
//! │  │   │   JsonFileStore    │          │    MemoryStore     │       │   │
//! │  │   │   (file.rs)        │          │    (memory.rs)     │       │   │
//! │  │   │  temp + rename     │          │  tests, no disk    │       │   │
//! │  │   └────────────────────┘          └────────────────────┘       │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/tablepos/restaurant_orders.json                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tablepos_core::PersistenceAdapter;
//! use tablepos_store::JsonFileStore;
//!
//! let mut store = JsonFileStore::in_dir("/var/lib/tablepos");
//! let orders = store.load();
//! store.save(&orders).unwrap();
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use file::{JsonFileStore, DEFAULT_FILE_NAME};
pub use memory::MemoryStore;
pub use tablepos_core::PersistenceAdapter;
