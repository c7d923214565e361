//! # TablePOS Console Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load `tablepos.toml` and `TABLEPOS_*` overrides
//! 3. Restore saved orders
//! 4. Read JSON events from stdin until end of input

fn main() {
    // The setup lives in lib.rs so the shell can be driven from tests.
    tablepos_console::run();
}
