//! # TablePOS Console
//!
//! A terminal host for the TablePOS core: reads UI and gesture events as
//! JSON lines on stdin and prints the floor view, toasts and bills on
//! stdout. Logs go to stderr.
//!
//! ## Module Organization
//! ```text
//! tablepos_console/
//! ├── lib.rs          ◄─── You are here (logging, startup, run)
//! ├── config.rs       ◄─── tablepos.toml + TABLEPOS_* overrides
//! ├── error.rs        ◄─── ConsoleError
//! ├── input.rs        ◄─── Stdin JSON commands → Intent
//! ├── layout.rs       ◄─── Table grid geometry (hit testing, scrolling)
//! ├── presenter.rs    ◄─── Text rendering of floor, order and bill
//! ├── shell.rs        ◄─── The select! loop and effect execution
//! └── toast.rs        ◄─── Single auto-dismissing notification
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod presenter;
pub mod shell;
pub mod toast;

use tablepos_core::PosEngine;
use tablepos_store::JsonFileStore;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ConsoleConfig;
use error::ConsoleResult;
use shell::Shell;

/// Runs the console until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber on stderr, RUST_LOG overrides                  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • tablepos.toml, then TABLEPOS_* variables, else defaults           │
/// │                                                                         │
/// │  3. Open the Order File ──────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/tablepos/restaurant_orders.json             │
/// │     • Missing or corrupt file means no saved orders                     │
/// │                                                                         │
/// │  4. Event Loop ───────────────────────────────────────────────────────► │
/// │     • Current-thread runtime, one select! loop                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Failures are logged; the process always exits normally.
pub fn run() {
    init_tracing();

    info!("Starting TablePOS console");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(?e, "Failed to start runtime");
            return;
        }
    };

    if let Err(e) = runtime.block_on(serve(ConsoleConfig::load_or_default(None))) {
        error!("Console stopped: {}", e);
    }
}

async fn serve(config: ConsoleConfig) -> ConsoleResult<()> {
    let data_path = config.data_path();
    info!(?data_path, "Order file location");

    let store = JsonFileStore::new(data_path);
    let engine = PosEngine::standard(config.drag)?;

    let mut shell = Shell::new(engine, store, config, tokio::io::stdout());
    shell.start().await?;
    shell.run(BufReader::new(tokio::io::stdin())).await
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=trace` - Every gesture event
/// - `RUST_LOG=tablepos_core=debug` - Core decisions only
/// - Default: INFO, DEBUG for the TablePOS crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tablepos=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
