//! # Console Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TABLEPOS_DATA_PATH=/srv/pos/orders.json                            │
//! │     TABLEPOS_RESTAURANT_NAME="Spice Route"                             │
//! │     TABLEPOS_CURRENCY_SYMBOL=Rs.                                       │
//! │     TABLEPOS_HOLD_DELAY_MS=500                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tablepos/tablepos.toml (Linux)                           │
//! │     ~/Library/Application Support/com.tablepos.pos/tablepos.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [restaurant]
//! name = "Spice Route"
//! address_lines = ["12 MG Road", "Bengaluru 560001"]
//! currency_symbol = "₹"
//!
//! [storage]
//! data_path = "/srv/pos/restaurant_orders.json"
//!
//! [ui]
//! toast_secs = 3
//! show_clock = false
//!
//! [drag]
//! hold_delay_ms = 400
//! jitter_px = 10.0
//! ```
//!
//! The tax rate is fixed at 5% and has no setting.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tablepos_core::drag::DragConfig;
use tablepos_core::Money;
use tablepos_store::DEFAULT_FILE_NAME;
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, ConsoleResult};

// =============================================================================
// Restaurant
// =============================================================================

/// What goes on the receipt header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantConfig {
    #[serde(default = "default_restaurant_name")]
    pub name: String,

    #[serde(default = "default_address_lines")]
    pub address_lines: Vec<String>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_restaurant_name() -> String {
    "TablePOS Restaurant".to_string()
}

fn default_address_lines() -> Vec<String> {
    vec!["Thank you for dining with us".to_string()]
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        RestaurantConfig {
            name: default_restaurant_name(),
            address_lines: default_address_lines(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Storage
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Order file location. Defaults to the platform data directory.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

// =============================================================================
// UI
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays up.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,

    /// Print the clock line every second.
    #[serde(default)]
    pub show_clock: bool,
}

fn default_toast_secs() -> u64 {
    3
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            toast_secs: default_toast_secs(),
            show_clock: false,
        }
    }
}

// =============================================================================
// Main Console Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub restaurant: RestaurantConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// Gesture tuning passed straight to the drag controller.
    #[serde(default)]
    pub drag: DragConfig,
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tablepos.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConsoleResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load console config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        if self.restaurant.name.trim().is_empty() {
            return Err(ConsoleError::config("restaurant name is required"));
        }

        if self.ui.toast_secs == 0 {
            return Err(ConsoleError::config("toast_secs must be greater than 0"));
        }

        let drag = &self.drag;
        if drag.hold_delay_ms == 0 || drag.scroll_interval_ms == 0 {
            return Err(ConsoleError::config(
                "hold_delay_ms and scroll_interval_ms must be greater than 0",
            ));
        }

        let lengths = [drag.jitter_px, drag.edge_band_px, drag.scroll_step_px];
        if lengths.iter().any(|px| !px.is_finite() || *px < 0.0) {
            return Err(ConsoleError::config(
                "drag distances must be finite and non-negative",
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TABLEPOS_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.storage.data_path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("TABLEPOS_RESTAURANT_NAME") {
            self.restaurant.name = name;
        }

        if let Some(symbol) = var("TABLEPOS_CURRENCY_SYMBOL") {
            self.restaurant.currency_symbol = symbol;
        }

        if let Some(delay) = var("TABLEPOS_HOLD_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding hold delay from environment");
                    self.drag.hold_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring non-numeric TABLEPOS_HOLD_DELAY_MS"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tablepos", "pos")
            .map(|dirs| dirs.config_dir().join("tablepos.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Where orders are saved: the configured path, else the platform
    /// data directory, else the working directory.
    pub fn data_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.data_path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "tablepos", "pos")
            .map(|dirs| dirs.data_dir().join(DEFAULT_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }

    /// Formats an amount with the currency symbol, rounded to 2 places.
    ///
    /// ```rust
    /// use tablepos_console::config::ConsoleConfig;
    /// use tablepos_core::Money;
    ///
    /// let config = ConsoleConfig::default();
    /// assert_eq!(config.format_currency(Money::new(367.5)), "₹367.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let value = amount.amount();
        format!(
            "{}{}{}",
            if value < 0.0 { "-" } else { "" },
            self.restaurant.currency_symbol,
            Money::new(value.abs())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.ui.toast_secs, 3);
        assert_eq!(config.drag.hold_delay_ms, 400);
        assert_eq!(config.restaurant.currency_symbol, "₹");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            [restaurant]
            name = "Spice Route"

            [drag]
            hold_delay_ms = 550
            "#,
        )
        .unwrap();

        assert_eq!(config.restaurant.name, "Spice Route");
        assert_eq!(config.restaurant.currency_symbol, "₹");
        assert_eq!(config.drag.hold_delay_ms, 550);
        assert_eq!(config.drag.jitter_px, 10.0);
        assert_eq!(config.ui.toast_secs, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablepos.toml");
        std::fs::write(&path, "[ui]\ntoast_secs = 5\n").unwrap();

        let config = ConsoleConfig::load(Some(path)).unwrap();
        assert_eq!(config.ui.toast_secs, 5);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tablepos.toml");
        std::fs::write(&path, "[ui]\ntoast_secs = 0\n").unwrap();

        assert!(matches!(
            ConsoleConfig::load(Some(path.clone())),
            Err(ConsoleError::Config(_))
        ));
        assert_eq!(ConsoleConfig::load_or_default(Some(path)).ui.toast_secs, 3);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConsoleConfig::default();
        config.apply_overrides_from(env(&[
            ("TABLEPOS_DATA_PATH", "/tmp/orders.json"),
            ("TABLEPOS_RESTAURANT_NAME", "Spice Route"),
            ("TABLEPOS_CURRENCY_SYMBOL", "Rs."),
            ("TABLEPOS_HOLD_DELAY_MS", "600"),
        ]));

        assert_eq!(config.data_path(), PathBuf::from("/tmp/orders.json"));
        assert_eq!(config.restaurant.name, "Spice Route");
        assert_eq!(config.format_currency(Money::new(35.0)), "Rs.35.00");
        assert_eq!(config.drag.hold_delay_ms, 600);
    }

    #[test]
    fn test_bad_numeric_override_is_ignored() {
        let mut config = ConsoleConfig::default();
        config.apply_overrides_from(env(&[("TABLEPOS_HOLD_DELAY_MS", "soon")]));
        assert_eq!(config.drag.hold_delay_ms, 400);
    }

    #[test]
    fn test_validation() {
        let mut config = ConsoleConfig::default();
        config.restaurant.name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.drag.jitter_px = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.drag.hold_delay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = ConsoleConfig::default();
        assert_eq!(config.format_currency(Money::new(735.0)), "₹735.00");
        assert_eq!(config.format_currency(Money::new(36.745)), "₹36.75");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
        assert_eq!(config.format_currency(Money::new(-12.5)), "-₹12.50");
    }
}
