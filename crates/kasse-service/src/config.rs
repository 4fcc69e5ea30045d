//! # Kasse Configuration
//!
//! Startup settings for the POS core: database location, receipt header,
//! tax and log filter.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KASSE_DB_PATH=/var/lib/kasse/kasse.db                              │
//! │     KASSE_TAX_RATE_BPS=1900                                            │
//! │     KASSE_LOG=debug                                                    │
//! │     KASSE_RESTAURANT_NAME="Zum Goldenen Hirsch"                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kasse/kasse.toml (Linux)                                 │
//! │     ~/Library/Application Support/de.kasse.kasse/kasse.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "kasse.db"
//! tax_rate_bps = 1990
//! tax_label = "incl. VAT"
//! receipt_width = 42
//! log_filter = "info,kasse=debug,sqlx=warn"
//!
//! [restaurant]
//! name = "Restaurante Gaumenfreude"
//! address_lines = ["Gourmetstraße 11", "12345 Leckerschmeckerhausen"]
//! phone = "+49 541 466 655"
//! currency = "EUR"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use kasse_core::{ReceiptSettings, RestaurantInfo, TaxRate};
use kasse_db::DbConfig;

use crate::error::{ServiceError, ServiceResult};

/// Database path that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Narrowest paper the receipt layout still fits on.
pub const MIN_RECEIPT_WIDTH: usize = 24;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "kasse.toml";

fn default_database_path() -> PathBuf {
    PathBuf::from("kasse.db")
}

fn default_tax_rate_bps() -> u32 {
    TaxRate::RECEIPT_DEFAULT.bps()
}

fn default_tax_label() -> String {
    "incl. VAT".to_string()
}

fn default_log_filter() -> String {
    crate::telemetry::DEFAULT_LOG_FILTER.to_string()
}

fn default_receipt_width() -> usize {
    42
}

/// Complete startup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KasseConfig {
    /// SQLite file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Header printed on customer receipts.
    #[serde(default)]
    pub restaurant: RestaurantInfo,

    /// Tax rate shown on customer receipts, in basis points.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    #[serde(default = "default_tax_label")]
    pub tax_label: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Paper width in characters.
    #[serde(default = "default_receipt_width")]
    pub receipt_width: usize,
}

impl Default for KasseConfig {
    fn default() -> Self {
        KasseConfig {
            database_path: default_database_path(),
            restaurant: RestaurantInfo::default(),
            tax_rate_bps: default_tax_rate_bps(),
            tax_label: default_tax_label(),
            log_filter: default_log_filter(),
            receipt_width: default_receipt_width(),
        }
    }
}

impl KasseConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`kasse.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ServiceResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ServiceError::Config("database_path must not be empty".into()));
        }

        if self.tax_rate_bps > 10_000 {
            return Err(ServiceError::Config(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.tax_rate_bps
            )));
        }

        if self.receipt_width < MIN_RECEIPT_WIDTH {
            return Err(ServiceError::Config(format!(
                "receipt_width must be at least {}, got {}",
                MIN_RECEIPT_WIDTH, self.receipt_width
            )));
        }

        if self.restaurant.name.trim().is_empty() {
            return Err(ServiceError::Config("restaurant name must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `KASSE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("KASSE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Some(bps) = lookup("KASSE_TAX_RATE_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(parsed) => self.tax_rate_bps = parsed,
                Err(_) => warn!(value = %bps, "Invalid KASSE_TAX_RATE_BPS, ignoring"),
            }
        }

        if let Some(filter) = lookup("KASSE_LOG") {
            self.log_filter = filter;
        }

        if let Some(name) = lookup("KASSE_RESTAURANT_NAME") {
            self.restaurant.name = name;
        }
    }

    /// `kasse.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("de", "kasse", "kasse")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Settings for the receipt renderer.
    pub fn receipt_settings(&self) -> ReceiptSettings {
        ReceiptSettings {
            restaurant: self.restaurant.clone(),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
            tax_label: self.tax_label.clone(),
            width: self.receipt_width,
        }
    }

    /// Connection settings for the database pool.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path == Path::new(IN_MEMORY_PATH) {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kasse-{}-{}.toml", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = KasseConfig::default();
        assert_eq!(config.tax_rate_bps, 1990);
        assert_eq!(config.receipt_width, 42);
        assert_eq!(config.restaurant.name, "Restaurante Gaumenfreude");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = KasseConfig::default();
        config.apply_overrides(lookup(&[
            ("KASSE_DB_PATH", "/tmp/x.db"),
            ("KASSE_TAX_RATE_BPS", "700"),
            ("KASSE_LOG", "warn"),
            ("KASSE_RESTAURANT_NAME", "Zum Hirsch"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.tax_rate_bps, 700);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.restaurant.name, "Zum Hirsch");
    }

    #[test]
    fn test_bad_override_is_ignored() {
        let mut config = KasseConfig::default();
        config.apply_overrides(lookup(&[("KASSE_TAX_RATE_BPS", "lots")]));
        assert_eq!(config.tax_rate_bps, 1990);
    }

    #[test]
    fn test_validation() {
        let mut config = KasseConfig::default();
        config.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config = KasseConfig::default();
        config.receipt_width = 10;
        assert!(config.validate().is_err());

        config = KasseConfig::default();
        config.restaurant.name = "  ".into();
        assert!(config.validate().is_err());

        config = KasseConfig::default();
        config.database_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_file(
            "partial",
            r#"
tax_rate_bps = 1900

[restaurant]
name = "Trattoria"
"#,
        );

        let config = KasseConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.tax_rate_bps, 1900);
        assert_eq!(config.restaurant.name, "Trattoria");
        assert_eq!(config.restaurant.currency, "EUR");
        assert_eq!(config.receipt_width, 42);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_file("broken", "tax_rate_bps = \"many\"");
        let err = KasseConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("kasse-does-not-exist.toml");
        let config = KasseConfig::load_or_default(Some(path));
        assert_eq!(config.receipt_width, 42);
    }

    #[test]
    fn test_conversions() {
        let mut config = KasseConfig::default();
        config.tax_rate_bps = 700;
        config.receipt_width = 32;

        let settings = config.receipt_settings();
        assert_eq!(settings.tax_rate, TaxRate::from_bps(700));
        assert_eq!(settings.width, 32);
        assert_eq!(settings.tax_label, "incl. VAT");

        config.database_path = PathBuf::from(IN_MEMORY_PATH);
        assert_eq!(config.db_config().max_connections, 1);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&KasseConfig::default()).unwrap();
        assert!(toml_str.contains("[restaurant]"));
        assert!(toml_str.contains("tax_rate_bps = 1990"));
    }
}
