//! # Register Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NEXUS_STORE_NAME, NEXUS_SEED_HASH, NEXUS_LOG                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/nexus-pos/register.toml (Linux)                          │
//! │     ~/Library/Application Support/com.nexus.pos/register.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Café Nexus"
//! currency_symbol = "€"
//!
//! [receipt]
//! seed_hash = "0000000000000000"
//!
//! [logging]
//! filter = "info,nexus_core=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use nexus_core::DEFAULT_SEED_HASH;

use crate::error::{AppError, AppResult};

// =============================================================================
// Store
// =============================================================================

/// What gets printed in the receipt header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Printed in front of every amount. Formatting beyond that is not
    /// attempted.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Nexus POS".to_string()
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Receipt Chain
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Hash the first receipt of an empty history chains onto.
    #[serde(default = "default_seed_hash")]
    pub seed_hash: String,
}

fn default_seed_hash() -> String {
    DEFAULT_SEED_HASH.to_string()
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        ReceiptConfig {
            seed_hash: default_seed_hash(),
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` still wins.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,nexus_core=debug,nexus_register=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Register Configuration
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub receipt: ReceiptConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`RegisterConfig::load`], with overrides read through
    /// `lookup` instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => {
                info!(?path, "Loading register config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading register config from default location");
                    Self::from_toml(&std::fs::read_to_string(&path)?)?
                }
                path => {
                    debug!(?path, "No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(AppError::InvalidConfig("store.name must not be empty".into()));
        }

        if self.receipt.seed_hash.is_empty() {
            return Err(AppError::InvalidConfig(
                "receipt.seed_hash must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("NEXUS_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(seed) = lookup("NEXUS_SEED_HASH") {
            debug!(seed_hash = %seed, "Overriding receipt seed hash from environment");
            self.receipt.seed_hash = seed;
        }

        if let Some(filter) = lookup("NEXUS_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nexus", "pos")
            .map(|dirs| dirs.config_dir().join("register.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RegisterConfig::default();
        assert_eq!(config.receipt.seed_hash, "0000000000000000");
        assert_eq!(config.store.name, "Nexus POS");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RegisterConfig::from_toml(
            r#"
            [store]
            name = "Café Nexus"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Café Nexus");
        assert_eq!(config.store.currency_symbol, "€");
        assert_eq!(config.receipt, ReceiptConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = RegisterConfig::from_toml("[store\nname = 1").unwrap_err();
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RegisterConfig::default();

        config.receipt.seed_hash = String::new();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        config.receipt.seed_hash = "ff".to_string();
        config.store.name = "   ".to_string();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config = RegisterConfig::from_toml(
            r#"
            [receipt]
            seed_hash = "aaaa"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [("NEXUS_SEED_HASH", "bbbb"), ("NEXUS_LOG", "warn")]
            .into_iter()
            .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.receipt.seed_hash, "bbbb");
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.store.name, "Nexus POS");
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "nexus-register-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[store]\nname = \"Bahnhof Kiosk\"\n").unwrap();

        let plain = RegisterConfig::load_with(Some(path.clone()), |_| None);
        let overridden = RegisterConfig::load_with(Some(path.clone()), |key| {
            (key == "NEXUS_STORE_NAME").then(|| "Night Shift".to_string())
        });
        std::fs::remove_file(&path).unwrap();

        assert_eq!(plain.unwrap().store.name, "Bahnhof Kiosk");
        assert_eq!(overridden.unwrap().store.name, "Night Shift");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("nexus-register-definitely-missing.toml");
        assert!(matches!(
            RegisterConfig::load_with(Some(path), |_| None),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&RegisterConfig::default()).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[receipt]"));
        assert!(toml_str.contains("seed_hash = \"0000000000000000\""));
    }
}
