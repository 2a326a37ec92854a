//! # Register Error Type
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CoreError ──────────┐                                                  │
//! │  std::io::Error ─────┤                                                  │
//! │  toml::de::Error ────┼──► AppError ──► "error: ..." on stderr, exit 1   │
//! │  serde_json::Error ──┤                                                  │
//! │  InvalidConfig/Usage ┘                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use nexus_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the register binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad command line.
    #[error("{0}")]
    Usage(String),

    /// Configuration loaded but makes no sense.
    #[error("Invalid register configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::RegisterConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Receipt could not be encoded as JSON.
    #[error("Failed to encode receipt: {0}")]
    Json(#[from] serde_json::Error),

    /// The sale itself failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for register operations.
pub type AppResult<T> = Result<T, AppError>;
