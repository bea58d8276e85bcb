//! Error types for policy rejections and configuration loading.
//!
//! The simulation itself is total: invalid coordinates are answered with
//! `false`/`None`, never with an error. Only the strict toggle policy and
//! configuration produce `LifeError`.

use thiserror::Error;

/// Errors that can occur around the life engine.
#[derive(Error, Debug)]
pub enum LifeError {
    /// A mutation targeted a cell outside the grid under the strict policy.
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for `LifeConfig`.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for life engine operations.
pub type LifeResult<T> = Result<T, LifeError>;
