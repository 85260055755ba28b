//! Error types for the footprint_core library.
//!
//! The calculator itself is total over validated input and never returns
//! these. They cover the layers around it: validation, configuration,
//! factor table checks and the local history files.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for footprint_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lifestyle profile failed range or consistency checks
    #[error("Invalid profile: {0}")]
    Validation(String),

    /// Emission factor table is inconsistent
    #[error("Factor table error: {0}")]
    FactorTable(String),

    /// History log error
    #[error("History error: {0}")]
    History(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
