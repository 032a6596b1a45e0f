//! Facet engine error types.
//!
//! Only construction-time APIs return these. Event handling on the
//! controller degrades to defaults instead of failing.

use thiserror::Error;

/// Errors that can occur while building the facet engine.
#[derive(Error, Debug)]
pub enum FacetError {
    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Unknown view mode.
    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),

    /// Unknown control identifier.
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// Rating threshold outside 1..=5.
    #[error("Rating threshold {0} out of range (1-5)")]
    InvalidRatingThreshold(u8),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a configuration file.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse JSON (configuration or product feed).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key-value store error.
    #[error("Cache error: {0}")]
    Cache(#[from] turbo_cache::CacheError),
}
