//! Error types for terrain editing and height fitting

use thiserror::Error;

/// Main error type for the crate.
///
/// Every variant is recoverable: callers report it and keep their prior state.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("Invalid terrain dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid height field: {0}")]
    InvalidHeightField(String),

    #[error("Invalid terrain config: {0}")]
    InvalidConfig(String),

    #[error("Edit queue full ({capacity} pending edits)")]
    QueueFull { capacity: usize },

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
