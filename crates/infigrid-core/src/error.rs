//! Error types for infigrid.

use thiserror::Error;

/// The main error type for infigrid operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// The plane selector does not name one of the supported planes.
    #[error("unsupported grid plane index {0} (expected 0 = XZ, 1 = XY or 2 = ZY)")]
    UnsupportedPlane(u32),

    /// A configuration value could not be accepted.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for infigrid operations.
pub type Result<T> = std::result::Result<T, GridError>;
