//! Errors raised at the edges of the simulation (storage, configuration)
//!
//! The tick functions themselves never fail; invalid states are prevented by
//! clamping and epsilon guards instead.

use thiserror::Error;

/// Result type for fallible setup and persistence operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Key-value storage was unavailable or rejected a write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A tuning file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or supplied JSON could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A balance table entry violates its constraints.
    #[error("invalid tuning for {kind}: {reason}")]
    InvalidTuning { kind: String, reason: String },
}
