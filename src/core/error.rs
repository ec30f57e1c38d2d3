//! Reelmarks Error Definitions
//!
//! Defines error types used throughout the crate.

use thiserror::Error;

use super::TimeSec;
use crate::core::player::PlayerState;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Bookmark Errors
    // =========================================================================
    #[error("Invalid bookmark time: {0} seconds (must be finite and non-negative)")]
    InvalidTime(TimeSec),

    // =========================================================================
    // Player Errors
    // =========================================================================
    #[error("Player not ready (state: {state:?})")]
    NotReady { state: PlayerState },

    #[error("No video loaded")]
    NoVideoLoaded,

    #[error("Playback error: {0}")]
    Playback(String),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    #[error("Persistence write failed: {0}")]
    PersistenceWrite(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
