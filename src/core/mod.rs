//! Reelmarks Core Engine
//!
//! Core bookmark engine module.
//! Handles persistent storage, the per-video bookmark repository, the
//! external player lifecycle, and the session facade that ties them together.

pub mod bookmarks;
pub mod player;
pub mod prefs;
pub mod session;
pub mod storage;
pub mod video;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
