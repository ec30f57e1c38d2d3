//! Reelmarks Core Type Definitions
//!
//! Defines fundamental types used throughout the crate.

// =============================================================================
// ID Types
// =============================================================================

/// Video unique identifier (opaque string, e.g. a YouTube video id)
pub type VideoId = String;

/// Bookmark unique identifier (ULID)
pub type BookmarkId = String;

// =============================================================================
// Time Types
// =============================================================================

/// Playback time in seconds (floating point)
pub type TimeSec = f64;
