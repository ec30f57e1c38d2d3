//! Bookmark Data Model
//!
//! A bookmark is a timestamped note captured while watching a video.
//! Collections are keyed by video id; insertion order is the persisted order,
//! while display order (ascending time) is derived on demand.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{BookmarkId, TimeSec, VideoId};

/// A single timestamped note.
///
/// `id` and `time` are fixed at creation; only `note` is mutable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Unique bookmark ID (ULID, ordered by creation time)
    pub id: BookmarkId,
    /// Playback position in seconds at capture time
    pub time: TimeSec,
    /// User note (may be empty)
    #[serde(default)]
    pub note: String,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
}

impl Bookmark {
    /// Creates a bookmark at the given playback position with an empty note.
    pub fn new(time: TimeSec) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            time,
            note: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// All persisted bookmarks, keyed by video id.
///
/// An emptied collection is a valid persisted state; it is not collapsed
/// back to "no key".
pub type BookmarksStore = HashMap<VideoId, Vec<Bookmark>>;

/// Returns bookmarks in display order: ascending by time, ties keeping
/// their original insertion order.
///
/// The sort is derived and never persisted.
pub fn display_order(bookmarks: &[Bookmark]) -> Vec<Bookmark> {
    let mut sorted = bookmarks.to_vec();
    // Stable sort preserves insertion order for equal times. Capture times
    // are validated finite on entry, so the comparison never sees NaN.
    sorted.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
    sorted
}
