//! Bookmark Repository
//!
//! Maps video ids to their bookmark collections, backed by a [`KeyedStore`]
//! entry. The whole store is loaded once at construction and persisted after
//! every mutation, so repository state and persisted state are never
//! observably divergent from the caller's perspective.
//!
//! A failed persistence write is logged and absorbed: the in-memory store
//! stays authoritative for the session and the next successful write
//! reconciles the file.

use tracing::{debug, warn};

use crate::core::storage::KeyedStore;
use crate::core::{BookmarkId, CoreError, CoreResult, TimeSec, VideoId};

use super::{Bookmark, BookmarksStore};

/// Storage key holding the entire bookmarks store.
pub const BOOKMARKS_STORE_KEY: &str = "bookmarks";

/// Repository over per-video bookmark collections.
pub struct BookmarkRepository {
    store: KeyedStore,
    bookmarks: BookmarksStore,
}

impl BookmarkRepository {
    /// Creates a repository, loading any persisted bookmarks from the store.
    pub fn new(store: KeyedStore) -> Self {
        let bookmarks = store.read(BOOKMARKS_STORE_KEY, BookmarksStore::new());
        Self { store, bookmarks }
    }

    /// Returns the bookmarks for a video in persisted (insertion) order.
    ///
    /// Unknown video ids yield an empty list. Callers sort for presentation;
    /// see [`super::display_order`].
    pub fn list(&self, video_id: &VideoId) -> Vec<Bookmark> {
        self.bookmarks.get(video_id).cloned().unwrap_or_default()
    }

    /// Captures a new bookmark at the given playback position.
    ///
    /// `time` must be finite and non-negative; otherwise the operation fails
    /// with [`CoreError::InvalidTime`] and nothing is mutated.
    pub fn add(&mut self, video_id: &VideoId, time: TimeSec) -> CoreResult<Bookmark> {
        if !time.is_finite() || time < 0.0 {
            return Err(CoreError::InvalidTime(time));
        }

        let bookmark = Bookmark::new(time);
        self.bookmarks
            .entry(video_id.clone())
            .or_default()
            .push(bookmark.clone());

        debug!(%video_id, time, "Bookmark added");
        self.persist();
        Ok(bookmark)
    }

    /// Replaces the note of an existing bookmark.
    ///
    /// A missing bookmark id is a silent no-op: the bookmark may have been
    /// deleted concurrently, and callers must not assume success.
    pub fn update_note(&mut self, video_id: &VideoId, bookmark_id: &BookmarkId, note: &str) {
        let Some(collection) = self.bookmarks.get_mut(video_id) else {
            return;
        };
        let Some(bookmark) = collection.iter_mut().find(|b| &b.id == bookmark_id) else {
            return;
        };

        bookmark.note = note.to_string();
        self.persist();
    }

    /// Removes a bookmark. A missing id is a silent no-op with no write.
    pub fn delete(&mut self, video_id: &VideoId, bookmark_id: &BookmarkId) {
        let Some(collection) = self.bookmarks.get_mut(video_id) else {
            return;
        };
        let before = collection.len();
        collection.retain(|b| &b.id != bookmark_id);

        if collection.len() != before {
            debug!(%video_id, %bookmark_id, "Bookmark deleted");
            self.persist();
        }
    }

    /// Writes the entire store. Failures are non-fatal: the in-memory copy
    /// stays authoritative and the next successful write reconciles.
    fn persist(&self) {
        if let Err(e) = self.store.write(BOOKMARKS_STORE_KEY, &self.bookmarks) {
            warn!("Failed to persist bookmarks, keeping in-memory state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repository() -> (TempDir, BookmarkRepository) {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyedStore::new(temp_dir.path().to_path_buf());
        let repository = BookmarkRepository::new(store);
        (temp_dir, repository)
    }

    fn persisted_store(temp_dir: &TempDir) -> BookmarksStore {
        let store = KeyedStore::new(temp_dir.path().to_path_buf());
        store.read(BOOKMARKS_STORE_KEY, BookmarksStore::new())
    }

    // -------------------------------------------------------------------------
    // Add and List
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_unknown_video_is_empty() {
        let (_temp_dir, repository) = create_test_repository();
        assert!(repository.list(&"unknown".to_string()).is_empty());
    }

    #[test]
    fn test_add_creates_bookmark_with_empty_note() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let before = repository.list(&video_id).len();
        let bookmark = repository.add(&video_id, 42.5).unwrap();

        let listed = repository.list(&video_id);
        assert_eq!(listed.len(), before + 1);
        assert_eq!(bookmark.time, 42.5);
        assert!(bookmark.note.is_empty());
        assert_eq!(listed.last().unwrap().id, bookmark.id);
    }

    #[test]
    fn test_add_rejects_negative_time() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let result = repository.add(&video_id, -1.0);
        assert!(matches!(result, Err(CoreError::InvalidTime(_))));
        assert!(repository.list(&video_id).is_empty());
    }

    #[test]
    fn test_add_rejects_nan_and_infinity() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        assert!(matches!(
            repository.add(&video_id, f64::NAN),
            Err(CoreError::InvalidTime(_))
        ));
        assert!(matches!(
            repository.add(&video_id, f64::INFINITY),
            Err(CoreError::InvalidTime(_))
        ));
        assert!(repository.list(&video_id).is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        repository.add(&video_id, 30.0).unwrap();
        repository.add(&video_id, 5.0).unwrap();
        repository.add(&video_id, 12.0).unwrap();

        let times: Vec<TimeSec> = repository.list(&video_id).iter().map(|b| b.time).collect();
        assert_eq!(times, vec![30.0, 5.0, 12.0]);
    }

    // -------------------------------------------------------------------------
    // Update Note
    // -------------------------------------------------------------------------

    #[test]
    fn test_update_note() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let bookmark = repository.add(&video_id, 10.0).unwrap();
        repository.update_note(&video_id, &bookmark.id, "intro ends");

        let listed = repository.list(&video_id);
        assert_eq!(listed[0].note, "intro ends");
        assert_eq!(listed[0].time, 10.0);
    }

    #[test]
    fn test_update_note_missing_id_is_noop() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        repository.add(&video_id, 10.0).unwrap();
        repository.update_note(&video_id, &"nonexistent".to_string(), "note");

        assert!(repository.list(&video_id)[0].note.is_empty());
    }

    #[test]
    fn test_update_note_unknown_video_is_noop() {
        let (_temp_dir, mut repository) = create_test_repository();
        repository.update_note(&"ghost".to_string(), &"id".to_string(), "note");
        assert!(repository.list(&"ghost".to_string()).is_empty());
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    #[test]
    fn test_delete() {
        let (_temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let keep = repository.add(&video_id, 5.0).unwrap();
        let remove = repository.add(&video_id, 10.0).unwrap();

        repository.delete(&video_id, &remove.id);

        let listed = repository.list(&video_id);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        repository.add(&video_id, 5.0).unwrap();
        let snapshot = persisted_store(&temp_dir);

        repository.delete(&video_id, &"nonexistent".to_string());

        assert_eq!(repository.list(&video_id).len(), 1);
        assert_eq!(persisted_store(&temp_dir), snapshot);
    }

    #[test]
    fn test_delete_last_bookmark_keeps_video_key() {
        let (temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let bookmark = repository.add(&video_id, 5.0).unwrap();
        repository.delete(&video_id, &bookmark.id);

        // Empty collection is a valid persisted state, not "no key".
        let persisted = persisted_store(&temp_dir);
        assert_eq!(persisted.get(&video_id), Some(&vec![]));
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[test]
    fn test_every_mutation_is_persisted() {
        let (temp_dir, mut repository) = create_test_repository();
        let video_id = "abc123".to_string();

        let bookmark = repository.add(&video_id, 42.5).unwrap();
        assert_eq!(persisted_store(&temp_dir), repository.bookmarks);

        repository.update_note(&video_id, &bookmark.id, "note");
        assert_eq!(persisted_store(&temp_dir), repository.bookmarks);

        repository.delete(&video_id, &bookmark.id);
        assert_eq!(persisted_store(&temp_dir), repository.bookmarks);
    }

    #[test]
    fn test_repository_reloads_persisted_state() {
        let temp_dir = TempDir::new().unwrap();
        let video_id = "abc123".to_string();

        let bookmark = {
            let store = KeyedStore::new(temp_dir.path().to_path_buf());
            let mut repository = BookmarkRepository::new(store);
            repository.add(&video_id, 42.5).unwrap()
        };

        let store = KeyedStore::new(temp_dir.path().to_path_buf());
        let repository = BookmarkRepository::new(store);

        let listed = repository.list(&video_id);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], bookmark);
    }

    #[test]
    fn test_videos_are_isolated() {
        let (_temp_dir, mut repository) = create_test_repository();

        repository.add(&"abc123".to_string(), 42.5).unwrap();

        assert_eq!(repository.list(&"abc123".to_string()).len(), 1);
        assert!(repository.list(&"xyz789".to_string()).is_empty());
    }
}
