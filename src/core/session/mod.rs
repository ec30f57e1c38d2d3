//! Note Session Facade
//!
//! Top-level coordination point between the bookmark repository and the
//! player lifecycle controller. Reacts to a video id change by resetting the
//! active bookmark view, and composes repository operations with player
//! commands for user actions ("capture now", "jump to bookmark").

use std::sync::Arc;

use tracing::info;

use crate::core::bookmarks::{display_order, Bookmark, BookmarkRepository};
use crate::core::player::{PlaybackProvider, PlayerController};
use crate::core::storage::KeyedStore;
use crate::core::{BookmarkId, CoreError, CoreResult, TimeSec, VideoId};

/// Facade over the repository and player controller for one watching session.
pub struct NoteSession {
    repository: BookmarkRepository,
    controller: PlayerController,
    active_video: Option<VideoId>,
    view: Vec<Bookmark>,
}

impl NoteSession {
    pub fn new(repository: BookmarkRepository, controller: PlayerController) -> Self {
        Self {
            repository,
            controller,
            active_video: None,
            view: Vec::new(),
        }
    }

    /// Convenience constructor wiring a repository onto `store` and a
    /// controller onto `provider`.
    pub fn with_store(store: KeyedStore, provider: Arc<dyn PlaybackProvider>) -> Self {
        Self::new(
            BookmarkRepository::new(store),
            PlayerController::new(provider),
        )
    }

    /// Returns the active video id, if a video is loaded.
    pub fn active_video(&self) -> Option<&VideoId> {
        self.active_video.as_ref()
    }

    /// The active video's bookmarks in display order (ascending time).
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.view
    }

    /// Whether capture/jump controls should be enabled.
    pub async fn player_ready(&self) -> bool {
        self.controller.is_ready().await
    }

    /// Loads a video and switches the bookmark view to its collection.
    ///
    /// Submitting the already active id is a no-op.
    pub async fn load_video(&mut self, video_id: &VideoId) -> CoreResult<()> {
        if self.active_video.as_ref() == Some(video_id) {
            return Ok(());
        }

        self.controller.load_video(video_id).await?;
        self.active_video = Some(video_id.clone());
        self.refresh_view();
        info!(%video_id, "Video loaded");
        Ok(())
    }

    /// Captures a bookmark at the current playback position.
    ///
    /// Valid only while the player is ready; the created bookmark has an
    /// empty note for the user to fill in.
    pub async fn capture_bookmark(&mut self) -> CoreResult<Bookmark> {
        let video_id = self.active_video.clone().ok_or(CoreError::NoVideoLoaded)?;
        let time = self.controller.current_time().await?;
        let bookmark = self.repository.add(&video_id, time)?;
        self.refresh_view();
        Ok(bookmark)
    }

    /// Jumps playback to a bookmark's position and resumes playing.
    pub async fn jump_to(&self, time: TimeSec) -> CoreResult<()> {
        self.controller.seek_to(time).await
    }

    /// Replaces a bookmark's note. Missing ids are a silent no-op.
    pub fn rename_note(&mut self, bookmark_id: &BookmarkId, note: &str) -> CoreResult<()> {
        let video_id = self.active_video.clone().ok_or(CoreError::NoVideoLoaded)?;
        self.repository.update_note(&video_id, bookmark_id, note);
        self.refresh_view();
        Ok(())
    }

    /// Deletes a bookmark. Missing ids are a silent no-op.
    pub fn remove_bookmark(&mut self, bookmark_id: &BookmarkId) -> CoreResult<()> {
        let video_id = self.active_video.clone().ok_or(CoreError::NoVideoLoaded)?;
        self.repository.delete(&video_id, bookmark_id);
        self.refresh_view();
        Ok(())
    }

    /// Lists any video's bookmarks in display order, without switching the
    /// active view.
    pub fn list(&self, video_id: &VideoId) -> Vec<Bookmark> {
        display_order(&self.repository.list(video_id))
    }

    /// Tears down the player session when the hosting view unmounts.
    pub async fn close(&mut self) -> CoreResult<()> {
        self.controller.destroy().await?;
        self.active_video = None;
        self.view.clear();
        Ok(())
    }

    fn refresh_view(&mut self) {
        self.view = match &self.active_video {
            Some(video_id) => display_order(&self.repository.list(video_id)),
            None => Vec::new(),
        };
    }
}
