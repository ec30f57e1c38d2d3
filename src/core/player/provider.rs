//! Playback Provider Traits
//!
//! Narrow capability surface over the external playback component. Any
//! provider exposing this shape (script bootstrap, per-video instance
//! creation, seek/play/time/destroy on the instance) is substitutable.

use async_trait::async_trait;

use crate::core::{CoreResult, TimeSec, VideoId};

/// Trait for playback providers (YouTube iframe API, test doubles, etc.)
#[async_trait]
pub trait PlaybackProvider: Send + Sync {
    /// Loads the external playback script.
    ///
    /// Resolves on the script's own readiness signal. The controller calls
    /// this at most once per process; the script is shared by all player
    /// instances created afterwards.
    async fn ensure_script(&self) -> CoreResult<()>;

    /// Constructs a player for the given video.
    ///
    /// Resolves on the new instance's own ready callback, which delivers the
    /// live handle used for subsequent commands.
    async fn create_player(&self, video_id: &VideoId) -> CoreResult<Box<dyn PlayerInstance>>;
}

/// A live external player instance for one video.
///
/// Exclusively owned by the lifecycle controller; nothing else holds a
/// long-lived reference to the handle.
#[async_trait]
pub trait PlayerInstance: Send + Sync {
    /// Seeks to the given playback position.
    async fn seek_to(&self, time: TimeSec, allow_seek_ahead: bool) -> CoreResult<()>;

    /// Starts or resumes playback.
    async fn play(&self) -> CoreResult<()>;

    /// Returns the current playback position.
    async fn current_time(&self) -> CoreResult<TimeSec>;

    /// Releases the external resources held by this instance.
    async fn destroy(&self) -> CoreResult<()>;
}
