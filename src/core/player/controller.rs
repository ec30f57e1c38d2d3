//! Player Lifecycle Controller
//!
//! Drives the external player through its initialization state machine:
//!
//! ```text
//! Uninitialized -> ScriptLoading -> ScriptReady -> PlayerCreating -> PlayerReady
//!                                        ^                               |
//!                                        +--------- (new video id) ------+
//! any state -> Destroyed
//! ```
//!
//! The script loads at most once per process; superseding the active video
//! goes straight back through `PlayerCreating`. Commands (`seek_to`,
//! `current_time`) are valid only in `PlayerReady` and fail with
//! [`CoreError::NotReady`] otherwise, without touching the collaborator.

use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use crate::core::{CoreError, CoreResult, TimeSec, VideoId};

use super::{PlaybackProvider, PlayerInstance};

/// Lifecycle states of the external player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No initialization attempted yet
    Uninitialized,
    /// Waiting for the external playback script's readiness signal
    ScriptLoading,
    /// Script loaded; no player instance yet
    ScriptReady,
    /// Waiting for a new player instance's ready callback
    PlayerCreating,
    /// Live instance available; commands are valid
    PlayerReady,
    /// Hosting view unmounted; all external resources released
    Destroyed,
}

struct ControllerInner {
    state: PlayerState,
    instance: Option<Box<dyn PlayerInstance>>,
    active_video: Option<VideoId>,
    /// Bumped whenever a session is superseded or the controller is
    /// destroyed, so a creation that resolves late knows it lost.
    generation: u64,
}

/// Owns the single live player session and its lifecycle.
pub struct PlayerController {
    provider: Arc<dyn PlaybackProvider>,
    script: OnceCell<()>,
    inner: Mutex<ControllerInner>,
}

impl PlayerController {
    pub fn new(provider: Arc<dyn PlaybackProvider>) -> Self {
        Self {
            provider,
            script: OnceCell::new(),
            inner: Mutex::new(ControllerInner {
                state: PlayerState::Uninitialized,
                instance: None,
                active_video: None,
                generation: 0,
            }),
        }
    }

    /// Returns the current lifecycle state.
    pub async fn state(&self) -> PlayerState {
        self.inner.lock().await.state
    }

    /// Returns the video id of the active session, if any.
    pub async fn active_video(&self) -> Option<VideoId> {
        self.inner.lock().await.active_video.clone()
    }

    /// Whether commands are currently valid. UI layers gate controls on this.
    pub async fn is_ready(&self) -> bool {
        self.state().await == PlayerState::PlayerReady
    }

    /// Creates (or recreates) the player session for `video_id`.
    ///
    /// Idempotent for the active video: re-submitting the id of an already
    /// ready session is a no-op with no new `PlayerCreating` transition.
    /// If a different id arrives while a creation is in flight, the in-flight
    /// creation is allowed to resolve and its instance is destroyed
    /// immediately, so the external resource never leaks.
    pub async fn load_video(&self, video_id: &VideoId) -> CoreResult<()> {
        {
            let inner = self.inner.lock().await;
            if inner.state == PlayerState::Destroyed {
                return Err(CoreError::NotReady {
                    state: PlayerState::Destroyed,
                });
            }
            if inner.state == PlayerState::PlayerReady
                && inner.active_video.as_deref() == Some(video_id.as_str())
            {
                debug!(%video_id, "Video already loaded, skipping player recreation");
                return Ok(());
            }
        }

        self.bootstrap_script().await?;

        // Supersede the current session and claim a new generation.
        let (my_generation, old_instance) = {
            let mut inner = self.inner.lock().await;
            if inner.state == PlayerState::Destroyed {
                return Err(CoreError::NotReady {
                    state: PlayerState::Destroyed,
                });
            }
            inner.generation += 1;
            inner.state = PlayerState::PlayerCreating;
            inner.active_video = Some(video_id.clone());
            (inner.generation, inner.instance.take())
        };

        if let Some(old) = old_instance {
            if let Err(e) = old.destroy().await {
                warn!("Failed to destroy superseded player instance: {}", e);
            }
        }

        // Lock released across the await so a later submission can supersede us.
        match self.provider.create_player(video_id).await {
            Ok(created) => {
                let mut inner = self.inner.lock().await;
                if inner.generation != my_generation || inner.state == PlayerState::Destroyed {
                    drop(inner);
                    debug!(%video_id, "Player creation superseded, destroying instance");
                    if let Err(e) = created.destroy().await {
                        warn!("Failed to destroy superseded player instance: {}", e);
                    }
                    return Ok(());
                }
                inner.instance = Some(created);
                inner.state = PlayerState::PlayerReady;
                info!(%video_id, "Player ready");
                Ok(())
            }
            Err(e) => {
                let mut inner = self.inner.lock().await;
                if inner.generation == my_generation && inner.state == PlayerState::PlayerCreating {
                    inner.state = PlayerState::ScriptReady;
                    inner.active_video = None;
                }
                Err(e)
            }
        }
    }

    /// Seeks to `time` and resumes playback.
    ///
    /// Seek-and-play is one compound command: jumping to a bookmark always
    /// starts playback, even if the player was paused.
    pub async fn seek_to(&self, time: TimeSec) -> CoreResult<()> {
        let inner = self.inner.lock().await;
        let instance = Self::ready_instance(&inner)?;
        instance.seek_to(time, true).await?;
        instance.play().await?;
        Ok(())
    }

    /// Returns the current playback position of the live instance.
    pub async fn current_time(&self) -> CoreResult<TimeSec> {
        let inner = self.inner.lock().await;
        let instance = Self::ready_instance(&inner)?;
        instance.current_time().await
    }

    /// Tears down the controller when the hosting view unmounts.
    ///
    /// Releases the live instance if one exists. Idempotent; any creation
    /// still in flight destroys its instance on resolution.
    pub async fn destroy(&self) -> CoreResult<()> {
        let instance = {
            let mut inner = self.inner.lock().await;
            inner.state = PlayerState::Destroyed;
            inner.generation += 1;
            inner.active_video = None;
            inner.instance.take()
        };
        if let Some(instance) = instance {
            instance.destroy().await?;
        }
        Ok(())
    }

    /// Loads the external script exactly once per process.
    async fn bootstrap_script(&self) -> CoreResult<()> {
        if self.script.initialized() {
            return Ok(());
        }

        let result = self
            .script
            .get_or_try_init(|| async {
                {
                    let mut inner = self.inner.lock().await;
                    inner.state = PlayerState::ScriptLoading;
                }
                self.provider.ensure_script().await?;
                {
                    let mut inner = self.inner.lock().await;
                    if inner.state == PlayerState::ScriptLoading {
                        inner.state = PlayerState::ScriptReady;
                    }
                }
                Ok::<(), CoreError>(())
            })
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let mut inner = self.inner.lock().await;
                if inner.state == PlayerState::ScriptLoading {
                    inner.state = PlayerState::Uninitialized;
                }
                Err(e)
            }
        }
    }

    fn ready_instance(inner: &ControllerInner) -> CoreResult<&dyn PlayerInstance> {
        if inner.state != PlayerState::PlayerReady {
            return Err(CoreError::NotReady { state: inner.state });
        }
        inner
            .instance
            .as_deref()
            .ok_or_else(|| CoreError::Internal("Ready state without live instance".to_string()))
    }
}
