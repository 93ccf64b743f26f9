//! Feedback Trigger
//!
//! Owns the click cue. The sound is loaded once when the screen mounts and
//! replayed from the start on every trigger; replays may overlap. Triggers
//! that arrive before the sound is ready, after it failed to load, or after it
//! was released are dropped with a log line and never reach the caller as an
//! error.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;

use crate::capabilities::{AssetSource, AudioPlayer, SoundHandle};
use crate::error::AudioError;
use crate::screen::Completion;

/// Lifecycle of the held sound
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundSlot {
    /// `preload()` not called yet
    Unloaded,
    /// Load in flight
    Loading,
    /// Loaded and replayable
    Ready(SoundHandle),
    /// Load failed; triggers are silent
    Failed,
    /// Released on unmount
    Released,
}

/// Preloads and replays the feedback cue
pub struct FeedbackTrigger {
    audio: Arc<dyn AudioPlayer>,
    source: AssetSource,
    slot: SoundSlot,
    replays: u64,
}

impl FeedbackTrigger {
    /// Create a trigger for `source`
    pub fn new(audio: Arc<dyn AudioPlayer>, source: AssetSource) -> Self {
        Self {
            audio,
            source,
            slot: SoundSlot::Unloaded,
            replays: 0,
        }
    }

    /// Current slot
    #[must_use]
    pub fn slot(&self) -> &SoundSlot {
        &self.slot
    }

    /// Whether a trigger right now would play
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.slot, SoundSlot::Ready(_))
    }

    /// Replays started so far
    #[must_use]
    pub fn replay_count(&self) -> u64 {
        self.replays
    }

    /// Start loading the cue
    ///
    /// Only the first call does anything. The result arrives on `completions`
    /// as [`Completion::SoundLoaded`]. If the screen has stopped listening by
    /// then, the freshly loaded sound is unloaded here instead of leaking.
    pub fn preload(&mut self, completions: &mpsc::Sender<Completion>) -> bool {
        if self.slot != SoundSlot::Unloaded {
            tracing::debug!(slot = ?self.slot, "Feedback cue already preloaded");
            return false;
        }
        self.slot = SoundSlot::Loading;

        let audio = Arc::clone(&self.audio);
        let source = self.source.clone();
        let tx = completions.clone();

        tokio::spawn(async move {
            let result = audio.load(&source).await;
            if let Err(SendError(Completion::SoundLoaded(Ok(handle)))) =
                tx.send(Completion::SoundLoaded(result)).await
            {
                tracing::debug!(handle = %handle.id, "Sound loaded after unmount, releasing");
                if let Err(e) = audio.unload(&handle).await {
                    tracing::warn!(error = %e, "Failed to release late sound");
                }
            }
        });

        true
    }

    /// Apply a finished load
    ///
    /// A load that lands after [`release`](Self::release) is unloaded right
    /// away so the resource is still released exactly once.
    pub async fn on_loaded(&mut self, result: Result<SoundHandle, AudioError>) {
        let loading = self.slot == SoundSlot::Loading;
        let released = self.slot == SoundSlot::Released;

        match result {
            Ok(handle) if loading => {
                tracing::debug!(handle = %handle.id, "Feedback cue ready");
                self.slot = SoundSlot::Ready(handle);
            }
            Err(e) if loading => {
                tracing::warn!(source = %self.source, error = %e, "Failed to load feedback cue");
                self.slot = SoundSlot::Failed;
            }
            Ok(handle) if released => {
                if let Err(e) = self.audio.unload(&handle).await {
                    tracing::warn!(error = %e, "Failed to release late sound");
                }
            }
            other => {
                tracing::debug!(slot = ?self.slot, ok = other.is_ok(), "Ignoring unexpected sound load");
            }
        }
    }

    /// Play the cue from the start
    ///
    /// Never fails. Returns `true` if a replay was started.
    pub fn trigger(&mut self) -> bool {
        let handle = match &self.slot {
            SoundSlot::Ready(handle) => handle.clone(),
            SoundSlot::Unloaded | SoundSlot::Loading => {
                tracing::warn!(
                    error = %AudioError::NotLoaded,
                    "Error playing sound"
                );
                return false;
            }
            SoundSlot::Failed | SoundSlot::Released => {
                tracing::debug!(slot = ?self.slot, "Feedback cue unavailable");
                return false;
            }
        };

        self.replays += 1;
        let audio = Arc::clone(&self.audio);
        tokio::spawn(async move {
            if let Err(e) = audio.replay(&handle).await {
                tracing::warn!(error = %e, "Error playing sound");
            }
        });
        true
    }

    /// Release the held sound
    ///
    /// Returns `true` if a loaded sound was unloaded by this call. Safe to
    /// call more than once.
    pub async fn release(&mut self) -> bool {
        let previous = std::mem::replace(&mut self.slot, SoundSlot::Released);
        match previous {
            SoundSlot::Ready(handle) => {
                if let Err(e) = self.audio.unload(&handle).await {
                    tracing::warn!(error = %e, "Failed to release feedback cue");
                }
                true
            }
            _ => false,
        }
    }
}
