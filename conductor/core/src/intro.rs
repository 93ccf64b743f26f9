//! Intro Sequencer
//!
//! Plays the one-shot intro media and, when it ends, hands the screen over to
//! interactive mode:
//!
//! 1. mark the phase `Interactive`
//! 2. request a portrait orientation lock
//!
//! Step 2 is best-effort and runs detached, so a slow or failing platform lock
//! can never hold back or undo step 1. A media error leaves the intro on
//! screen; only a configured intro timeout moves it along after that.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::capabilities::{AssetSource, MediaPlayer, OrientationLock, PlaybackEvent};
use crate::error::MediaError;
use crate::screen::Completion;
use crate::state::ScreenState;

/// How the intro ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroEnd {
    /// Playback reached end of stream
    Played,
    /// The configured intro timeout elapsed first
    TimedOut,
}

/// Where the sequencer is in its lifecycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntroStatus {
    /// `start()` not called yet
    Idle,
    /// Loading or playing
    Playing,
    /// Playback failed; intro stays on screen
    Stalled(MediaError),
    /// Screen handed over to interactive mode
    Finished(IntroEnd),
}

/// Sequences intro playback into the interactive phase
pub struct IntroSequencer {
    media: Arc<dyn MediaPlayer>,
    orientation: Arc<dyn OrientationLock>,
    source: AssetSource,
    timeout: Option<Duration>,
    status: IntroStatus,
    lock_requested: bool,
}

impl IntroSequencer {
    /// Create a sequencer for `source`
    pub fn new(
        media: Arc<dyn MediaPlayer>,
        orientation: Arc<dyn OrientationLock>,
        source: AssetSource,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            media,
            orientation,
            source,
            timeout,
            status: IntroStatus::Idle,
            lock_requested: false,
        }
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> &IntroStatus {
        &self.status
    }

    /// Start playback
    ///
    /// Idempotent: returns `false` without doing anything if playback was
    /// already started. The outcome arrives on `completions` as
    /// [`Completion::IntroFinished`] or [`Completion::IntroFailed`].
    pub fn start(&mut self, completions: &mpsc::Sender<Completion>) -> bool {
        if self.status != IntroStatus::Idle {
            tracing::debug!(status = ?self.status, "Intro already started");
            return false;
        }
        self.status = IntroStatus::Playing;

        let media = Arc::clone(&self.media);
        let source = self.source.clone();
        let deadline = self.timeout.map(|limit| Instant::now() + limit);
        let tx = completions.clone();

        tokio::spawn(async move {
            let played = match deadline {
                Some(deadline) => {
                    tokio::time::timeout_at(deadline, play_to_end(media.as_ref(), &source))
                        .await
                        .unwrap_or(Ok(IntroEnd::TimedOut))
                }
                None => play_to_end(media.as_ref(), &source).await,
            };

            let completion = match played {
                Ok(end) => Completion::IntroFinished(end),
                Err(error) => {
                    if tx.send(Completion::IntroFailed(error)).await.is_err() {
                        return;
                    }
                    // A failed intro only advances when bounded by a timeout
                    let Some(deadline) = deadline else { return };
                    tokio::time::sleep_until(deadline).await;
                    Completion::IntroFinished(IntroEnd::TimedOut)
                }
            };

            if tx.send(completion).await.is_err() {
                tracing::trace!("Intro completed after screen detached");
            }
        });

        true
    }

    /// Handle the end of the intro
    ///
    /// Returns `true` if this call moved the screen to interactive mode. Any
    /// later call (a duplicate finished signal, or a timeout racing a natural
    /// end) changes nothing.
    pub fn on_finished(&mut self, end: IntroEnd, state: &mut ScreenState) -> bool {
        if !state.enter_interactive() {
            tracing::debug!(?end, "Ignoring repeated intro completion");
            return false;
        }

        if end == IntroEnd::TimedOut {
            tracing::warn!(source = %self.source, "Intro timed out, continuing to interactive mode");
        }
        self.status = IntroStatus::Finished(end);
        self.request_portrait_lock();
        true
    }

    /// Record a playback failure
    pub fn on_failed(&mut self, error: MediaError) {
        tracing::error!(source = %self.source, error = %error, "Error playing intro");
        if self.status == IntroStatus::Playing {
            self.status = IntroStatus::Stalled(error);
        }
    }

    /// Fire-and-forget portrait lock, at most once per sequencer
    fn request_portrait_lock(&mut self) {
        if self.lock_requested {
            return;
        }
        self.lock_requested = true;

        let orientation = Arc::clone(&self.orientation);
        tokio::spawn(async move {
            match orientation.lock_portrait().await {
                Ok(()) => tracing::debug!("Orientation locked to portrait"),
                Err(e) => tracing::warn!(error = %e, "Orientation lock failed"),
            }
        });
    }
}

/// Load, play, and wait for end of stream
async fn play_to_end(media: &dyn MediaPlayer, source: &AssetSource) -> Result<IntroEnd, MediaError> {
    let handle = media.load(source).await?;
    let mut events = media.play(&handle).await?;

    match events.recv().await {
        Some(PlaybackEvent::Finished) => Ok(IntroEnd::Played),
        Some(PlaybackEvent::Error(reason)) => Err(MediaError::Playback(reason)),
        None => Err(MediaError::StreamClosed),
    }
}
