//! Headless Capabilities
//!
//! Capability implementations for running the screen without a display or an
//! audio device: CI, the `herodeck` command-line driver, and smoke tests
//! against the live roster service.
//!
//! - [`HeadlessMedia`] checks the asset exists and reports `Finished` after a
//!   fixed playback duration.
//! - [`HeadlessAudio`] reads the asset bytes on load and logs each replay.
//! - [`HeadlessOrientation`] records the lock, or refuses it when configured to.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::traits::{
    AssetSource, AudioPlayer, MediaHandle, MediaPlayer, OrientationLock, PlaybackEvent,
    SoundHandle,
};
use crate::error::{AudioError, MediaError, OrientationError};

/// Media player that "plays" for a fixed duration
#[derive(Clone, Debug)]
pub struct HeadlessMedia {
    playback: Duration,
}

impl HeadlessMedia {
    /// Player whose every asset lasts `playback`
    #[must_use]
    pub fn new(playback: Duration) -> Self {
        Self { playback }
    }
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[async_trait]
impl MediaPlayer for HeadlessMedia {
    async fn load(&self, source: &AssetSource) -> Result<MediaHandle, MediaError> {
        if let AssetSource::File(path) = source {
            tokio::fs::metadata(path)
                .await
                .map_err(|e| MediaError::Load {
                    source_name: source.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(MediaHandle::new(source.clone()))
    }

    async fn play(
        &self,
        handle: &MediaHandle,
    ) -> Result<mpsc::Receiver<PlaybackEvent>, MediaError> {
        let (tx, rx) = mpsc::channel(1);
        let playback = self.playback;
        let id = handle.id.clone();

        tokio::spawn(async move {
            tokio::time::sleep(playback).await;
            tracing::debug!(handle = %id, "Headless playback reached end of stream");
            let _ = tx.send(PlaybackEvent::Finished).await;
        });

        Ok(rx)
    }
}

/// Audio player that keeps decoded bytes in memory and logs replays
#[derive(Clone, Debug, Default)]
pub struct HeadlessAudio {
    /// Loaded sounds by handle id, with their size in bytes
    loaded: Arc<Mutex<HashMap<String, usize>>>,
}

impl HeadlessAudio {
    /// Empty player
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sounds currently loaded
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.lock().len()
    }
}

#[async_trait]
impl AudioPlayer for HeadlessAudio {
    async fn load(&self, source: &AssetSource) -> Result<SoundHandle, AudioError> {
        let size = match source {
            AssetSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AudioError::Load {
                    source_name: source.to_string(),
                    reason: e.to_string(),
                })?
                .len(),
            AssetSource::Url(_) => 0,
        };

        let handle = SoundHandle::new(source.clone());
        self.loaded.lock().insert(handle.id.clone(), size);
        tracing::debug!(handle = %handle.id, bytes = size, "Sound loaded");
        Ok(handle)
    }

    async fn replay(&self, handle: &SoundHandle) -> Result<(), AudioError> {
        if !self.loaded.lock().contains_key(&handle.id) {
            return Err(AudioError::Released(handle.id.clone()));
        }
        tracing::info!(handle = %handle.id, source = %handle.source, "Replaying cue from 0ms");
        Ok(())
    }

    async fn unload(&self, handle: &SoundHandle) -> Result<(), AudioError> {
        match self.loaded.lock().remove(&handle.id) {
            Some(_) => Ok(()),
            None => Err(AudioError::Released(handle.id.clone())),
        }
    }
}

/// Current orientation lock of a [`HeadlessOrientation`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationState {
    /// No lock requested
    Unlocked,
    /// Locked to portrait-up
    Portrait,
}

/// Orientation lock that records requests
#[derive(Clone, Debug)]
pub struct HeadlessOrientation {
    state: Arc<Mutex<OrientationState>>,
    deny: bool,
}

impl HeadlessOrientation {
    /// Lock that always succeeds
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(OrientationState::Unlocked)),
            deny: false,
        }
    }

    /// Lock that always refuses
    #[must_use]
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::new()
        }
    }

    /// Current lock
    #[must_use]
    pub fn state(&self) -> OrientationState {
        *self.state.lock()
    }
}

impl Default for HeadlessOrientation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrientationLock for HeadlessOrientation {
    async fn lock_portrait(&self) -> Result<(), OrientationError> {
        if self.deny {
            return Err(OrientationError::Denied("headless lock configured to deny".into()));
        }
        *self.state.lock() = OrientationState::Portrait;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_media_missing_file_fails_load() {
        let media = HeadlessMedia::new(Duration::from_millis(1));
        let result = media
            .load(&AssetSource::parse("/definitely/not/here.mp4"))
            .await;
        assert!(matches!(result, Err(MediaError::Load { .. })));
    }

    #[tokio::test]
    async fn test_media_reports_finished() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let media = HeadlessMedia::new(Duration::from_millis(5));
        let source = AssetSource::File(file.path().to_path_buf());

        let handle = media.load(&source).await.unwrap();
        let mut rx = media.play(&handle).await.unwrap();
        assert_eq!(rx.recv().await, Some(PlaybackEvent::Finished));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_audio_load_replay_unload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ID3fake").unwrap();
        let audio = HeadlessAudio::new();
        let source = AssetSource::File(file.path().to_path_buf());

        let handle = audio.load(&source).await.unwrap();
        assert_eq!(audio.loaded_count(), 1);
        tokio_test::assert_ok!(audio.replay(&handle).await);
        tokio_test::assert_ok!(audio.replay(&handle).await);

        tokio_test::assert_ok!(audio.unload(&handle).await);
        tokio_test::assert_err!(audio.unload(&handle).await);
        tokio_test::assert_err!(audio.replay(&handle).await);
    }

    #[tokio::test]
    async fn test_orientation_records_lock() {
        let lock = HeadlessOrientation::new();
        assert_eq!(lock.state(), OrientationState::Unlocked);
        lock.lock_portrait().await.unwrap();
        assert_eq!(lock.state(), OrientationState::Portrait);

        let denying = HeadlessOrientation::denying();
        assert!(denying.lock_portrait().await.is_err());
        assert_eq!(denying.state(), OrientationState::Unlocked);
    }
}
