//! Capability Traits
//!
//! The screen never decodes media, touches the audio device, or talks to the
//! platform orientation API itself. It consumes those as capabilities behind
//! the traits here, which lets a headless driver, a mobile shell, or a test
//! harness supply their own implementations without changing screen logic.
//!
//! All methods are async. The screen never awaits them on its own control
//! flow: calls are spawned and their results come back as completions.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{AudioError, MediaError, OrientationError, TransportError};
use crate::hero::{HeroRecord, HeroStats};

/// Where an asset lives
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetSource {
    /// Local file path
    File(PathBuf),
    /// Remote URL
    Url(String),
}

impl AssetSource {
    /// Build from a config string; anything with a scheme is a URL
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value)
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// A loaded media asset
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaHandle {
    /// Unique handle id
    pub id: String,
    /// Source it was loaded from
    pub source: AssetSource,
}

impl MediaHandle {
    /// New handle with a random id
    #[must_use]
    pub fn new(source: AssetSource) -> Self {
        Self {
            id: format!("media_{}", uuid::Uuid::new_v4().simple()),
            source,
        }
    }
}

/// Events emitted by a playing media asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Natural end of stream, sent at most once
    Finished,
    /// Decode or device failure during playback
    Error(String),
}

/// A loaded, replayable sound
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle {
    /// Unique handle id
    pub id: String,
    /// Source it was loaded from
    pub source: AssetSource,
}

impl SoundHandle {
    /// New handle with a random id
    #[must_use]
    pub fn new(source: AssetSource) -> Self {
        Self {
            id: format!("sound_{}", uuid::Uuid::new_v4().simple()),
            source,
        }
    }
}

/// Media playback capability
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Load a media source
    async fn load(&self, source: &AssetSource) -> Result<MediaHandle, MediaError>;

    /// Start playback
    ///
    /// Returns a channel that receives [`PlaybackEvent`]s. The channel closes
    /// after `Finished` or `Error`.
    async fn play(&self, handle: &MediaHandle)
        -> Result<mpsc::Receiver<PlaybackEvent>, MediaError>;
}

/// Audio capability
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Load and decode a sound
    async fn load(&self, source: &AssetSource) -> Result<SoundHandle, AudioError>;

    /// Play the sound from position zero, fire-and-forget
    async fn replay(&self, handle: &SoundHandle) -> Result<(), AudioError>;

    /// Release the sound
    async fn unload(&self, handle: &SoundHandle) -> Result<(), AudioError>;
}

/// Platform orientation capability
#[async_trait]
pub trait OrientationLock: Send + Sync {
    /// Lock the display to portrait-up
    async fn lock_portrait(&self) -> Result<(), OrientationError>;
}

/// Remote hero roster service
#[async_trait]
pub trait RosterService: Send + Sync {
    /// Service name for logs
    fn name(&self) -> &str;

    /// Fetch the hero roster (first lookup stage)
    async fn heroes(&self) -> Result<Vec<HeroRecord>, TransportError>;

    /// Fetch the stats roster (second lookup stage)
    async fn hero_stats(&self) -> Result<Vec<HeroStats>, TransportError>;
}

/// The set of capabilities a screen is built from
#[derive(Clone)]
pub struct Capabilities {
    /// Intro playback
    pub media: Arc<dyn MediaPlayer>,
    /// Feedback cue
    pub audio: Arc<dyn AudioPlayer>,
    /// Orientation lock
    pub orientation: Arc<dyn OrientationLock>,
    /// Hero lookups
    pub roster: Arc<dyn RosterService>,
}

impl Capabilities {
    /// Bundle capability implementations
    pub fn new(
        media: impl MediaPlayer + 'static,
        audio: impl AudioPlayer + 'static,
        orientation: impl OrientationLock + 'static,
        roster: impl RosterService + 'static,
    ) -> Self {
        Self {
            media: Arc::new(media),
            audio: Arc::new(audio),
            orientation: Arc::new(orientation),
            roster: Arc::new(roster),
        }
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("roster", &self.roster.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_source_parse() {
        assert_eq!(
            AssetSource::parse("assets/intro.mp4"),
            AssetSource::File(PathBuf::from("assets/intro.mp4"))
        );
        assert_eq!(
            AssetSource::parse("https://cdn.example.com/sf.mp3"),
            AssetSource::Url("https://cdn.example.com/sf.mp3".to_string())
        );
    }

    #[test]
    fn test_handles_are_unique() {
        let source = AssetSource::parse("a.mp3");
        assert_ne!(SoundHandle::new(source.clone()).id, SoundHandle::new(source).id);
    }
}
