//! Herodeck Core - Headless Lifecycle Orchestration for the hero screen
//!
//! This crate provides the lifecycle logic behind the herodeck hero-information
//! screen, completely independent of any UI framework. It can drive a mobile
//! shell, a terminal, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surface                             │
//! │        (mobile shell, terminal driver, test harness)          │
//! │                           │                                   │
//! │                  ScreenEvent (up)                             │
//! │                  ScreenMessage (down)                         │
//! └───────────────────────────┼──────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────────┐
//! │                      HERO SCREEN                              │
//! │  ┌─────────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │   Intro     │  │   Feedback   │  │   Stats Query        │  │
//! │  │  Sequencer  │  │   Trigger    │  │   Controller         │  │
//! │  └──────┬──────┘  └──────┬───────┘  └──────────┬───────────┘  │
//! │         └────────── ScreenState ───────────────┘              │
//! │                          ▲                                    │
//! │                     Completion                                │
//! └──────────────────────────┼───────────────────────────────────┘
//!                            │
//!     MediaPlayer · AudioPlayer · OrientationLock · RosterService
//! ```
//!
//! # Key Types
//!
//! - [`HeroScreen`]: owns the state and the three sub-machines
//! - [`ScreenEvent`]: events sent from the surface to the screen
//! - [`ScreenMessage`]: messages sent from the screen to the surface
//! - [`ScreenState`]: phase, query, and panel, changed only by transitions
//! - [`Capabilities`]: media, audio, orientation, and roster implementations
//!
//! # Quick Start
//!
//! ```ignore
//! use herodeck_core::{
//!     capabilities::{Capabilities, HeadlessAudio, HeadlessMedia, HeadlessOrientation, OpenDotaRoster},
//!     HeroScreen, ScreenConfig, ScreenEvent,
//! };
//! use tokio::sync::mpsc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScreenConfig::from_env();
//!     let roster = OpenDotaRoster::new(&config.roster_base_url, config.request_timeout)?;
//!     let caps = Capabilities::new(
//!         HeadlessMedia::default(),
//!         HeadlessAudio::new(),
//!         HeadlessOrientation::new(),
//!         roster,
//!     );
//!
//!     let (tx, mut rx) = mpsc::channel(config.message_buffer);
//!     let mut screen = HeroScreen::new(caps, config, tx);
//!     screen.mount().await?;
//!
//!     while !screen.phase().is_interactive() {
//!         screen.next_completion().await;
//!     }
//!     screen.handle_event(ScreenEvent::submit("Anti-Mage")).await?;
//!
//!     while screen.is_busy() {
//!         screen.next_completion().await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`capabilities`]: capability traits plus OpenDota and headless implementations
//! - [`config`]: layered configuration (defaults, TOML, environment, CLI)
//! - [`error`]: error taxonomy
//! - [`events`]: events from the surface
//! - [`feedback`]: click cue preload and replay
//! - [`hero`]: roster payloads and name matching
//! - [`intro`]: intro playback and phase hand-over
//! - [`messages`]: messages to the surface
//! - [`phase`]: screen phase and hero panel
//! - [`query`]: query state and request tagging
//! - [`screen`]: the composed screen
//! - [`state`]: the state container
//! - [`stats`]: two-stage hero lookup

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod hero;
pub mod intro;
pub mod messages;
pub mod phase;
pub mod query;
pub mod screen;
pub mod state;
pub mod stats;

// Re-exports for convenience
pub use capabilities::{
    AssetSource, AudioPlayer, Capabilities, MediaPlayer, OrientationLock, PlaybackEvent,
    RosterService, SoundHandle,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigFile, ConfigOverrides,
    ConfigSource, ScreenConfig, ScreenToml,
};
pub use error::{
    AudioError, ConfigError, MediaError, OrientationError, ScreenError, TransportError,
};
pub use events::ScreenEvent;
pub use feedback::{FeedbackTrigger, SoundSlot};
pub use hero::{find_by_name, name_matches, HeroRecord, HeroStats, Named};
pub use intro::{IntroEnd, IntroSequencer, IntroStatus};
pub use messages::{Alert, ScreenMessage};
pub use phase::{Panel, ScreenPhase};
pub use query::{QueryId, QueryState, StaleResponsePolicy};
pub use screen::{Completion, HeroScreen, Lifecycle};
pub use state::ScreenState;
pub use stats::{lookup, Applied, LookupStage, QueryOutcome, StatsQueryController};
