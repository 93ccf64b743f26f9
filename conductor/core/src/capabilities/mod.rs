//! Platform Capabilities
//!
//! Abstracted access to everything the screen consumes but does not own:
//! media playback, audio, orientation locking, and the remote hero roster.
//!
//! # Available Implementations
//!
//! - **OpenDota**: HTTP roster service (default)
//! - **Headless**: media, audio, and orientation without a device
//!
//! # Usage
//!
//! ```ignore
//! use herodeck_core::capabilities::{
//!     Capabilities, HeadlessAudio, HeadlessMedia, HeadlessOrientation, OpenDotaRoster,
//! };
//!
//! let roster = OpenDotaRoster::new(DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let caps = Capabilities::new(
//!     HeadlessMedia::default(),
//!     HeadlessAudio::new(),
//!     HeadlessOrientation::new(),
//!     roster,
//! );
//! ```

mod headless;
mod opendota;
mod traits;

pub use headless::{HeadlessAudio, HeadlessMedia, HeadlessOrientation, OrientationState};
pub use opendota::{OpenDotaRoster, DEFAULT_BASE_URL};
pub use traits::{
    AssetSource, AudioPlayer, Capabilities, MediaHandle, MediaPlayer, OrientationLock,
    PlaybackEvent, RosterService, SoundHandle,
};
