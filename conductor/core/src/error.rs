//! Error Taxonomy
//!
//! Every asynchronous operation the screen starts has its own error type.
//! Errors are caught at the boundary of the operation that produced them and
//! turned into log records or state transitions; none of them propagate far
//! enough to take the process down.
//!
//! | Error              | Surfaced to user | Effect on screen                 |
//! |--------------------|------------------|----------------------------------|
//! | [`MediaError`]     | no               | intro stays on screen            |
//! | [`AudioError`]     | no               | cue is silent                    |
//! | [`OrientationError`] | no             | none, phase still advances       |
//! | [`TransportError`] | no               | query settles to `Idle`          |
//! | not found          | yes (alert)      | query settles to `NotFound`      |

use thiserror::Error;

/// Media playback capability failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    /// The media source could not be loaded
    #[error("failed to load media {source_name}: {reason}")]
    Load {
        /// Source that failed
        source_name: String,
        /// Underlying reason
        reason: String,
    },

    /// Playback failed after loading (decode error, device loss)
    #[error("playback failed: {0}")]
    Playback(String),

    /// The playback event stream closed without a finished signal
    #[error("playback stream closed before completion")]
    StreamClosed,
}

/// Audio capability failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AudioError {
    /// The sound asset could not be loaded or decoded
    #[error("failed to load sound {source_name}: {reason}")]
    Load {
        /// Source that failed
        source_name: String,
        /// Underlying reason
        reason: String,
    },

    /// Replay was requested before the sound finished loading
    #[error("sound is not loaded yet")]
    NotLoaded,

    /// The handle has already been released
    #[error("sound handle {0} was already released")]
    Released(String),

    /// Replay failed on the audio device
    #[error("replay failed: {0}")]
    Replay(String),
}

/// Orientation capability failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrientationError {
    /// The platform refused the lock
    #[error("orientation lock denied: {0}")]
    Denied(String),

    /// The platform is not able to lock orientation
    #[error("orientation lock unsupported on this platform")]
    Unsupported,
}

/// Roster service transport failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not build the HTTP client
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body (may be truncated)
        body: String,
    },

    /// The response body was not a valid roster
    #[error("failed to decode roster from {url}: {reason}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder message
        reason: String,
    },

    /// Transport failure reported by a non-HTTP roster implementation
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read
        path: String,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A value is present but unusable
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Offending key
        key: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors raised by the screen itself
#[derive(Debug, Error)]
pub enum ScreenError {
    /// An interactive-only operation was attempted during the intro
    #[error("{operation} is not available while the intro is playing")]
    NotInteractive {
        /// Operation that was rejected
        operation: &'static str,
    },

    /// The screen was already unmounted
    #[error("screen is unmounted")]
    Unmounted,

    /// No hero matched the identifier
    #[error("hero '{identifier}' not found")]
    NotFound {
        /// Identifier the user typed
        identifier: String,
    },

    /// Media failure
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Audio failure
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Orientation failure
    #[error(transparent)]
    Orientation(#[from] OrientationError),

    /// Transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_interactive_message() {
        let err = ScreenError::NotInteractive { operation: "submit" };
        assert_eq!(
            err.to_string(),
            "submit is not available while the intro is playing"
        );
    }

    #[test]
    fn test_transparent_wrapping() {
        let err: ScreenError = AudioError::NotLoaded.into();
        assert_eq!(err.to_string(), "sound is not loaded yet");
    }
}
