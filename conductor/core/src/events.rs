//! Surface Events
//!
//! Events sent from the rendering surface to the screen. The surface reports
//! what the user did; the screen decides what it means. Mounting is not an
//! event: the owner of the screen calls [`HeroScreen::mount`] directly.
//!
//! [`HeroScreen::mount`]: crate::screen::HeroScreen::mount

use serde::{Deserialize, Serialize};

/// Events from the surface to the screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
    /// The text field changed
    InputChanged {
        /// Full field contents
        text: String,
    },

    /// The user pressed submit
    ///
    /// `None` submits the current text field contents.
    Submit {
        /// Identifier to look up
        identifier: Option<String>,
    },

    /// The user pressed the Show/Hide Stats button
    ToggleStats,

    /// The user acknowledged the pending alert
    AlertAcknowledged,

    /// The surface is going away
    Unmount,
}

impl ScreenEvent {
    /// Submit an explicit identifier
    pub fn submit(identifier: impl Into<String>) -> Self {
        Self::Submit {
            identifier: Some(identifier.into()),
        }
    }
}
