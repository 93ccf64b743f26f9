//! Screen Messages
//!
//! Messages sent from the screen to its rendering surface. The surface holds no
//! lifecycle logic of its own: it shows the phase it is told to show, the busy
//! indicator while told it is busy, and blocks on an alert until the user
//! acknowledges it.

use serde::{Deserialize, Serialize};

use crate::phase::{Panel, ScreenPhase};
use crate::query::QueryState;

/// Messages from the screen to the surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScreenMessage {
    // ============================================
    // Lifecycle
    // ============================================
    /// Which screen mode to render
    Phase {
        /// The phase now in effect
        phase: ScreenPhase,
    },

    /// The screen released its resources and stopped observing work
    Unmounted,

    // ============================================
    // Query
    // ============================================
    /// The lookup state changed
    Query {
        /// New query state
        state: QueryState,
    },

    /// Busy indicator visibility
    Busy {
        /// Whether the indicator is shown
        visible: bool,
    },

    // ============================================
    // Interaction
    // ============================================
    /// Show a blocking alert the user must acknowledge
    Alert {
        /// The alert to show
        alert: Alert,
    },

    /// The pending alert was acknowledged and can be closed
    AlertDismissed,

    /// The hero panel changed
    PanelChanged {
        /// Panel now shown
        panel: Panel,
        /// Label for the toggle button
        toggle_label: String,
    },
}

/// A blocking, acknowledgeable alert
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert title
    pub title: String,
    /// Alert body
    pub message: String,
}

impl Alert {
    /// Alert for a hero name that matched nothing
    pub fn hero_not_found(identifier: &str) -> Self {
        Self {
            title: "Hero not found".to_string(),
            message: format!("No hero named \"{identifier}\" was found."),
        }
    }
}
