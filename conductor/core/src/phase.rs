//! Screen Phase
//!
//! The screen has two mutually exclusive modes. It starts in [`ScreenPhase::Intro`]
//! and moves to [`ScreenPhase::Interactive`] exactly once, when the intro media
//! finishes. There is no way back.

use serde::{Deserialize, Serialize};

/// Which of the two screen modes is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenPhase {
    /// Intro media is playing (or stalled)
    #[default]
    Intro,
    /// Input form and hero panels are shown
    Interactive,
}

impl ScreenPhase {
    /// Whether the stats query form is reachable
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Which hero panel is shown once interactive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    /// Detail card (name, attribute, attack type)
    #[default]
    Detail,
    /// Full stats panel
    Stats,
}

impl Panel {
    /// The other panel
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Detail => Self::Stats,
            Self::Stats => Self::Detail,
        }
    }

    /// Label for the toggle button while this panel is shown
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Detail => "Show Stats",
            Self::Stats => "Hide Stats",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_intro() {
        assert_eq!(ScreenPhase::default(), ScreenPhase::Intro);
        assert!(!ScreenPhase::Intro.is_interactive());
        assert!(ScreenPhase::Interactive.is_interactive());
    }

    #[test]
    fn test_panel_toggle() {
        assert_eq!(Panel::Detail.toggled(), Panel::Stats);
        assert_eq!(Panel::Stats.toggled().toggle_label(), "Show Stats");
    }
}
