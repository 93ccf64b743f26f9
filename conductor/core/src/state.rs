//! Screen State Container
//!
//! The single piece of mutable state shared by the three sub-machines. Fields
//! are private; every change goes through one of the transition functions
//! below, each of which reports whether anything actually changed so the
//! screen knows when to notify the surface.
//!
//! ```text
//!   Intro ──(intro finished)──▶ Interactive
//!                                   │
//!            ┌──────────────────────┘
//!            ▼
//!   Idle ──submit──▶ Loading ──┬──▶ Resolved
//!    ▲                  ▲      ├──▶ NotFound
//!    │                  │      └──▶ Idle (transport failure)
//!    └──────────────────┴── submit again from any state
//! ```

use crate::error::ScreenError;
use crate::hero::HeroStats;
use crate::phase::{Panel, ScreenPhase};
use crate::query::QueryState;

/// Phase, query, and panel state owned by one screen
#[derive(Clone, Debug, Default)]
pub struct ScreenState {
    phase: ScreenPhase,
    query: QueryState,
    panel: Panel,
}

impl ScreenState {
    /// Fresh state: intro phase, idle query, detail panel
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// Current query state
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Current hero panel
    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Busy indicator visibility
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.query.is_loading()
    }

    /// `Intro -> Interactive`. Returns `true` only on the first call.
    pub fn enter_interactive(&mut self) -> bool {
        if self.phase.is_interactive() {
            return false;
        }
        self.phase = ScreenPhase::Interactive;
        true
    }

    /// Start a lookup, discarding any previous result
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotInteractive`] during the intro.
    pub fn begin_query(&mut self) -> Result<(), ScreenError> {
        self.require_interactive("submit")?;
        self.query = QueryState::Loading;
        Ok(())
    }

    /// Lookup found stats
    pub fn resolve(&mut self, stats: HeroStats) {
        self.query = QueryState::Resolved(Box::new(stats));
    }

    /// Lookup found no matching hero
    pub fn mark_not_found(&mut self) {
        self.query = QueryState::NotFound;
    }

    /// Lookup failed in transport; clear the spinner without a result
    ///
    /// Returns `true` if the query was still loading.
    pub fn abandon_query(&mut self) -> bool {
        let was_loading = self.query.is_loading();
        self.query = QueryState::Idle;
        was_loading
    }

    /// Swap detail and stats panels
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotInteractive`] during the intro.
    pub fn toggle_panel(&mut self) -> Result<Panel, ScreenError> {
        self.require_interactive("toggle stats")?;
        self.panel = self.panel.toggled();
        Ok(self.panel)
    }

    fn require_interactive(&self, operation: &'static str) -> Result<(), ScreenError> {
        if self.phase.is_interactive() {
            Ok(())
        } else {
            Err(ScreenError::NotInteractive { operation })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_interactive_once() {
        let mut state = ScreenState::new();
        assert!(state.enter_interactive());
        assert!(!state.enter_interactive());
        assert_eq!(state.phase(), ScreenPhase::Interactive);
    }

    #[test]
    fn test_query_gated_by_phase() {
        let mut state = ScreenState::new();
        assert!(matches!(
            state.begin_query(),
            Err(ScreenError::NotInteractive { .. })
        ));
        assert_eq!(state.query(), &QueryState::Idle);
        assert!(state.toggle_panel().is_err());
    }

    #[test]
    fn test_submission_supersedes_result() {
        let mut state = ScreenState::new();
        state.enter_interactive();
        state.begin_query().unwrap();
        state.resolve(HeroStats::named("Axe"));
        assert!(!state.is_busy());

        state.begin_query().unwrap();
        assert_eq!(state.query(), &QueryState::Loading);
        assert!(state.is_busy());
    }

    #[test]
    fn test_abandon_clears_busy() {
        let mut state = ScreenState::new();
        state.enter_interactive();
        state.begin_query().unwrap();
        assert!(state.abandon_query());
        assert!(!state.is_busy());
        assert_eq!(state.query(), &QueryState::Idle);
    }
}
