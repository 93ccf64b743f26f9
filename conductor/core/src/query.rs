//! Query State
//!
//! Lifecycle of the most recent hero lookup, plus the request tagging used to
//! decide what happens when overlapping lookups complete out of order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hero::HeroStats;

/// Status of the latest hero lookup
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum QueryState {
    /// Nothing submitted, or the last lookup failed in transport
    #[default]
    Idle,
    /// A lookup is in flight; the busy indicator is shown
    Loading,
    /// Stats found for the submitted hero
    Resolved(Box<HeroStats>),
    /// No hero matched the submitted name
    NotFound,
}

impl QueryState {
    /// Whether the busy indicator should be visible
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a lookup has settled (anything but `Loading`)
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Resolved stats, if any
    #[must_use]
    pub fn stats(&self) -> Option<&HeroStats> {
        match self {
            Self::Resolved(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Monotonic id attached to every submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryId(pub u64);

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// What to do with a response whose request is no longer the latest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Every response is applied in arrival order, so a slow earlier lookup can
    /// overwrite a newer one
    #[default]
    LastArrivalWins,
    /// Only the most recently submitted lookup may change the query state
    LatestRequestWins,
}

impl std::str::FromStr for StaleResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "last_arrival_wins" | "arrival" => Ok(Self::LastArrivalWins),
            "latest_request_wins" | "latest" => Ok(Self::LatestRequestWins),
            other => Err(format!("unknown stale response policy '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loading_is_non_terminal() {
        assert!(QueryState::Idle.is_terminal());
        assert!(QueryState::NotFound.is_terminal());
        assert!(QueryState::Resolved(Box::new(HeroStats::named("Axe"))).is_terminal());
        assert!(!QueryState::Loading.is_terminal());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "latest-request-wins".parse::<StaleResponsePolicy>(),
            Ok(StaleResponsePolicy::LatestRequestWins)
        );
        assert_eq!(
            "arrival".parse::<StaleResponsePolicy>(),
            Ok(StaleResponsePolicy::LastArrivalWins)
        );
        assert!("newest".parse::<StaleResponsePolicy>().is_err());
    }
}
