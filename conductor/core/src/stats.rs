//! Stats Query Controller
//!
//! Turns a typed hero name into stats with two sequential roster lookups:
//!
//! ```text
//! submit("anti-mage")
//!     │  state = Loading
//!     ▼
//! heroes()      ── no match ──▶ NotFound + alert
//!     │ match
//!     ▼
//! hero_stats()  ── no match ──▶ NotFound (logged anomaly)
//!     │ match
//!     ▼
//! Resolved(stats)
//! ```
//!
//! A transport failure at either stage is logged and the query settles to
//! `Idle`, so the busy indicator never sticks.
//!
//! Lookups are not cancelled and overlapping submissions run side by side.
//! With [`StaleResponsePolicy::LastArrivalWins`] every outcome is applied in
//! arrival order, so a slow early lookup can overwrite a newer one. With
//! [`StaleResponsePolicy::LatestRequestWins`] only the outcome of the most
//! recent submission is applied.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::capabilities::RosterService;
use crate::error::{ScreenError, TransportError};
use crate::hero::{find_by_name, HeroStats};
use crate::query::{QueryId, StaleResponsePolicy};
use crate::screen::Completion;
use crate::state::ScreenState;

/// Which lookup stage failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupStage {
    /// Hero roster
    Roster,
    /// Stats roster
    Stats,
}

/// Result of one two-stage lookup
#[derive(Debug)]
pub enum QueryOutcome {
    /// Both stages matched
    Resolved(Box<HeroStats>),
    /// Stage 1 found no hero with that name
    NotInRoster,
    /// Stage 1 matched but stage 2 had no stats for the hero
    MissingStats,
    /// A stage failed to fetch or decode
    TransportFailed {
        /// Stage that failed
        stage: LookupStage,
        /// Underlying error
        error: TransportError,
    },
}

/// What applying an outcome did to the screen state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Outcome belonged to a superseded request and was dropped
    Discarded,
    /// Query state changed, nothing for the user to acknowledge
    Updated,
    /// Query state is `NotFound` and the user should see an alert
    NotFoundAlert,
}

/// Runs hero lookups against a roster service
pub struct StatsQueryController {
    roster: Arc<dyn RosterService>,
    policy: StaleResponsePolicy,
    next_id: u64,
    latest: Option<QueryId>,
    in_flight: usize,
}

impl StatsQueryController {
    /// Create a controller
    pub fn new(roster: Arc<dyn RosterService>, policy: StaleResponsePolicy) -> Self {
        Self {
            roster,
            policy,
            next_id: 1,
            latest: None,
            in_flight: 0,
        }
    }

    /// Id of the most recent submission
    #[must_use]
    pub fn latest(&self) -> Option<QueryId> {
        self.latest
    }

    /// Lookups whose outcome has not been applied yet
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Submit a lookup
    ///
    /// Sets the query state to `Loading` and spawns the lookup; the outcome
    /// arrives on `completions` as [`Completion::Query`]. The identifier is
    /// passed through as typed, empty strings included.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotInteractive`] during the intro, in which case
    /// nothing is spawned and the state is untouched.
    pub fn submit(
        &mut self,
        identifier: String,
        state: &mut ScreenState,
        completions: &mpsc::Sender<Completion>,
    ) -> Result<QueryId, ScreenError> {
        state.begin_query()?;

        let id = QueryId(self.next_id);
        self.next_id += 1;
        self.latest = Some(id);
        self.in_flight += 1;

        tracing::debug!(query = %id, identifier = %identifier, "Submitting hero lookup");

        let roster = Arc::clone(&self.roster);
        let tx = completions.clone();
        tokio::spawn(async move {
            let outcome = lookup(roster.as_ref(), &identifier).await;
            let completion = Completion::Query {
                id,
                identifier,
                outcome,
            };
            if tx.send(completion).await.is_err() {
                tracing::trace!(query = %id, "Lookup finished after screen detached");
            }
        });

        Ok(id)
    }

    /// Apply a finished lookup to the screen state
    pub fn apply(
        &mut self,
        id: QueryId,
        identifier: &str,
        outcome: QueryOutcome,
        state: &mut ScreenState,
    ) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == StaleResponsePolicy::LatestRequestWins && self.latest != Some(id) {
            tracing::debug!(query = %id, latest = ?self.latest, "Discarding stale lookup");
            return Applied::Discarded;
        }

        match outcome {
            QueryOutcome::Resolved(stats) => {
                tracing::debug!(query = %id, hero = %stats.localized_name, "Hero resolved");
                state.resolve(*stats);
                Applied::Updated
            }
            QueryOutcome::NotInRoster => {
                tracing::info!(query = %id, identifier = %identifier, "Hero not found");
                state.mark_not_found();
                Applied::NotFoundAlert
            }
            QueryOutcome::MissingStats => {
                tracing::warn!(
                    query = %id,
                    identifier = %identifier,
                    "Hero is in the roster but has no stats record"
                );
                state.mark_not_found();
                Applied::Updated
            }
            QueryOutcome::TransportFailed { stage, error } => {
                tracing::error!(query = %id, ?stage, error = %error, "Error fetching hero data");
                state.abandon_query();
                Applied::Updated
            }
        }
    }
}

/// Two-stage lookup
///
/// Stage 2 is only requested once stage 1 has matched.
pub async fn lookup(roster: &dyn RosterService, identifier: &str) -> QueryOutcome {
    let heroes = match roster.heroes().await {
        Ok(heroes) => heroes,
        Err(error) => {
            return QueryOutcome::TransportFailed {
                stage: LookupStage::Roster,
                error,
            }
        }
    };

    if find_by_name(&heroes, identifier).is_none() {
        return QueryOutcome::NotInRoster;
    }

    let stats = match roster.hero_stats().await {
        Ok(stats) => stats,
        Err(error) => {
            return QueryOutcome::TransportFailed {
                stage: LookupStage::Stats,
                error,
            }
        }
    };

    match find_by_name(&stats, identifier) {
        Some(found) => QueryOutcome::Resolved(Box::new(found.clone())),
        None => QueryOutcome::MissingStats,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::hero::HeroRecord;
    use crate::query::QueryState;

    struct FixtureRoster {
        heroes: Result<Vec<HeroRecord>, String>,
        stats: Vec<HeroStats>,
        stats_calls: AtomicUsize,
    }

    impl FixtureRoster {
        fn new(heroes: &[&str], stats: &[&str]) -> Self {
            Self {
                heroes: Ok(heroes.iter().map(|n| HeroRecord::named(*n)).collect()),
                stats: stats.iter().map(|n| HeroStats::named(*n)).collect(),
                stats_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RosterService for FixtureRoster {
        fn name(&self) -> &str {
            "Fixture"
        }

        async fn heroes(&self) -> Result<Vec<HeroRecord>, TransportError> {
            self.heroes.clone().map_err(TransportError::Unavailable)
        }

        async fn hero_stats(&self) -> Result<Vec<HeroStats>, TransportError> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.stats.clone())
        }
    }

    #[tokio::test]
    async fn test_stage_one_miss_skips_stage_two() {
        let roster = FixtureRoster::new(&["Axe"], &["Axe"]);
        let outcome = lookup(&roster, "Pudge").await;

        assert!(matches!(outcome, QueryOutcome::NotInRoster));
        assert_eq!(roster.stats_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stage_two_miss() {
        let roster = FixtureRoster::new(&["Axe", "Anti-Mage"], &["Axe"]);
        let outcome = lookup(&roster, "anti-mage").await;
        assert!(matches!(outcome, QueryOutcome::MissingStats));
    }

    #[tokio::test]
    async fn test_transport_failure_names_stage() {
        let mut roster = FixtureRoster::new(&[], &[]);
        roster.heroes = Err("offline".into());

        match lookup(&roster, "Axe").await {
            QueryOutcome::TransportFailed { stage, .. } => assert_eq!(stage, LookupStage::Roster),
            other => panic!("expected transport failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_rejected_during_intro() {
        let roster = Arc::new(FixtureRoster::new(&["Axe"], &["Axe"]));
        let mut controller = StatsQueryController::new(roster, StaleResponsePolicy::default());
        let mut state = ScreenState::new();
        let (tx, _rx) = mpsc::channel(4);

        let result = controller.submit("Axe".into(), &mut state, &tx);
        assert!(matches!(result, Err(ScreenError::NotInteractive { .. })));
        assert_eq!(state.query(), &QueryState::Idle);
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_latest_request_policy_discards_stale() {
        let roster = Arc::new(FixtureRoster::new(&[], &[]));
        let mut controller =
            StatsQueryController::new(roster, StaleResponsePolicy::LatestRequestWins);
        let mut state = ScreenState::new();
        state.enter_interactive();
        let (tx, _rx) = mpsc::channel(4);

        let first = controller.submit("Axe".into(), &mut state, &tx).unwrap();
        let second = controller.submit("Lina".into(), &mut state, &tx).unwrap();
        assert!(second > first);

        let applied = controller.apply(
            first,
            "Axe",
            QueryOutcome::Resolved(Box::new(HeroStats::named("Axe"))),
            &mut state,
        );
        assert_eq!(applied, Applied::Discarded);
        assert!(state.is_busy());

        let applied = controller.apply(second, "Lina", QueryOutcome::NotInRoster, &mut state);
        assert_eq!(applied, Applied::NotFoundAlert);
        assert_eq!(state.query(), &QueryState::NotFound);
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_settles_idle() {
        let roster = Arc::new(FixtureRoster::new(&[], &[]));
        let mut controller = StatsQueryController::new(roster, StaleResponsePolicy::default());
        let mut state = ScreenState::new();
        state.enter_interactive();
        let (tx, _rx) = mpsc::channel(4);

        let id = controller.submit("Axe".into(), &mut state, &tx).unwrap();
        let applied = controller.apply(
            id,
            "Axe",
            QueryOutcome::TransportFailed {
                stage: LookupStage::Stats,
                error: TransportError::Unavailable("reset".into()),
            },
            &mut state,
        );
        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.query(), &QueryState::Idle);
        assert!(!state.is_busy());
    }
}
