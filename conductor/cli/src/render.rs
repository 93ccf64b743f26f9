//! Plain-text rendering of lookup results

use herodeck_core::{Alert, QueryState};

/// Lines to print once a lookup for `identifier` has settled
pub fn lookup_lines(identifier: &str, query: &QueryState, alert: Option<&Alert>) -> Vec<String> {
    match (query, alert) {
        (QueryState::Resolved(stats), _) => stats.summary_lines(),
        (QueryState::NotFound, Some(alert)) => vec![format!("{}: {}", alert.title, alert.message)],
        (QueryState::NotFound, None) => {
            vec![format!("{identifier} is in the roster but has no stats")]
        }
        (QueryState::Idle, _) => vec![format!("Lookup for {identifier} failed, see the log")],
        (QueryState::Loading, _) => vec![format!("Lookup for {identifier} is still running")],
    }
}
