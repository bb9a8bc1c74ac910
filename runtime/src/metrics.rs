//! Metrics emitted by the store.
//!
//! The store records through the [`metrics`] facade. Nothing is exported
//! unless the application installs a recorder; without one every macro call
//! is a no-op.
//!
//! | Metric | Kind | Meaning |
//! |--------|------|---------|
//! | `store.dispatch.total` | counter | Actions accepted by `dispatch` |
//! | `store.dispatch.unchanged` | counter | Accepted actions that changed nothing |
//! | `store.dispatch.rejected` | counter | Reentrant dispatches refused |
//! | `store.reducer.duration_seconds` | histogram | Time spent in the root reducer |
//! | `store.subscribers.notified` | counter | Subscriber callbacks invoked |
//! | `store.subscribers.active` | gauge | Currently registered subscribers |

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// Register descriptions for every store metric.
///
/// Call once after installing a recorder. Calling it again only re-registers
/// the same descriptions.
pub fn register_metrics() {
    describe_counter!(
        "store.dispatch.total",
        "Total number of actions dispatched to a store"
    );
    describe_counter!(
        "store.dispatch.unchanged",
        "Dispatched actions that left the state unchanged"
    );
    describe_counter!(
        "store.dispatch.rejected",
        "Dispatches rejected because another dispatch was running"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        Unit::Seconds,
        "Time taken by the root reducer"
    );
    describe_counter!(
        "store.subscribers.notified",
        "Total number of subscriber callbacks invoked"
    );
    describe_gauge!(
        "store.subscribers.active",
        "Number of subscribers currently registered"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_without_recorder_is_harmless() {
        register_metrics();
        register_metrics();
    }
}
