//! # Statefold Testing
//!
//! Testing utilities and helpers for the Statefold architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Recorders for observing store notifications
//! - Property-based testing utilities
//!
//! ## Example
//!
//! ```ignore
//! use statefold_testing::{record_notifications, CallLog};
//! use statefold_runtime::Store;
//!
//! let store = Store::from_reducer(todo_app(), ());
//! let log = CallLog::new();
//! let _sub = record_notifications(&store, &log, "view");
//!
//! store.dispatch(TodoAction::toggle(TodoId::new(0)))?;
//! assert_eq!(log.entries(), vec!["view"]);
//! ```

use statefold_core::environment::{IdGenerator, SequentialIdGenerator};

/// Ergonomic Given-When-Then testing for reducers
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{IdGenerator, SequentialIdGenerator};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Id generator that hands out a fixed script of ids first
    ///
    /// Once the script is exhausted it continues counting up from one past
    /// the largest scripted id, so ids stay unique. A script containing
    /// `u64::MAX` leaves nothing to count up to.
    ///
    /// # Example
    ///
    /// ```
    /// use statefold_testing::mocks::ScriptedIdGenerator;
    /// use statefold_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIdGenerator::new([10, 3]);
    /// assert_eq!(ids.next_id(), Some(10));
    /// assert_eq!(ids.next_id(), Some(3));
    /// assert_eq!(ids.next_id(), Some(11));
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Mutex<VecDeque<u64>>,
        fallback: Option<SequentialIdGenerator>,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that returns `ids` in order before counting up
        #[must_use]
        pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
            let script: VecDeque<u64> = ids.into_iter().collect();
            let first_free = script.iter().max().map_or(Some(0), |max| max.checked_add(1));
            Self {
                script: Mutex::new(script),
                fallback: first_free.map(SequentialIdGenerator::starting_at),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> Option<u64> {
            let scripted = match self.script.lock() {
                Ok(mut script) => script.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };
            scripted.or_else(|| self.fallback.as_ref().and_then(IdGenerator::next_id))
        }
    }

    /// Create a default id generator for tests (starts at 0)
    #[must_use]
    pub const fn test_ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new()
    }
}

/// Test helpers and utilities
pub mod helpers {
    use statefold_core::reducer::Reducer;
    use statefold_runtime::{Store, Subscription};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared, ordered log of labelled calls
    ///
    /// Cloning a `CallLog` yields a handle onto the same log.
    #[derive(Debug, Clone, Default)]
    pub struct CallLog {
        entries: Rc<RefCell<Vec<String>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a label
        pub fn record(&self, label: impl Into<String>) {
            self.entries.borrow_mut().push(label.into());
        }

        /// A callback that appends `label` every time it is invoked
        #[must_use]
        pub fn recorder(&self, label: impl Into<String>) -> impl Fn() + 'static {
            let log = self.clone();
            let label = label.into();
            move || log.record(label.clone())
        }

        /// Everything recorded so far, oldest first
        #[must_use]
        pub fn entries(&self) -> Vec<String> {
            self.entries.borrow().clone()
        }

        /// How many times `label` was recorded
        #[must_use]
        pub fn count(&self, label: &str) -> usize {
            self.entries.borrow().iter().filter(|e| *e == label).count()
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.entries.borrow_mut().clear();
        }
    }

    /// Subscribe a recorder for `label` to `store`
    pub fn record_notifications<S, A, E, R>(
        store: &Store<S, A, E, R>,
        log: &CallLog,
        label: &str,
    ) -> Subscription
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
    {
        store.subscribe(log.recorder(label))
    }

    /// Install a `tracing` subscriber that writes to the test harness output
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
///
/// Small proptest strategies shared by reducer property tests.
pub mod properties {
    use proptest::prelude::*;

    /// Strategy for a list of unique, ascending ids of length `0..max_len`
    pub fn unique_ids(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
        proptest::collection::btree_set(0u64..10_000, 0..max_len)
            .prop_map(|ids| ids.into_iter().collect())
    }

    /// Strategy for free-form item text, including empty and padded strings
    pub fn item_text() -> impl Strategy<Value = String> {
        "[ a-zA-Z0-9]{0,24}"
    }
}

// Re-export commonly used items
pub use helpers::{CallLog, init_test_tracing, record_notifications};
pub use mocks::{ScriptedIdGenerator, test_ids};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_ids_start_at_zero() {
        let ids = test_ids();
        assert_eq!(ids.next_id(), Some(0));
        assert_eq!(ids.next_id(), Some(1));
    }

    #[test]
    fn scripted_ids_continue_past_script() {
        let ids = ScriptedIdGenerator::new([4, 2]);
        assert_eq!(ids.next_id(), Some(4));
        assert_eq!(ids.next_id(), Some(2));
        assert_eq!(ids.next_id(), Some(5));

        let empty = ScriptedIdGenerator::new([]);
        assert_eq!(empty.next_id(), Some(0));
    }

    #[test]
    fn scripted_ids_ending_at_max_never_repeat() {
        let ids = ScriptedIdGenerator::new([u64::MAX, 7]);
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.next_id(), Some(7));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn call_log_records_in_order() {
        let log = CallLog::new();
        let first = log.recorder("first");
        let second = log.recorder("second");

        first();
        second();
        first();

        assert_eq!(log.entries(), vec!["first", "second", "first"]);
        assert_eq!(log.count("first"), 2);

        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn unique_ids_are_unique() {
        let mut runner = TestRunner::default();
        for _ in 0..32 {
            let ids = properties::unique_ids(16)
                .new_tree(&mut runner)
                .map(|tree| tree.current())
                .unwrap_or_default();
            let mut deduped = ids.clone();
            deduped.dedup();
            assert_eq!(ids, deduped);
        }
    }
}
