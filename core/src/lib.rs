//! # Statefold Core
//!
//! Core traits and types for the Statefold architecture.
//!
//! This crate provides the fundamental abstractions for building applications
//! around a single state tree that only changes through pure reduction functions.
//!
//! ## Core Concepts
//!
//! - **State**: The whole application state, owned data that can be cloned
//! - **Action**: An immutable record describing an intended state change
//! - **Reducer**: Pure function `(State, Action, Environment) → State`
//! - **Change**: What a reducer reports back: did its slice change or not
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Pure reductions, no hidden counters or clocks
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use statefold_core::{Change, Reducer};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Noop,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: &CounterAction, _env: &()) -> Change {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 Change::Changed
//!             }
//!             CounterAction::Noop => Change::Unchanged,
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! assert!(CounterReducer.reduce(&mut state, &CounterAction::Increment, &()).is_changed());
//! assert!(!CounterReducer.reduce(&mut state, &CounterAction::Noop, &()).is_changed());
//! assert_eq!(state.count, 1);
//! ```

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → State`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use std::ops::{BitOr, BitOrAssign};

    /// Outcome of a single reduction.
    ///
    /// A reducer returns [`Change::Unchanged`] when the action was irrelevant to
    /// the state it owns. Composition utilities use this to skip writing back
    /// untouched slices, and the store uses it to keep the previous snapshot.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[must_use]
    pub enum Change {
        /// The state was left exactly as it was
        #[default]
        Unchanged,
        /// The state was replaced with a new value
        Changed,
    }

    impl Change {
        /// Returns `true` if the reduction produced a new value
        #[must_use]
        pub const fn is_changed(self) -> bool {
            matches!(self, Self::Changed)
        }

        /// Combine two outcomes: changed if either changed
        pub const fn or(self, other: Self) -> Self {
            match (self, other) {
                (Self::Unchanged, Self::Unchanged) => Self::Unchanged,
                _ => Self::Changed,
            }
        }
    }

    impl BitOr for Change {
        type Output = Self;

        fn bitor(self, rhs: Self) -> Self {
            self.or(rhs)
        }
    }

    impl BitOrAssign for Change {
        fn bitor_assign(&mut self, rhs: Self) {
            *self = self.or(rhs);
        }
    }

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or state slice) this reducer owns
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for FilterReducer {
    ///     type State = Filter;
    ///     type Action = AppAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(&self, state: &mut Filter, action: &AppAction, _env: &()) -> Change {
    ///         match action {
    ///             AppAction::SetFilter { filter } => {
    ///                 *state = *filter;
    ///                 Change::Changed
    ///             }
    ///             _ => Change::Unchanged,
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into the next state
        ///
        /// Implementations must be pure: the result depends only on the
        /// incoming state, the action and the environment. A reducer that
        /// ignores the action must leave `state` untouched and return
        /// [`Change::Unchanged`].
        ///
        /// # Arguments
        ///
        /// - `state`: The state to advance. Callers own this value; it is never
        ///   a snapshot that someone else can still observe.
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Change;
    }

    impl<R: Reducer + ?Sized> Reducer for Box<R> {
        type State = R::State;
        type Action = R::Action;
        type Environment = R::Environment;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Change {
            (**self).reduce(state, action, env)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism are abstracted behind traits and injected.
/// Reducers never generate identifiers themselves; the code that builds an
/// action asks an [`IdGenerator`](environment::IdGenerator) for one.
pub mod environment {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Identifier generator - abstracts id assignment for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use statefold_core::environment::{IdGenerator, SequentialIdGenerator};
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Some(0));
    /// assert_eq!(ids.next_id(), Some(1));
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Hand out the next identifier. Never returns the same value twice.
        ///
        /// Returns `None` once every identifier has been handed out.
        fn next_id(&self) -> Option<u64>;
    }

    /// Monotonic identifier generator starting at a fixed value
    ///
    /// Counts up to and including `u64::MAX`, then returns `None` forever.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
        exhausted: AtomicBool,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `0`
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(0)
        }

        /// Create a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
                exhausted: AtomicBool::new(false),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Option<u64> {
            match self
                .next
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            {
                Ok(id) => Some(id),
                // `last` is u64::MAX: hand it out once, then stop.
                Err(last) => (!self.exhausted.swap(true, Ordering::Relaxed)).then_some(last),
            }
        }
    }

    impl<T: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<T> {
        fn next_id(&self) -> Option<u64> {
            (**self).next_id()
        }
    }
}

pub use reducer::{Change, Reducer};

#[cfg(test)]
mod tests {
    use super::environment::{IdGenerator, SequentialIdGenerator};
    use super::*;

    #[test]
    fn change_combines_like_or() {
        assert_eq!(Change::Unchanged | Change::Unchanged, Change::Unchanged);
        assert_eq!(Change::Unchanged | Change::Changed, Change::Changed);
        assert_eq!(Change::Changed | Change::Unchanged, Change::Changed);

        let mut change = Change::default();
        change |= Change::Changed;
        assert!(change.is_changed());
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let ids = SequentialIdGenerator::starting_at(41);
        assert_eq!(ids.next_id(), Some(41));
        assert_eq!(ids.next_id(), Some(42));

        let shared = std::sync::Arc::new(SequentialIdGenerator::new());
        let other = std::sync::Arc::clone(&shared);
        assert_eq!(shared.next_id(), Some(0));
        assert_eq!(other.next_id(), Some(1));
    }

    #[test]
    fn sequential_ids_stop_at_end_of_range() {
        let ids = SequentialIdGenerator::starting_at(u64::MAX - 1);
        assert_eq!(ids.next_id(), Some(u64::MAX - 1));
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }
}
