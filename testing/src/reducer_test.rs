//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use statefold_core::reducer::{Change, Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for assertions comparing the state before and after
type TransitionAssertion<S> = Box<dyn FnOnce(&S, &S)>;

/// Type alias for change assertion functions
type ChangeAssertion = Box<dyn FnOnce(Change)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use statefold_testing::{assertions, ReducerTest};
///
/// ReducerTest::new(TodosReducer)
///     .with_env(())
///     .given_state(Vec::new())
///     .when_action(TodoAction::add(TodoId::new(0), "buy milk"))
///     .then_state(|todos| {
///         assert_eq!(todos.len(), 1);
///     })
///     .then_change(assertions::assert_changed)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    transition_assertions: Vec<TransitionAssertion<S>>,
    change_assertions: Vec<ChangeAssertion>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            transition_assertions: Vec::new(),
            change_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to reduce (When)
    ///
    /// Call repeatedly to reduce several actions in order.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion comparing the initial and resulting state (Then)
    #[must_use]
    pub fn then_transition<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S, &S) + 'static,
    {
        self.transition_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the combined change outcome (Then)
    ///
    /// The outcome is [`Change::Changed`] if any of the actions changed state.
    #[must_use]
    pub fn then_change<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(Change) + 'static,
    {
        self.change_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let initial = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let mut state = initial.clone();
        let change = self
            .actions
            .iter()
            .fold(Change::Unchanged, |change, action| {
                change | self.reducer.reduce(&mut state, action, &env)
            });

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.transition_assertions {
            assertion(&initial, &state);
        }

        // Run change assertions
        for assertion in self.change_assertions {
            assertion(change);
        }
    }
}

/// Helper assertions for reduction outcomes
pub mod assertions {
    use statefold_core::reducer::Change;

    /// Assert that the reduction changed state
    ///
    /// # Panics
    ///
    /// Panics if `change` is [`Change::Unchanged`].
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_changed(change: Change) {
        assert_eq!(change, Change::Changed, "Expected the action to change state");
    }

    /// Assert that the reduction was a no-op
    ///
    /// # Panics
    ///
    /// Panics if `change` is [`Change::Changed`].
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_unchanged(change: Change) {
        assert_eq!(change, Change::Unchanged, "Expected the action to be a no-op");
    }

    /// Assert that `before` and `after` are structurally equal
    ///
    /// # Panics
    ///
    /// Panics if the two states differ.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_same_state<S: PartialEq + std::fmt::Debug>(before: &S, after: &S) {
        assert_eq!(before, after, "Expected state to be left untouched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        Ignore,
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: &Self::Action,
            _env: &Self::Environment,
        ) -> Change {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    Change::Changed
                }
                TestAction::Decrement => {
                    state.count -= 1;
                    Change::Changed
                }
                TestAction::Ignore => Change::Unchanged,
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_change(assertions::assert_changed)
            .run();
    }

    #[test]
    fn test_reducer_test_decrement() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .then_state(|state| {
                assert_eq!(state.count, 4);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_multiple_actions() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .when_action(TestAction::Ignore)
            .when_action(TestAction::Increment)
            .then_state(|state| assert_eq!(state.count, 2))
            .then_change(assertions::assert_changed)
            .run();
    }

    #[test]
    fn test_reducer_test_noop() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 3 })
            .when_action(TestAction::Ignore)
            .then_transition(assertions::assert_same_state)
            .then_change(assertions::assert_unchanged)
            .run();
    }
}
