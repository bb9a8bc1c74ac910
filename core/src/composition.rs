//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! Together they give the classic "one reducer per state field" layout: each
//! slice reducer is scoped to its field and the scoped reducers are combined
//! into the root reducer.
//!
//! # Examples
//!
//! ```
//! use statefold_core::{Change, Reducer};
//! use statefold_core::composition::{combine_reducers, scope_reducer};
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     count: i32,
//!     name: String,
//! }
//!
//! enum AppAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CountReducer;
//! struct NameReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = i32;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut i32, action: &AppAction, _env: &()) -> Change {
//!         match action {
//!             AppAction::Increment => {
//!                 *state += 1;
//!                 Change::Changed
//!             }
//!             AppAction::SetName(_) => Change::Unchanged,
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut String, action: &AppAction, _env: &()) -> Change {
//!         match action {
//!             AppAction::SetName(name) => {
//!                 state.clone_from(name);
//!                 Change::Changed
//!             }
//!             AppAction::Increment => Change::Unchanged,
//!         }
//!     }
//! }
//!
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         CountReducer,
//!         |s: &AppState| &s.count,
//!         |s: &mut AppState, count: i32| s.count = count,
//!     )),
//!     Box::new(scope_reducer(
//!         NameReducer,
//!         |s: &AppState| &s.name,
//!         |s: &mut AppState, name: String| s.name = name,
//!     )),
//! ]);
//!
//! let mut state = AppState::default();
//! let change = root.reduce(&mut state, &AppAction::SetName("Alice".to_string()), &());
//! assert!(change.is_changed());
//! assert_eq!(state.name, "Alice");
//! assert_eq!(state.count, 0);
//! ```

use crate::reducer::{Change, Reducer};

/// Boxed reducer over a fixed state/action/environment triple
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E>>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence against the same action, in the order
/// given. The combined outcome is [`Change::Changed`] if any of them changed
/// the state.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    /// Number of reducers combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns `true` if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Change {
        self.reducers
            .iter()
            .fold(Change::Unchanged, |change, reducer| {
                change | reducer.reduce(state, action, env)
            })
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The child reducer only ever sees its own slice. The slice is written back
/// into the parent only when the child reports [`Change::Changed`], so an
/// irrelevant action leaves the parent's field untouched.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (subset of `S`)
/// - `A`: The action type
/// - `E`: The environment type
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Change {
        let mut sub_state = (self.get_state)(state).clone();

        let change = self.reducer.reduce(&mut sub_state, action, env);

        if change.is_changed() {
            (self.set_state)(state, sub_state);
        }

        change
    }
}
