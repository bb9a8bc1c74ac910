//! Reducer logic for the to-do list.
//!
//! One reducer per state slice, each scoped onto its field of [`TodoState`]
//! and combined into the root reducer returned by [`todo_app`].

use crate::types::{TodoAction, TodoItem, TodoState, VisibilityFilter};
use statefold_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use statefold_core::reducer::{Change, Reducer};
use statefold_runtime::{Store, StoreConfig};

/// The root reducer type
pub type TodoAppReducer = CombinedReducer<TodoState, TodoAction, ()>;

/// A store running the to-do list
pub type TodoStore = Store<TodoState, TodoAction, (), TodoAppReducer>;

/// Reducer for the item list slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = Vec<TodoItem>;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: &Self::Action,
        _env: &Self::Environment,
    ) -> Change {
        match action {
            TodoAction::AddTodo { id, text } => {
                state.push(TodoItem::new(*id, text.clone()));
                Change::Changed
            }
            TodoAction::ToggleTodo { id } => {
                let mut change = Change::Unchanged;
                for item in state.iter_mut().filter(|item| item.id() == *id) {
                    *item = item.toggled();
                    change = Change::Changed;
                }
                if !change.is_changed() {
                    tracing::trace!(%id, "Toggle for unknown todo ignored");
                }
                change
            }
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Unknown => Change::Unchanged,
        }
    }
}

/// Reducer for the visibility filter slice
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: &Self::Action,
        _env: &Self::Environment,
    ) -> Change {
        match action {
            TodoAction::SetVisibilityFilter { filter } if *filter != *state => {
                *state = *filter;
                Change::Changed
            }
            TodoAction::SetVisibilityFilter { .. }
            | TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::Unknown => Change::Unchanged,
        }
    }
}

/// Builds the root reducer: `todos` and `visibility_filter`, each handled by
/// its own slice reducer
#[must_use]
pub fn todo_app() -> TodoAppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            TodosReducer,
            |state: &TodoState| &state.todos,
            |state: &mut TodoState, todos: Vec<TodoItem>| state.todos = todos,
        )),
        Box::new(scope_reducer(
            VisibilityFilterReducer,
            |state: &TodoState| &state.visibility_filter,
            |state: &mut TodoState, filter: VisibilityFilter| state.visibility_filter = filter,
        )),
    ])
}

/// Computes the next state without a store
///
/// `None` stands for "no state yet": the defaults (no items, show all) are
/// used before the action is applied.
#[must_use]
pub fn reduce(state: Option<&TodoState>, action: &TodoAction) -> TodoState {
    let mut next = state.cloned().unwrap_or_default();
    let _ = todo_app().reduce(&mut next, action, &());
    next
}

/// Create a store starting from the default state
#[must_use]
pub fn create_store() -> TodoStore {
    Store::from_reducer(todo_app(), ())
}

/// Create a store starting from the default state with a custom configuration
#[must_use]
pub fn create_store_with_config(config: StoreConfig) -> TodoStore {
    Store::with_config(TodoState::default(), todo_app(), (), config)
}
