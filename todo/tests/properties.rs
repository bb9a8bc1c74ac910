//! Property-based tests for the to-do reducers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use statefold_testing::properties::{item_text, unique_ids};
use todo_app::{TodoAction, TodoId, TodoState, VisibilityFilter, reduce, visible_todos};

fn filter_strategy() -> impl Strategy<Value = VisibilityFilter> {
    prop_oneof![
        Just(VisibilityFilter::ShowAll),
        Just(VisibilityFilter::ShowActive),
        Just(VisibilityFilter::ShowCompleted),
    ]
}

/// A state built from unique ids, some of them toggled, and a filter
fn state_strategy() -> impl Strategy<Value = TodoState> {
    (
        unique_ids(12),
        proptest::collection::vec(any::<bool>(), 12),
        filter_strategy(),
    )
        .prop_map(|(ids, completed, filter)| {
            let mut state = reduce(None, &TodoAction::set_filter(filter));
            for (id, done) in ids.into_iter().zip(completed) {
                state = reduce(Some(&state), &TodoAction::add(TodoId::new(id), format!("todo {id}")));
                if done {
                    state = reduce(Some(&state), &TodoAction::toggle(TodoId::new(id)));
                }
            }
            state
        })
}

proptest! {
    #[test]
    fn unknown_action_is_identity(state in state_strategy()) {
        let next = reduce(Some(&state), &TodoAction::Unknown);
        prop_assert_eq!(next, state);
    }

    #[test]
    fn add_appends_exactly_one_item(state in state_strategy(), text in item_text()) {
        let id = TodoId::new(50_000);
        let next = reduce(Some(&state), &TodoAction::add(id, text.clone()));

        prop_assert_eq!(next.count(), state.count() + 1);
        prop_assert_eq!(&next.todos()[..state.count()], state.todos());
        let last = &next.todos()[state.count()];
        prop_assert_eq!(last.id(), id);
        prop_assert_eq!(last.text(), text.as_str());
        prop_assert!(!last.is_completed());
        prop_assert_eq!(next.visibility_filter(), state.visibility_filter());
    }

    #[test]
    fn toggle_twice_is_identity(state in state_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(state.count() > 0);
        let id = state.todos()[pick.index(state.count())].id();

        let once = reduce(Some(&state), &TodoAction::toggle(id));
        prop_assert_ne!(&once, &state);
        let twice = reduce(Some(&once), &TodoAction::toggle(id));
        prop_assert_eq!(twice, state);
    }

    #[test]
    fn toggle_touches_only_its_item(state in state_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(state.count() > 0);
        let index = pick.index(state.count());
        let id = state.todos()[index].id();

        let next = reduce(Some(&state), &TodoAction::toggle(id));
        for (i, (before, after)) in state.todos().iter().zip(next.todos()).enumerate() {
            prop_assert_eq!(before.id(), after.id());
            prop_assert_eq!(before.text(), after.text());
            if i == index {
                prop_assert_ne!(before.is_completed(), after.is_completed());
            } else {
                prop_assert_eq!(before.is_completed(), after.is_completed());
            }
        }
    }

    #[test]
    fn filters_partition_the_list(state in state_strategy()) {
        let all = visible_todos(state.todos(), VisibilityFilter::ShowAll);
        let active = visible_todos(state.todos(), VisibilityFilter::ShowActive);
        let completed = visible_todos(state.todos(), VisibilityFilter::ShowCompleted);

        prop_assert_eq!(all.len(), state.count());
        prop_assert_eq!(active.len() + completed.len(), state.count());
        prop_assert_eq!(completed.len(), state.completed_count());
        prop_assert!(active.iter().all(|item| !item.is_completed()));
        prop_assert!(completed.iter().all(|item| item.is_completed()));
    }

    #[test]
    fn set_filter_only_touches_filter(state in state_strategy(), filter in filter_strategy()) {
        let next = reduce(Some(&state), &TodoAction::set_filter(filter));
        prop_assert_eq!(next.visibility_filter(), filter);
        prop_assert_eq!(next.todos(), state.todos());
    }
}
