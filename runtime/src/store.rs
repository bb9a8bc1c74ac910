//! The Store - runtime coordinator for a reducer.
//!
//! The store owns the only mutable cell in the system: the current state
//! snapshot. Snapshots are handed out as `Rc<S>` and are never written to;
//! a dispatch that changes state builds a new value and swaps the pointer.

use crate::{StoreConfig, StoreError};
use statefold_core::reducer::Reducer;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Instant;

type Callback = Rc<dyn Fn()>;

/// Registered subscriber callbacks, in subscription order.
#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

impl Subscribers {
    fn insert(&mut self, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn snapshot(&self) -> Vec<Callback> {
        self.entries.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}

/// Internal: RAII guard that clears the dispatching flag on drop
///
/// Ensures the flag is reset even if the reducer or a subscriber panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Capability returned by [`Store::subscribe`]
///
/// Calling [`unsubscribe`](Self::unsubscribe) removes exactly the callback it
/// was created for. Calling it again, or after the store is gone, does
/// nothing. Dropping a `Subscription` does *not* unsubscribe.
pub struct Subscription {
    id: u64,
    subscribers: Weak<RefCell<Subscribers>>,
    active: Cell<bool>,
}

impl Subscription {
    /// Remove the callback from the store's notification set
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }

        if let Some(subscribers) = self.subscribers.upgrade() {
            let mut subscribers = subscribers.borrow_mut();
            if subscribers.remove(self.id) {
                tracing::trace!(subscriber = self.id, "Subscriber removed");
            }
            #[allow(clippy::cast_precision_loss)]
            metrics::gauge!("store.subscribers.active").set(subscribers.entries.len() as f64);
        }
    }

    /// Returns `true` until [`unsubscribe`](Self::unsubscribe) has been called
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (an immutable `Rc` snapshot, replaced on change)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Subscribers (notified after every dispatch)
///
/// The store is single-threaded: it is neither `Send` nor `Sync`. Share it
/// inside one thread with `Rc<Store<..>>`.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(TodoState::default(), todo_app(), ());
///
/// store.dispatch(TodoAction::AddTodo {
///     id: TodoId::new(0),
///     text: "buy milk".to_string(),
/// })?;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: RefCell<Rc<S>>,
    reducer: R,
    environment: E,
    config: StoreConfig,
    subscribers: Rc<RefCell<Subscribers>>,
    dispatching: Cell<bool>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// Uses [`StoreConfig::default`].
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with a custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        tracing::debug!(store = %config.name, "Creating store");

        Self {
            state: RefCell::new(Rc::new(initial_state)),
            reducer,
            environment,
            config,
            subscribers: Rc::new(RefCell::new(Subscribers::default())),
            dispatching: Cell::new(false),
        }
    }

    /// Create a store whose initial state is every slice's default value
    #[must_use]
    pub fn from_reducer(reducer: R, environment: E) -> Self
    where
        S: Default,
    {
        Self::new(S::default(), reducer, environment)
    }

    /// The configuration this store was built with
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current state snapshot
    ///
    /// The returned snapshot never changes. Dispatching afterwards installs a
    /// new snapshot; holders of the old one keep seeing the old state.
    #[must_use]
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let count = store.state(|s| s.todos().len());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let snapshot = self.get_state();
        f(&snapshot)
    }

    /// Number of currently registered subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().entries.len()
    }

    /// Register a callback to run after every dispatch
    ///
    /// Callbacks run in subscription order and take no arguments; read the
    /// new state with [`get_state`](Self::get_state). A callback registered
    /// during notification first runs on the next dispatch.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.insert(Rc::new(callback));

        tracing::trace!(store = %self.config.name, subscriber = id, "Subscriber added");
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("store.subscribers.active").set(subscribers.entries.len() as f64);

        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
            active: Cell::new(true),
        }
    }

    /// Dispatch an action
    ///
    /// Runs the reducer on a copy of the current state, installs the result
    /// as the new snapshot when the reducer reports a change, then calls every
    /// subscriber. Returns once all subscribers have returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReentrantDispatch`] if called while another
    /// dispatch on this store is still running. The rejected action is not
    /// reduced and no subscriber is notified for it.
    #[tracing::instrument(skip(self, action), fields(store = %self.config.name), name = "store_dispatch")]
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        if self.dispatching.replace(true) {
            tracing::warn!("Rejected action: dispatch already in progress");
            metrics::counter!("store.dispatch.rejected").increment(1);
            return Err(StoreError::ReentrantDispatch {
                store: self.config.name.clone(),
            });
        }
        let _guard = DispatchGuard(&self.dispatching);

        metrics::counter!("store.dispatch.total").increment(1);

        let current = self.get_state();
        let mut next = S::clone(&current);

        let start = Instant::now();
        let change = self.reducer.reduce(&mut next, &action, &self.environment);
        metrics::histogram!("store.reducer.duration_seconds")
            .record(start.elapsed().as_secs_f64());

        if change.is_changed() {
            *self.state.borrow_mut() = Rc::new(next);
            tracing::debug!("Installed new state snapshot");
        } else {
            metrics::counter!("store.dispatch.unchanged").increment(1);
            tracing::debug!("Action left state unchanged");
        }

        if change.is_changed() || self.config.notify_unchanged {
            self.notify();
        }

        Ok(())
    }

    fn notify(&self) {
        // Snapshot first: callbacks may subscribe or unsubscribe while running.
        let callbacks = self.subscribers.borrow().snapshot();

        tracing::trace!("Notifying {} subscribers", callbacks.len());
        for callback in &callbacks {
            callback();
        }

        metrics::counter!("store.subscribers.notified").increment(callbacks.len() as u64);
    }
}

impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.config.name)
            .field("state", &self.state.borrow())
            .field("subscribers", &self.subscribers.borrow().entries.len())
            .finish_non_exhaustive()
    }
}
