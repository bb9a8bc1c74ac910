//! # Statefold Runtime
//!
//! Runtime implementation for the Statefold architecture.
//!
//! This crate provides the [`Store`]: the single owner of application state.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current state snapshot, runs the root reducer for
//!   every dispatched action and notifies subscribers
//! - **Subscription**: Capability returned by `subscribe` that removes the
//!   callback again
//! - **`StoreConfig`**: Naming and notification policy
//!
//! ## Execution Model
//!
//! Everything runs synchronously on the caller's thread. `dispatch` reduces,
//! installs the new snapshot and calls every subscriber before it returns, so
//! subscribers observe states strictly in dispatch order. A dispatch started
//! while another one is still running (for example from inside a subscriber)
//! is rejected with [`StoreError::ReentrantDispatch`].
//!
//! ## Example
//!
//! ```ignore
//! use statefold_runtime::Store;
//!
//! let store = Store::from_reducer(my_reducer, environment);
//!
//! let subscription = store.subscribe(|| println!("state changed"));
//!
//! // Send an action
//! store.dispatch(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//!
//! subscription.unsubscribe();
//! ```

/// Metric descriptions for the store
pub mod metrics;

/// Store runtime: state snapshots, dispatch and subscriptions
pub mod store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[non_exhaustive]
    pub enum StoreError {
        /// `dispatch` was called while another dispatch was still running
        ///
        /// This happens when a subscriber (or anything it calls) dispatches
        /// during notification. The nested action is dropped and the state is
        /// left as the outer dispatch produced it.
        #[error("Reentrant dispatch rejected: store `{store}` is already dispatching")]
        ReentrantDispatch {
            /// Name of the store that rejected the action
            store: String,
        },
    }
}

/// Store configuration
///
/// # Example
///
/// ```
/// use statefold_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("todos")
///     .with_notify_unchanged(false);
///
/// assert_eq!(config.name, "todos");
/// assert!(!config.notify_unchanged);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name used in log spans and error messages
    pub name: String,
    /// Notify subscribers even when the reducer reported no change
    ///
    /// Defaults to `true`: every dispatch notifies every subscriber.
    pub notify_unchanged: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(name: impl Into<String>, notify_unchanged: bool) -> Self {
        Self {
            name: name.into(),
            notify_unchanged,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether subscribers are notified after a no-op dispatch
    #[must_use]
    pub const fn with_notify_unchanged(mut self, notify: bool) -> Self {
        self.notify_unchanged = notify;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            notify_unchanged: true,
        }
    }
}

pub use error::StoreError;
pub use store::{Store, Subscription};
