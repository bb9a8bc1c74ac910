//! Domain types for the to-do list.
//!
//! The state tree is deliberately small: an ordered list of items plus the
//! currently selected visibility filter. Items are immutable values; the only
//! way to get a different item is to build a new one.

use crate::error::{ActionError, ParseFilterError};
use serde::{Deserialize, Serialize};
use statefold_core::environment::IdGenerator;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Takes the next id from `ids`, or `None` if it has none left
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Option<Self> {
        ids.next_id().map(Self)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    id: TodoId,
    text: String,
    completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Text as it was entered
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the item is completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// A copy of this item with `completed` inverted
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Which items the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    /// Every item
    #[default]
    ShowAll,
    /// Items that are not completed
    ShowActive,
    /// Items that are completed
    ShowCompleted,
}

impl VisibilityFilter {
    /// All filters, in footer order
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    /// Label shown in the footer
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }

    /// Whether an item passes this filter
    #[must_use]
    pub const fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::ShowAll => true,
            Self::ShowActive => !item.completed,
            Self::ShowCompleted => item.completed,
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for VisibilityFilter {
    type Err = ParseFilterError;

    /// Accepts footer labels (`all`, `active`, `completed`, any case) and
    /// wire names (`SHOW_ALL`, `SHOW_ACTIVE`, `SHOW_COMPLETED`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "show_all" => Ok(Self::ShowAll),
            "active" | "show_active" => Ok(Self::ShowActive),
            "completed" | "show_completed" => Ok(Self::ShowCompleted),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// State of the whole application
///
/// Items keep insertion order and are never removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    pub(crate) todos: Vec<TodoItem>,
    pub(crate) visibility_filter: VisibilityFilter,
}

impl TodoState {
    /// Creates a new empty state showing all items
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All items in insertion order
    #[must_use]
    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    /// The selected filter
    #[must_use]
    pub const fn visibility_filter(&self) -> VisibilityFilter {
        self.visibility_filter
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == id)
    }
}

/// Actions that can be dispatched to the store
///
/// The JSON form carries a `type` discriminant next to the payload fields:
///
/// ```json
/// {"type": "ADD_TODO", "id": 0, "text": "buy milk"}
/// {"type": "TOGGLE_TODO", "id": 0}
/// {"type": "SET_VISIBILITY_FILTER", "filter": "SHOW_COMPLETED"}
/// ```
///
/// Any other `type` decodes to [`TodoAction::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new item
    AddTodo {
        /// Identifier chosen by the dispatcher
        id: TodoId,
        /// Item text, stored verbatim
        text: String,
    },

    /// Flip the completed flag of an item
    ToggleTodo {
        /// Item to toggle
        id: TodoId,
    },

    /// Select which items are shown
    SetVisibilityFilter {
        /// New filter
        filter: VisibilityFilter,
    },

    /// An action type this application does not know; always a no-op
    #[serde(other)]
    Unknown,
}

impl TodoAction {
    /// Build an `ADD_TODO` action
    #[must_use]
    pub fn add(id: TodoId, text: impl Into<String>) -> Self {
        Self::AddTodo {
            id,
            text: text.into(),
        }
    }

    /// Build a `TOGGLE_TODO` action
    #[must_use]
    pub const fn toggle(id: TodoId) -> Self {
        Self::ToggleTodo { id }
    }

    /// Build a `SET_VISIBILITY_FILTER` action
    #[must_use]
    pub const fn set_filter(filter: VisibilityFilter) -> Self {
        Self::SetVisibilityFilter { filter }
    }

    /// The wire discriminant of this action
    #[must_use]
    pub const fn action_type(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => "ADD_TODO",
            Self::ToggleTodo { .. } => "TOGGLE_TODO",
            Self::SetVisibilityFilter { .. } => "SET_VISIBILITY_FILTER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Decode an action record from JSON
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Malformed`] if the record is not valid JSON, is
    /// missing the `type` field or a payload field its type requires, or
    /// carries a filter value outside the known set.
    pub fn from_json(json: &str) -> Result<Self, ActionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this action as a JSON record
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ActionError> {
        Ok(serde_json::to_string(self)?)
    }
}
