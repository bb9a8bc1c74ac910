//! View layer: renders the state tree and turns user gestures into actions.
//!
//! [`render`] is a pure function from [`TodoState`] to a [`Frame`]. A
//! [`TodoView`] paints frames onto a [`Surface`] and re-renders every time
//! the store notifies it.
//!
//! The text form of a frame looks like this:
//!
//! ```text
//! [________] [Add Todo]
//!   #0 [x] b̶u̶y̶ ̶m̶i̶l̶k̶
//!   #1 [ ] walk dog
//! Show: All, [Active], [Completed]
//! ```
//!
//! Completed items are struck through. In the footer the selected filter is
//! plain text and the other filters are bracketed links.

use crate::error::ViewError;
use crate::reducer::TodoStore;
use crate::types::{TodoAction, TodoId, TodoItem, TodoState, VisibilityFilter};
use statefold_core::environment::IdGenerator;
use statefold_runtime::Subscription;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write;
use std::rc::Rc;

/// The items `filter` lets through, in list order
#[must_use]
pub fn visible_todos(todos: &[TodoItem], filter: VisibilityFilter) -> Vec<&TodoItem> {
    todos.iter().filter(|item| filter.matches(item)).collect()
}

/// One rendered list entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Item the row toggles when clicked
    pub id: TodoId,
    /// Item text
    pub text: String,
    /// Drawn struck through when true
    pub completed: bool,
}

/// One footer entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterLink {
    /// Filter selected by clicking the link
    pub filter: VisibilityFilter,
    /// The selected filter is drawn as plain text, not as a link
    pub active: bool,
}

/// Everything the view shows for one state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Visible items
    pub rows: Vec<Row>,
    /// Footer links, in fixed order
    pub filters: Vec<FilterLink>,
}

impl Frame {
    /// Text form of the frame, optionally prefixing rows with their ids
    #[must_use]
    pub fn to_text(&self, show_ids: bool) -> String {
        let mut out = String::from("[________] [Add Todo]\n");

        for row in &self.rows {
            let mark = if row.completed { 'x' } else { ' ' };
            let text = if row.completed {
                strike_through(&row.text)
            } else {
                row.text.clone()
            };
            if show_ids {
                let _ = writeln!(out, "  #{} [{mark}] {text}", row.id);
            } else {
                let _ = writeln!(out, "  [{mark}] {text}");
            }
        }

        let links: Vec<String> = self
            .filters
            .iter()
            .map(|link| {
                if link.active {
                    link.filter.label().to_string()
                } else {
                    format!("[{}]", link.filter.label())
                }
            })
            .collect();
        let _ = write!(out, "Show: {}", links.join(", "));

        out
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(true))
    }
}

fn strike_through(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

/// Render the whole application for `state`
#[must_use]
pub fn render(state: &TodoState) -> Frame {
    let filter = state.visibility_filter();

    let rows = visible_todos(state.todos(), filter)
        .into_iter()
        .map(|item| Row {
            id: item.id(),
            text: item.text().to_string(),
            completed: item.is_completed(),
        })
        .collect();

    let filters = VisibilityFilter::ALL
        .into_iter()
        .map(|link| FilterLink {
            filter: link,
            active: link == filter,
        })
        .collect();

    Frame { rows, filters }
}

/// A display target addressed by mount point name
pub trait Surface {
    /// Replace whatever is shown at `mount_point` with `content`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the surface cannot be written.
    fn paint(&mut self, mount_point: &str, content: &str) -> std::io::Result<()>;
}

/// Surface that writes every frame to an [`std::io::Write`] sink
#[derive(Debug)]
pub struct WriterSurface<W: Write> {
    writer: W,
}

impl<W: Write> WriterSurface<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for WriterSurface<W> {
    fn paint(&mut self, mount_point: &str, content: &str) -> std::io::Result<()> {
        writeln!(self.writer, "--- {mount_point} ---")?;
        writeln!(self.writer, "{content}")?;
        self.writer.flush()
    }
}

/// Surface that keeps the last frame painted at each mount point
///
/// Clones share the same frames, so a test can keep one handle while the
/// view owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    frames: Rc<RefCell<HashMap<String, String>>>,
    paints: Rc<Cell<usize>>,
}

impl MemorySurface {
    /// Create an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content last painted at `mount_point`
    #[must_use]
    pub fn content(&self, mount_point: &str) -> Option<String> {
        self.frames.borrow().get(mount_point).cloned()
    }

    /// Total number of paints across all mount points
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.paints.get()
    }
}

impl Surface for MemorySurface {
    fn paint(&mut self, mount_point: &str, content: &str) -> std::io::Result<()> {
        self.frames
            .borrow_mut()
            .insert(mount_point.to_string(), content.to_string());
        self.paints.set(self.paints.get() + 1);
        Ok(())
    }
}

/// View configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Mount point the view paints to
    pub mount_point: String,
    /// Prefix rows with their ids
    pub show_ids: bool,
}

impl ViewConfig {
    /// Set the mount point
    #[must_use]
    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = mount_point.into();
        self
    }

    /// Set whether row ids are shown
    #[must_use]
    pub const fn with_show_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mount_point: "root".to_string(),
            show_ids: true,
        }
    }
}

/// The to-do application view
///
/// Holds the store it renders, the id generator used for new items and the
/// surface it paints to. Gestures dispatch actions; painting happens in the
/// store subscription set up by [`mount`](Self::mount).
pub struct TodoView {
    store: Rc<TodoStore>,
    ids: Box<dyn IdGenerator>,
    surface: RefCell<Box<dyn Surface>>,
    config: ViewConfig,
}

impl TodoView {
    /// Create a view over `store`
    #[must_use]
    pub fn new(
        store: Rc<TodoStore>,
        ids: Box<dyn IdGenerator>,
        surface: Box<dyn Surface>,
        config: ViewConfig,
    ) -> Self {
        Self {
            store,
            ids,
            surface: RefCell::new(surface),
            config,
        }
    }

    /// The store this view renders
    #[must_use]
    pub const fn store(&self) -> &Rc<TodoStore> {
        &self.store
    }

    /// The view configuration
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Subscribe to the store and paint the current state once
    ///
    /// The subscription only holds a weak reference to the view; once the
    /// view is dropped, notifications are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Surface`] if the first paint fails. The
    /// subscription is removed again in that case.
    pub fn mount(self: &Rc<Self>) -> Result<Subscription, ViewError> {
        let view = Rc::downgrade(self);
        let subscription = self.store.subscribe(move || {
            if let Some(view) = view.upgrade() {
                if let Err(error) = view.render() {
                    tracing::error!(%error, "Re-render failed");
                }
            }
        });

        if let Err(error) = self.render() {
            subscription.unsubscribe();
            return Err(error);
        }

        tracing::debug!(mount_point = %self.config.mount_point, "View mounted");
        Ok(subscription)
    }

    /// Paint the current state and return the frame that was painted
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Surface`] if the surface cannot be written.
    pub fn render(&self) -> Result<Frame, ViewError> {
        let state = self.store.get_state();
        let frame = render(&state);

        self.surface
            .borrow_mut()
            .paint(&self.config.mount_point, &frame.to_text(self.config.show_ids))?;

        tracing::trace!(rows = frame.rows.len(), "Rendered frame");
        Ok(frame)
    }

    /// Submit new item text; the text is stored as typed, not trimmed
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::IdsExhausted`] if no id is left for the new
    /// item, or [`ViewError::Store`] if the store rejects the dispatch.
    pub fn add_todo(&self, text: impl Into<String>) -> Result<TodoId, ViewError> {
        let id = TodoId::generate(self.ids.as_ref()).ok_or(ViewError::IdsExhausted)?;
        self.dispatch(TodoAction::add(id, text))?;
        Ok(id)
    }

    /// Click on an item
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Store`] if the store rejects the dispatch.
    pub fn toggle_todo(&self, id: TodoId) -> Result<(), ViewError> {
        self.dispatch(TodoAction::toggle(id))
    }

    /// Click on a footer filter link
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Store`] if the store rejects the dispatch.
    pub fn set_filter(&self, filter: VisibilityFilter) -> Result<(), ViewError> {
        self.dispatch(TodoAction::set_filter(filter))
    }

    /// Dispatch an arbitrary action
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Store`] if the store rejects the dispatch.
    pub fn dispatch(&self, action: TodoAction) -> Result<(), ViewError> {
        tracing::debug!(action = action.action_type(), "Dispatching");
        self.store.dispatch(action)?;
        Ok(())
    }
}

impl std::fmt::Debug for TodoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoView")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
