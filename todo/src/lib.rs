//! To-do list built on the Statefold architecture.
//!
//! One immutable state tree, two slice reducers and a view that re-renders
//! after every dispatch:
//!
//! - Simple domain model (add and toggle todos, choose a visibility filter)
//! - JSON action records with a `type` discriminant
//! - Reducers composed with `scope_reducer` and `combine_reducers`
//! - A view that paints text frames onto a mount point
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use statefold_core::environment::SequentialIdGenerator;
//! use todo_app::{create_store, MemorySurface, TodoView, ViewConfig, VisibilityFilter};
//!
//! # fn main() -> Result<(), todo_app::ViewError> {
//! let store = Rc::new(create_store());
//! let surface = MemorySurface::new();
//! let view = Rc::new(TodoView::new(
//!     Rc::clone(&store),
//!     Box::new(SequentialIdGenerator::new()),
//!     Box::new(surface.clone()),
//!     ViewConfig::default(),
//! ));
//! let _subscription = view.mount()?;
//!
//! let milk = view.add_todo("buy milk")?;
//! view.add_todo("walk dog")?;
//! view.toggle_todo(milk)?;
//! view.set_filter(VisibilityFilter::ShowCompleted)?;
//!
//! let frame = view.render()?;
//! assert_eq!(frame.rows.len(), 1);
//! assert_eq!(frame.rows[0].text, "buy milk");
//! assert!(surface.content("root").is_some());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod error;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use command::Command;
pub use error::{ActionError, CommandError, ParseFilterError, ViewError};
pub use reducer::{
    TodoAppReducer, TodoStore, TodosReducer, VisibilityFilterReducer, create_store,
    create_store_with_config, reduce, todo_app,
};
pub use types::{TodoAction, TodoId, TodoItem, TodoState, VisibilityFilter};
pub use view::{
    FilterLink, Frame, MemorySurface, Row, Surface, TodoView, ViewConfig, WriterSurface, render,
    visible_todos,
};
