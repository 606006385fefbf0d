//! View-model for the task list: explicit state, pure transitions, and the
//! owner that mints ids and keeps the page location in sync.

pub mod state;
pub mod view_model;

pub use state::{EditState, TaskListState, Transition};
pub use view_model::TaskListViewModel;
