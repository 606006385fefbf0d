//! Core types for the task list: tasks, user intents, the clock, and the page
//! location the search box is mirrored into.

pub mod clock;
pub mod intent;
pub mod location;
pub mod tasks;
