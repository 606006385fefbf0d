use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Description given to tasks created through the new-task input.
pub const DEFAULT_DESCRIPTION: &str = "New task description";

/// Task identity. Unique within a task list for its whole lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// Task entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub description: String,
    pub done: bool,
    /// Last-modified time, already formatted for display.
    pub timestamp: String,
}

impl Task {
    /// A fresh, not-yet-done task with the placeholder description.
    pub fn new(id: TaskId, text: String, timestamp: String) -> Self {
        Self {
            id,
            text,
            description: DEFAULT_DESCRIPTION.to_string(),
            done: false,
            timestamp,
        }
    }

    /// Case-insensitive substring match against the task text.
    pub fn matches(&self, query: &str) -> bool {
        self.text.to_lowercase().contains(&query.to_lowercase())
    }
}

/// The fixed bootstrap list installed when the view first mounts.
pub fn demo_tasks(timestamp: &str) -> Vec<Task> {
    let seed = [
        (1, "Learn JavaScript", "Basics of JS", false),
        (2, "Learn React", "React components and state", false),
        (3, "Play around in JSFiddle", "Experimenting with JSFiddle", true),
        (
            4,
            "Build something awesome",
            "Create a project with JS and React",
            true,
        ),
    ];
    seed.into_iter()
        .map(|(id, text, description, done)| Task {
            id: TaskId(id),
            text: text.to_string(),
            description: description.to_string(),
            done,
            timestamp: timestamp.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_open_with_placeholder_description() {
        let task = Task::new(TaskId(7), "Write tests".into(), "now".into());
        assert!(!task.done);
        assert_eq!(task.description, DEFAULT_DESCRIPTION);
        assert_eq!(task.timestamp, "now");
    }

    #[test]
    fn matching_ignores_case() {
        let task = Task::new(TaskId(1), "Learn JavaScript".into(), String::new());
        assert!(task.matches("LEARN"));
        assert!(task.matches("script"));
        assert!(task.matches(""));
        assert!(!task.matches("react"));
    }

    #[test]
    fn demo_tasks_have_ids_one_to_four_with_two_done() {
        let tasks = demo_tasks("t0");
        let ids: Vec<u64> = tasks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(tasks.iter().filter(|t| t.done).count(), 2);
        assert!(tasks[2].done);
        assert_eq!(tasks[1].text, "Learn React");
    }

    #[test]
    fn task_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&TaskId(42)).expect("serialize");
        assert_eq!(json, "42");
        assert_eq!(" 42 ".parse::<TaskId>().expect("parse"), TaskId(42));
        assert!("forty-two".parse::<TaskId>().is_err());
    }
}
