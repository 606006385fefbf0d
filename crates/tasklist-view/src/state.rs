use serde::{Deserialize, Serialize};
use tasklist_core::tasks::{Task, TaskId};
use tracing::debug;

/// Edit mode. Being a single value, at most one task can be under edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    #[default]
    Idle,
    Editing { task_id: TaskId, draft_text: String },
}

/// Full application state for one task list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskListState {
    /// Tasks in insertion order.
    pub tasks: Vec<Task>,
    /// Pending text of the new-task input.
    pub draft_text: String,
    pub search_text: String,
    pub editing: EditState,
}

/// Every way the state can change. Variants that need fresh values carry
/// them so `apply` stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Install the bootstrap list; ignored once any task exists.
    Seed(Vec<Task>),
    SetDraft(String),
    /// Append a task built from the current draft, then clear the draft.
    Add { id: TaskId, timestamp: String },
    Toggle(TaskId),
    Delete(TaskId),
    BeginEdit(TaskId),
    UpdateEditDraft(String),
    CommitEdit { timestamp: String },
    SetSearch(String),
}

impl TaskListState {
    /// Empty list whose search box starts with `search_text`.
    pub fn with_search(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Self::default()
        }
    }

    /// Apply one transition. Total: ids that match nothing leave the tasks untouched.
    pub fn apply(mut self, transition: Transition) -> Self {
        match transition {
            Transition::Seed(tasks) => {
                if self.tasks.is_empty() {
                    self.tasks = tasks;
                } else {
                    debug!("task list already populated, skipping seed");
                }
            }
            Transition::SetDraft(text) => self.draft_text = text,
            Transition::Add { id, timestamp } => {
                let text = std::mem::take(&mut self.draft_text);
                self.tasks.push(Task::new(id, text, timestamp));
            }
            Transition::Toggle(id) => match self.task_mut(id) {
                Some(task) => task.done = !task.done,
                None => debug!(%id, "toggle ignored, no such task"),
            },
            Transition::Delete(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|task| task.id != id);
                if self.tasks.len() == before {
                    debug!(%id, "delete ignored, no such task");
                }
            }
            Transition::BeginEdit(id) => match self.task(id).map(|task| task.text.clone()) {
                Some(draft_text) => {
                    self.editing = EditState::Editing {
                        task_id: id,
                        draft_text,
                    };
                }
                None => debug!(%id, "edit ignored, no such task"),
            },
            Transition::UpdateEditDraft(text) => match &mut self.editing {
                EditState::Editing { draft_text, .. } => *draft_text = text,
                EditState::Idle => debug!("edit draft ignored, nothing under edit"),
            },
            Transition::CommitEdit { timestamp } => {
                if let EditState::Editing {
                    task_id,
                    draft_text,
                } = std::mem::take(&mut self.editing)
                {
                    match self.task_mut(task_id) {
                        Some(task) => {
                            task.text = draft_text;
                            task.timestamp = timestamp;
                        }
                        None => debug!(id = %task_id, "edited task is gone, commit dropped"),
                    }
                }
            }
            Transition::SetSearch(text) => self.search_text = text,
        }
        self
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Tasks whose text contains the search text, ignoring case.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.matches(&self.search_text))
            .collect()
    }

    /// Id of the task under edit, if any. May name a task that was deleted meanwhile.
    pub fn editing_id(&self) -> Option<TaskId> {
        match &self.editing {
            EditState::Idle => None,
            EditState::Editing { task_id, .. } => Some(*task_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use tasklist_core::tasks::demo_tasks;

    use super::*;

    fn seeded() -> TaskListState {
        TaskListState::default().apply(Transition::Seed(demo_tasks("t0")))
    }

    #[test]
    fn seed_only_applies_to_an_empty_list() {
        let state = seeded().apply(Transition::Delete(TaskId(4)));
        let state = state.apply(Transition::Seed(demo_tasks("t1")));
        assert_eq!(state.tasks.len(), 3);
    }

    #[test]
    fn add_takes_the_draft_and_clears_it() {
        let state = seeded()
            .apply(Transition::SetDraft("Write tests".into()))
            .apply(Transition::Add {
                id: TaskId(100),
                timestamp: "t5".into(),
            });
        assert_eq!(state.tasks.len(), 5);
        let added = state.tasks.last().expect("added task");
        assert_eq!(added.text, "Write tests");
        assert_eq!(added.id, TaskId(100));
        assert!(!added.done);
        assert!(state.draft_text.is_empty());
    }

    #[test]
    fn add_accepts_an_empty_draft() {
        let state = TaskListState::default().apply(Transition::Add {
            id: TaskId(1),
            timestamp: "t".into(),
        });
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "");
    }

    #[test]
    fn toggle_twice_restores_done() {
        let original = seeded();
        let toggled = original.clone().apply(Transition::Toggle(TaskId(3)));
        assert!(!toggled.task(TaskId(3)).expect("task 3").done);
        let back = toggled.apply(Transition::Toggle(TaskId(3)));
        assert_eq!(back, original);
    }

    #[test]
    fn unknown_ids_leave_state_untouched() {
        let original = seeded();
        let state = original
            .clone()
            .apply(Transition::Toggle(TaskId(99)))
            .apply(Transition::Delete(TaskId(99)))
            .apply(Transition::BeginEdit(TaskId(99)));
        assert_eq!(state, original);
    }

    #[test]
    fn begin_edit_switches_target_and_drops_previous_draft() {
        let state = seeded()
            .apply(Transition::BeginEdit(TaskId(1)))
            .apply(Transition::UpdateEditDraft("half typed".into()))
            .apply(Transition::BeginEdit(TaskId(2)));
        assert_eq!(
            state.editing,
            EditState::Editing {
                task_id: TaskId(2),
                draft_text: "Learn React".into(),
            }
        );
    }

    #[test]
    fn commit_on_deleted_task_returns_to_idle() {
        let original = seeded();
        let state = original
            .clone()
            .apply(Transition::BeginEdit(TaskId(1)))
            .apply(Transition::Delete(TaskId(1)));
        assert_eq!(state.editing_id(), Some(TaskId(1)));

        let state = state.apply(Transition::CommitEdit {
            timestamp: "t9".into(),
        });
        assert_eq!(state.editing, EditState::Idle);
        assert_eq!(state.tasks.len(), 3);
        assert!(state.tasks.iter().all(|task| task.timestamp == "t0"));
    }

    #[test]
    fn update_edit_draft_is_ignored_while_idle() {
        let state = seeded().apply(Transition::UpdateEditDraft("nope".into()));
        assert_eq!(state.editing, EditState::Idle);
    }

    #[test]
    fn filtering_is_case_insensitive_and_pure() {
        let state = seeded().apply(Transition::SetSearch("LEARN".into()));
        let texts: Vec<&str> = state
            .filtered_tasks()
            .iter()
            .map(|task| task.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Learn JavaScript", "Learn React"]);
        assert_eq!(state.tasks.len(), 4);
    }

    #[test]
    fn edit_state_serializes_with_a_tag() {
        let json = serde_json::to_value(EditState::Editing {
            task_id: TaskId(2),
            draft_text: "x".into(),
        })
        .expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"state": "editing", "task_id": 2, "draft_text": "x"})
        );
    }
}
