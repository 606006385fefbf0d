use tasklist_core::{
    clock::Clock,
    intent::Intent,
    location::{History, SEARCH_PARAM},
    tasks::{demo_tasks, Task, TaskId},
};
use tracing::{debug, info, instrument};

use crate::state::{EditState, TaskListState, Transition};

/// Owns the task list state and the page history; the only way to change either.
///
/// Every operation is total: ids that match nothing are ignored, and no text
/// is rejected.
pub struct TaskListViewModel<H: History, C: Clock> {
    state: TaskListState,
    history: H,
    clock: C,
    /// Highest id ever handed out or seeded.
    last_id: u64,
}

impl<H: History, C: Clock> TaskListViewModel<H, C> {
    /// Build an empty list, hydrating the search box from the current location.
    pub fn new(history: H, clock: C) -> Self {
        let search_text = history
            .location()
            .query
            .get(SEARCH_PARAM)
            .unwrap_or_default()
            .to_string();
        debug!(%search_text, "hydrated search from location");
        Self {
            state: TaskListState::with_search(search_text),
            history,
            clock,
            last_id: 0,
        }
    }

    pub fn state(&self) -> &TaskListState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn editing(&self) -> &EditState {
        &self.state.editing
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.state.filtered_tasks()
    }

    /// One-time mount bootstrap with the four demo tasks. No-op once tasks exist.
    #[instrument(skip(self))]
    pub fn seed_demo_tasks(&mut self) {
        let timestamp = self.clock.timestamp();
        self.transition(Transition::Seed(demo_tasks(&timestamp)));
        self.bump_last_id();
    }

    #[instrument(skip(self))]
    pub fn set_draft_text(&mut self, text: String) {
        self.transition(Transition::SetDraft(text));
    }

    /// Append a task with `draft_text`, clearing the draft.
    #[instrument(skip(self))]
    pub fn add_task(&mut self, draft_text: String) -> &[Task] {
        self.transition(Transition::SetDraft(draft_text));
        let id = self.next_id();
        let timestamp = self.clock.timestamp();
        self.transition(Transition::Add { id, timestamp });
        info!(%id, count = self.state.tasks.len(), "task added");
        &self.state.tasks
    }

    #[instrument(skip(self))]
    pub fn toggle_done(&mut self, id: TaskId) {
        self.transition(Transition::Toggle(id));
    }

    /// Remove a task. An edit targeting it stays open and later commits to nothing.
    #[instrument(skip(self))]
    pub fn delete_task(&mut self, id: TaskId) {
        self.transition(Transition::Delete(id));
    }

    #[instrument(skip(self))]
    pub fn begin_edit(&mut self, id: TaskId) {
        self.transition(Transition::BeginEdit(id));
    }

    #[instrument(skip(self))]
    pub fn update_edit_draft(&mut self, text: String) {
        self.transition(Transition::UpdateEditDraft(text));
    }

    #[instrument(skip(self))]
    pub fn commit_edit(&mut self) {
        let timestamp = self.clock.timestamp();
        self.transition(Transition::CommitEdit { timestamp });
    }

    /// Update the search text and push it into the `search` query parameter.
    #[instrument(skip(self))]
    pub fn set_search_text(&mut self, text: String) {
        let location = self.history.location();
        let mut query = location.query.clone();
        if text.is_empty() {
            query.delete(SEARCH_PARAM);
        } else {
            query.set(SEARCH_PARAM, &text);
        }
        let next = location.with_query(query);
        self.transition(Transition::SetSearch(text));
        self.history.push(next);
    }

    /// Route a user event to its operation.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SetDraft(text) => self.set_draft_text(text),
            Intent::Add(text) => {
                let text = text.unwrap_or_else(|| self.state.draft_text.clone());
                self.add_task(text);
            }
            Intent::Toggle(id) => self.toggle_done(id),
            Intent::Delete(id) => self.delete_task(id),
            Intent::BeginEdit(id) => self.begin_edit(id),
            Intent::UpdateEditDraft(text) => self.update_edit_draft(text),
            Intent::CommitEdit => self.commit_edit(),
            Intent::Search(text) => self.set_search_text(text),
        }
    }

    fn transition(&mut self, transition: Transition) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(transition);
    }

    /// Time-derived, but strictly above every id seen so far.
    fn next_id(&mut self) -> TaskId {
        let id = self.clock.now_millis().max(self.last_id + 1);
        self.last_id = id;
        TaskId(id)
    }

    fn bump_last_id(&mut self) {
        if let Some(max) = self.state.tasks.iter().map(|task| task.id.0).max() {
            self.last_id = self.last_id.max(max);
        }
    }
}
