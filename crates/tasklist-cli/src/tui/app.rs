use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasklist_core::{clock::Clock, intent::Intent, location::History, tasks::TaskId};
use tasklist_view::{EditState, TaskListViewModel};

/// Input box or list that receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    NewTask,
    List,
    Edit,
}

/// Terminal-side state around the view-model: focus and list selection.
pub struct App<H: History, C: Clock> {
    pub vm: TaskListViewModel<H, C>,
    pub focus: Focus,
    /// Index into the filtered list.
    pub selected: usize,
    pub should_quit: bool,
}

impl<H: History, C: Clock> App<H, C> {
    pub fn new(vm: TaskListViewModel<H, C>) -> Self {
        Self {
            vm,
            focus: Focus::List,
            selected: 0,
            should_quit: false,
        }
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.vm
            .filtered_tasks()
            .get(self.selected)
            .map(|task| task.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Tab => self.focus = self.next_focus(),
            KeyCode::Esc if self.focus == Focus::List => self.should_quit = true,
            KeyCode::Esc => self.focus = Focus::List,
            _ => match self.focus {
                Focus::Search => self.search_key(key.code),
                Focus::NewTask => self.new_task_key(key.code),
                Focus::List => self.list_key(key.code),
                Focus::Edit => self.edit_key(key.code),
            },
        }
        self.clamp_selection();
    }

    fn next_focus(&self) -> Focus {
        let editing = self.vm.state().editing_id().is_some();
        match self.focus {
            Focus::Search => Focus::NewTask,
            Focus::NewTask if editing => Focus::Edit,
            Focus::NewTask | Focus::Edit => Focus::List,
            Focus::List => Focus::Search,
        }
    }

    fn search_key(&mut self, code: KeyCode) {
        if let Some(text) = edited(&self.vm.state().search_text, code) {
            self.vm.dispatch(Intent::Search(text));
        }
    }

    fn new_task_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.vm.dispatch(Intent::Add(None));
            return;
        }
        if let Some(text) = edited(&self.vm.state().draft_text, code) {
            self.vm.dispatch(Intent::SetDraft(text));
        }
    }

    fn list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.selected += 1,
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.vm.dispatch(Intent::Toggle(id));
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.vm.dispatch(Intent::BeginEdit(id));
                    self.focus = Focus::Edit;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.vm.dispatch(Intent::Delete(id));
                }
            }
            _ => {}
        }
    }

    fn edit_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.vm.dispatch(Intent::CommitEdit);
            self.focus = Focus::List;
            return;
        }
        let text = match self.vm.editing() {
            EditState::Editing { draft_text, .. } => edited(draft_text, code),
            EditState::Idle => None,
        };
        if let Some(text) = text {
            self.vm.dispatch(Intent::UpdateEditDraft(text));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.vm.filtered_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Apply a text-input keystroke, or `None` if the key does not edit text.
fn edited(current: &str, code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => {
            let mut text = current.to_string();
            text.push(c);
            Some(text)
        }
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop()?;
            Some(text)
        }
        _ => None,
    }
}
