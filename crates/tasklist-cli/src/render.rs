use std::fmt::Write as _;

use color_eyre::Result;
use tasklist_core::{clock::Clock, location::History, tasks::Task};
use tasklist_view::{EditState, TaskListViewModel};

/// Plain-text listing of the filtered tasks followed by the edit box and location.
pub fn plain<H: History, C: Clock>(vm: &TaskListViewModel<H, C>) -> Result<String> {
    let mut out = String::new();
    write_plain(&mut out, vm)?;
    Ok(out)
}

fn write_plain<H: History, C: Clock>(
    out: &mut String,
    vm: &TaskListViewModel<H, C>,
) -> std::fmt::Result {
    let tasks = vm.filtered_tasks();
    if tasks.is_empty() {
        writeln!(out, "No matching tasks.")?;
    }
    for (idx, task) in tasks.iter().enumerate() {
        write_task(out, idx + 1, task)?;
    }
    if let EditState::Editing {
        task_id,
        draft_text,
    } = vm.editing()
    {
        writeln!(out, "editing #{task_id}: {draft_text}")?;
    }
    writeln!(out, "location: {}", vm.history().location())
}

fn write_task(out: &mut String, position: usize, task: &Task) -> std::fmt::Result {
    let mark = if task.done { "x" } else { " " };
    writeln!(out, "{position}. [{mark}] {} (#{})", task.text, task.id)?;
    writeln!(out, "    {}", task.description)?;
    writeln!(out, "    {}", task.timestamp)
}

/// Full view-model state as pretty JSON.
pub fn json<H: History, C: Clock>(vm: &TaskListViewModel<H, C>) -> Result<String> {
    Ok(serde_json::to_string_pretty(vm.state())?)
}
