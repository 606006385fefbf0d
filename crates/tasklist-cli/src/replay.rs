use std::{fs, io::Read, path::Path};

use color_eyre::{eyre::WrapErr, Result};
use tasklist_core::{clock::Clock, intent::Intent, location::History};
use tasklist_view::TaskListViewModel;
use tracing::{debug, info};

/// Read a script from a file, or from stdin when the path is `-`.
pub fn read_script(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("failed to read script from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

/// Dispatch every command in `script`, skipping blank lines and `#` comments.
/// Stops at the first malformed line. Returns the number of commands applied.
pub fn run_script<H: History, C: Clock>(
    vm: &mut TaskListViewModel<H, C>,
    script: &str,
) -> Result<usize> {
    let mut applied = 0;
    for (idx, line) in script.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let intent: Intent = trimmed
            .parse()
            .wrap_err_with(|| format!("line {}: `{trimmed}`", idx + 1))?;
        debug!(?intent, line = idx + 1, "dispatching");
        vm.dispatch(intent);
        applied += 1;
    }
    info!(applied, "script finished");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use tasklist_core::{
        clock::FixedClock,
        location::{MemoryHistory, SEARCH_PARAM},
        tasks::TaskId,
    };
    use tasklist_view::EditState;

    use super::*;

    fn seeded() -> TaskListViewModel<MemoryHistory, FixedClock> {
        let mut vm =
            TaskListViewModel::new(MemoryHistory::from_url("/"), FixedClock::starting_at(0));
        vm.seed_demo_tasks();
        vm
    }

    #[test]
    fn replays_the_full_scenario() {
        let script = "\
# bootstrap has ids 1-4
add Write tests
toggle 3
delete 1

edit 2
edit-draft Learn React deeply
commit
search react
";
        let mut vm = seeded();
        let applied = run_script(&mut vm, script).expect("script should run");
        assert_eq!(applied, 7);
        assert_eq!(vm.tasks().len(), 4);
        assert!(!vm.state().task(TaskId(3)).expect("task 3").done);
        assert_eq!(
            vm.state().task(TaskId(2)).expect("task 2").text,
            "Learn React deeply"
        );
        assert_eq!(vm.editing(), &EditState::Idle);
        assert_eq!(vm.history().location().query.get(SEARCH_PARAM), Some("react"));
        assert_eq!(vm.filtered_tasks().len(), 1);
    }

    #[test]
    fn stops_at_malformed_line() {
        let mut vm = seeded();
        let err = run_script(&mut vm, "toggle 1\ntoggle one\ntoggle 2\n")
            .expect_err("should fail");
        assert!(err.to_string().starts_with("line 2"));
        assert!(vm.state().task(TaskId(1)).expect("task 1").done);
        assert!(!vm.state().task(TaskId(2)).expect("task 2").done);
    }

    #[test]
    fn reads_script_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("script.txt");
        fs::write(&path, "add one\n").expect("write script");
        assert_eq!(read_script(&path).expect("read"), "add one\n");
    }
}
