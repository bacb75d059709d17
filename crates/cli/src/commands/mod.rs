pub mod lint;

pub use lint::lint_command;
pub use test::test_command;

use anyhow::{Context, Result};
use devtask_core::{ProcessExecutor, Task};
use tracing::debug;

use crate::display::print_plan;

/// How a task's commands are reported
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// Plan only; never start the task's commands
    pub dry_run: bool,
    /// Emit the plan as JSON instead of a breakdown
    pub json: bool,
}

/// Plan or run `task` against real processes.
pub fn run_task(task: &dyn Task, mode: OutputMode) -> Result<()> {
    let mut executor = ProcessExecutor::new();

    if mode.dry_run {
        let commands = task
            .plan(&mut executor)
            .with_context(|| format!("Failed to plan `{}`", task.name()))?;
        debug!("Dry run of `{}`: {} command(s)", task.name(), commands.len());

        if mode.json {
            println!("{}", serde_json::to_string_pretty(&commands)?);
        } else {
            print_plan(task.name(), &commands);
        }
        return Ok(());
    }

    task.run(&mut executor)
        .with_context(|| format!("Task `{}` failed", task.name()))
}
