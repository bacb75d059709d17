//! Developer-workflow tasks

pub mod lint;

pub use lint::{GOLANGCI_LINT, LintEnvironment, LintRunner, LinterRelease};
pub use test::TestRunner;

use tracing::debug;

use crate::command::{CommandExecutor, TaskCommand};
use crate::error::Result;

/// A named, independently invocable unit of workflow automation
pub trait Task {
    /// Name the task is invoked by
    fn name(&self) -> &'static str;

    /// Build the commands this task would run, in order. May consult the
    /// executor for read-only lookups but never runs anything.
    fn plan(&self, executor: &mut dyn CommandExecutor) -> Result<Vec<TaskCommand>>;

    /// Plan, then run each command in order, stopping at the first failure.
    fn run(&self, executor: &mut dyn CommandExecutor) -> Result<()> {
        let commands = self.plan(executor)?;
        debug!("Task `{}` planned {} command(s)", self.name(), commands.len());

        for command in &commands {
            executor.run(command)?;
        }
        Ok(())
    }
}
