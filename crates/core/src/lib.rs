//! devtask-core - Developer-workflow tasks for a Go repository
//!
//! This crate provides functionality to:
//! - Describe external invocations as structured commands
//! - Plan the `test` and `lint` tasks without side effects
//! - Execute planned commands, propagating any failure unchanged
pub mod command;
pub mod error;
pub mod tasks;
pub mod workspace;

// Re-export commonly used types and traits
pub use error::{Error, Result};

pub use command::{CommandExecutor, ProcessExecutor, TaskCommand};
pub use tasks::{GOLANGCI_LINT, LintEnvironment, LintRunner, LinterRelease, Task, TestRunner};
