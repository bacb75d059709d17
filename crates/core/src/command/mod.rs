//! Command descriptors and their execution

pub mod executor;
pub mod task_command;

// Re-export commonly used types
pub use executor::{CommandExecutor, ProcessExecutor};
pub use task_command::{TaskCommand, shell_quote};
