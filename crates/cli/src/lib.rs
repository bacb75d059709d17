pub mod cli;
pub mod commands;
pub mod display;

// Re-export commonly used items
pub use cli::{Cli, Commands};

/// Exit status for a failed invocation: the child's own code for command
/// failures, 2 for configuration errors, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<devtask_core::Error>())
        .map_or(1, devtask_core::Error::exit_code)
}
