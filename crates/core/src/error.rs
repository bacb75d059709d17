use std::io;

/// Errors that can occur while planning or running a task
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported linter environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Failed to start `{program}`: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Process exit status the CLI should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedEnvironment(_) => 2,
            Error::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type alias for devtask operations
pub type Result<T> = std::result::Result<T, Error>;
