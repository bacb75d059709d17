use std::process::{Child, Stdio};
use tracing::{debug, info};

use super::TaskCommand;
use crate::error::{Error, Result};

/// Runs task commands. Implemented by [`ProcessExecutor`] for real processes
/// and by scripted executors in tests.
pub trait CommandExecutor {
    /// Run a command with inherited stdio. A non-zero exit is an error.
    fn run(&mut self, command: &TaskCommand) -> Result<()>;

    /// Run a single-stage command and return its trimmed stdout.
    fn capture(&mut self, command: &TaskCommand) -> Result<String>;
}

/// Spawns real child processes.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn run(&mut self, command: &TaskCommand) -> Result<()> {
        let shell_cmd = command.to_shell_command();
        if command.echo {
            println!("{shell_cmd}");
        }
        info!("Running: {}", shell_cmd);

        let stages = command.stages();
        let mut children: Vec<(&TaskCommand, Child)> = Vec::with_capacity(stages.len());
        let mut upstream = None;

        for (i, stage) in stages.iter().copied().enumerate() {
            let mut cmd = stage.to_process();
            if let Some(stdout) = upstream.take() {
                cmd.stdin(Stdio::from(stdout));
            }
            if i + 1 < stages.len() {
                cmd.stdout(Stdio::piped());
            }

            match cmd.spawn() {
                Ok(mut child) => {
                    upstream = child.stdout.take();
                    children.push((stage, child));
                }
                Err(source) => {
                    for (_, mut child) in children {
                        let _ = child.kill();
                        let _ = child.wait();
                    }
                    return Err(Error::SpawnError {
                        program: stage.program.clone(),
                        source,
                    });
                }
            }
        }

        // Wait for every stage before reporting, so none is left behind.
        let mut failure = None;
        let mut wait_error = None;
        for (stage, mut child) in children {
            match child.wait() {
                Ok(status) => {
                    debug!("`{}` finished with {}", stage.program, status);
                    if !status.success() && failure.is_none() {
                        failure = Some(status.code());
                    }
                }
                Err(err) => {
                    wait_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = wait_error {
            return Err(Error::IoError(err));
        }

        match failure {
            Some(code) => Err(Error::CommandFailed {
                command: shell_cmd,
                code,
            }),
            None => Ok(()),
        }
    }

    fn capture(&mut self, command: &TaskCommand) -> Result<String> {
        let shell_cmd = command.to_shell_command();
        debug!("Capturing: {}", shell_cmd);

        let output = command
            .to_process()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::SpawnError {
                program: command.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                debug!("`{}` stderr: {}", shell_cmd, stderr.trim());
            }
            return Err(Error::CommandFailed {
                command: shell_cmd,
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        let mut executor = ProcessExecutor::new();
        assert!(executor.run(&TaskCommand::new("true", Vec::<String>::new())).is_ok());
    }

    #[test]
    fn test_run_propagates_exit_code() {
        let mut executor = ProcessExecutor::new();
        let err = executor
            .run(&TaskCommand::new("sh", ["-c", "exit 3"]))
            .unwrap_err();

        match err {
            Error::CommandFailed { command, code } => {
                assert_eq!(command, "sh -c 'exit 3'");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_missing_program() {
        let mut executor = ProcessExecutor::new();
        let err = executor
            .run(&TaskCommand::new("devtask-no-such-program", Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(err, Error::SpawnError { ref program, .. } if program == "devtask-no-such-program"));
    }

    #[test]
    fn test_pipeline_success() {
        let mut executor = ProcessExecutor::new();
        let cmd = TaskCommand::new("echo", ["hello"]).pipe_into(TaskCommand::new("grep", ["-q", "hello"]));
        assert!(executor.run(&cmd).is_ok());
    }

    #[test]
    fn test_pipeline_fails_when_upstream_fails() {
        let mut executor = ProcessExecutor::new();
        let cmd = TaskCommand::new("false", Vec::<String>::new())
            .pipe_into(TaskCommand::new("cat", Vec::<String>::new()));

        let err = executor.run(&cmd).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn test_pipeline_fails_when_downstream_fails() {
        let mut executor = ProcessExecutor::new();
        let cmd = TaskCommand::new("echo", ["hello"]).pipe_into(TaskCommand::new("grep", ["-q", "absent"]));
        assert!(matches!(
            executor.run(&cmd).unwrap_err(),
            Error::CommandFailed { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_pipeline_waits_for_every_stage() {
        let mut executor = ProcessExecutor::new();
        let cmd = TaskCommand::new("sh", ["-c", "sleep 0.2; exit 4"])
            .pipe_into(TaskCommand::new("false", Vec::<String>::new()));

        // The slow first stage is reported, so it was waited on even though
        // the last stage exited first.
        assert!(matches!(
            executor.run(&cmd).unwrap_err(),
            Error::CommandFailed { code: Some(4), .. }
        ));
    }

    #[test]
    fn test_capture_trims_stdout() {
        let mut executor = ProcessExecutor::new();
        let out = executor
            .capture(&TaskCommand::new("printf", ["  /work/repo\n"]))
            .unwrap();
        assert_eq!(out, "/work/repo");
    }

    #[test]
    fn test_capture_failure() {
        let mut executor = ProcessExecutor::new();
        let err = executor
            .capture(&TaskCommand::new("sh", ["-c", "echo nope >&2; exit 128"]))
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { code: Some(128), .. }));
    }

    #[test]
    fn test_working_dir_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = ProcessExecutor::new();
        let out = executor
            .capture(&TaskCommand::new("pwd", Vec::<String>::new()).with_working_dir(dir.path()))
            .unwrap();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(&out).canonicalize().unwrap(), expected);
    }
}
