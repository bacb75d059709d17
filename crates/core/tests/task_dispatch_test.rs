//! Integration tests for task planning and dispatch through the public API

use devtask_core::{
    CommandExecutor, Error, GOLANGCI_LINT, LintEnvironment, LintRunner, Result, Task,
    TaskCommand, TestRunner,
};

/// Answers every lookup with a fixed path and records every run.
#[derive(Default)]
struct RecordingExecutor {
    runs: Vec<TaskCommand>,
    lookups: usize,
}

impl CommandExecutor for RecordingExecutor {
    fn run(&mut self, command: &TaskCommand) -> Result<()> {
        self.runs.push(command.clone());
        Ok(())
    }

    fn capture(&mut self, command: &TaskCommand) -> Result<String> {
        self.lookups += 1;
        match command.program.as_str() {
            "git" => Ok("/src/commatrix".to_string()),
            "go" => Ok("/home/ci/go".to_string()),
            other => panic!("unexpected lookup through {other}"),
        }
    }
}

/// Mirrors the CLI: an absent value means the default environment.
fn lint(env: Option<&str>, executor: &mut RecordingExecutor) -> Result<()> {
    let environment: LintEnvironment = env.unwrap_or("container").parse()?;
    LintRunner::new(environment).run(executor)
}

#[test]
fn test_default_lint_runs_one_container_command() {
    let mut executor = RecordingExecutor::default();
    lint(None, &mut executor).unwrap();

    assert_eq!(executor.runs.len(), 1);
    let shell = executor.runs[0].to_shell_command();
    assert!(shell.contains("golangci/golangci-lint:v1.55.2"));
    assert!(shell.contains("./..."));
    assert!(shell.contains("-v /src/commatrix:/app"));
    assert!(shell.ends_with("run --timeout 10m0s ./..."));
}

#[test]
fn test_omitted_env_matches_container() {
    let mut omitted = RecordingExecutor::default();
    let mut explicit = RecordingExecutor::default();
    lint(None, &mut omitted).unwrap();
    lint(Some("container"), &mut explicit).unwrap();

    assert_eq!(omitted.runs, explicit.runs);
}

#[test]
fn test_host_lint_installs_then_analyses() {
    let mut executor = RecordingExecutor::default();
    lint(Some("host"), &mut executor).unwrap();

    assert_eq!(executor.runs.len(), 2);

    let install = executor.runs[0].to_shell_command();
    assert!(install.contains("v1.55.2"));
    assert!(install.contains(GOLANGCI_LINT.install_script_url));
    assert!(install.contains("-b /home/ci/go/bin"));

    let analysis = executor.runs[1].to_shell_command();
    assert_eq!(analysis, "golangci-lint run --timeout 10m0s ./...");

    let mut container = RecordingExecutor::default();
    lint(None, &mut container).unwrap();
    assert!(container.runs[0].to_shell_command().ends_with(&analysis));
}

#[test]
fn test_unsupported_env_runs_nothing() {
    for env in ["bogus", "staging", ""] {
        let mut executor = RecordingExecutor::default();
        let err = lint(Some(env), &mut executor).unwrap_err();

        assert!(matches!(err, Error::UnsupportedEnvironment(_)));
        assert_eq!(err.to_string(), format!("Unsupported linter environment: {env}"));
        assert!(executor.runs.is_empty());
        assert_eq!(executor.lookups, 0);
    }
}

#[test]
fn test_test_task_is_fixed() {
    let mut executor = RecordingExecutor::default();
    TestRunner::new().run(&mut executor).unwrap();

    assert_eq!(executor.runs.len(), 1);
    assert_eq!(executor.runs[0].to_shell_command(), "go test ./pkg/...");
    assert_eq!(executor.lookups, 0);
}

#[test]
fn test_plan_json_shape() {
    let mut executor = RecordingExecutor::default();
    let plan = LintRunner::new(LintEnvironment::Host)
        .with_install_dir("/opt/go/bin")
        .plan(&mut executor)
        .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json[0]["program"], "curl");
    assert_eq!(json[0]["pipe_to"]["program"], "sh");
    assert_eq!(json[1]["program"], "golangci-lint");
    assert_eq!(executor.lookups, 0);
}
