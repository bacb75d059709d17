use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// A single external invocation, kept in argument-list form.
///
/// A command may be chained to a follow-up stage with [`TaskCommand::pipe_into`];
/// the stdout of each stage then feeds the stdin of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCommand {
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
    /// Print the shell rendering before running it
    pub echo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipe_to: Option<Box<TaskCommand>>,
}

impl TaskCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            env: Vec::new(),
            echo: false,
            pipe_to: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn echoed(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Feed this command's stdout into `next`. Appends to the end of an
    /// existing pipeline.
    pub fn pipe_into(mut self, next: TaskCommand) -> Self {
        match self.pipe_to.take() {
            Some(tail) => self.pipe_to = Some(Box::new((*tail).pipe_into(next))),
            None => self.pipe_to = Some(Box::new(next)),
        }
        self
    }

    /// Every stage of the pipeline, starting with `self`.
    pub fn stages(&self) -> Vec<&TaskCommand> {
        let mut stages = vec![self];
        let mut current = self;
        while let Some(next) = current.pipe_to.as_deref() {
            stages.push(next);
            current = next;
        }
        stages
    }

    pub fn is_pipeline(&self) -> bool {
        self.pipe_to.is_some()
    }

    /// Render as a POSIX shell command line. Only used for display; execution
    /// always goes through the argument list.
    pub fn to_shell_command(&self) -> String {
        self.stages()
            .into_iter()
            .map(render_stage)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Build the `std::process::Command` for this stage alone.
    pub(crate) fn to_process(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd
    }
}

fn render_stage(stage: &TaskCommand) -> String {
    let mut cmd = String::new();
    for (key, value) in &stage.env {
        cmd.push_str(&format!("{}={} ", key, shell_quote(value)));
    }
    cmd.push_str(&shell_quote(&stage.program));
    for arg in &stage.args {
        cmd.push(' ');
        cmd.push_str(&shell_quote(arg));
    }
    cmd
}

/// Quote `arg` for a POSIX shell, leaving plain words untouched.
pub fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    let plain = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
