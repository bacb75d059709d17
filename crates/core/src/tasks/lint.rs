//! Linter task: golangci-lint either in a container or on the host

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::Task;
use crate::command::{CommandExecutor, TaskCommand};
use crate::error::{Error, Result};
use crate::workspace;

/// Path the repository is mounted at inside the linter container
pub const CONTAINER_WORKDIR: &str = "/app";

/// A pinned linter release and the fixed arguments it is run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinterRelease {
    pub binary: &'static str,
    pub version: &'static str,
    pub image: &'static str,
    pub install_script_url: &'static str,
    pub analysis_args: &'static [&'static str],
}

pub const GOLANGCI_LINT: LinterRelease = LinterRelease {
    binary: "golangci-lint",
    version: "1.55.2",
    image: "golangci/golangci-lint",
    install_script_url: "https://raw.githubusercontent.com/golangci/golangci-lint/master/install.sh",
    analysis_args: &["run", "--timeout", "10m0s", "./..."],
};

impl LinterRelease {
    /// Version tag, e.g. `v1.55.2`
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Fully qualified container image, e.g. `golangci/golangci-lint:v1.55.2`
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.tag())
    }
}

/// Where the linter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintEnvironment {
    /// Inside a container pinned to the release image
    Container,
    /// Directly on the host, after installing the release binary
    Host,
}

impl LintEnvironment {
    pub const SUPPORTED: [&'static str; 2] = ["container", "host"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LintEnvironment::Container => "container",
            LintEnvironment::Host => "host",
        }
    }
}

impl FromStr for LintEnvironment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "container" => Ok(LintEnvironment::Container),
            "host" => Ok(LintEnvironment::Host),
            other => Err(Error::UnsupportedEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for LintEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `golangci-lint run --timeout 10m0s ./...`
pub fn analysis_command(release: &LinterRelease) -> TaskCommand {
    TaskCommand::new(release.binary, release.analysis_args.iter().copied())
}

/// One `docker run` that mounts `repo_root` and runs the analysis in the
/// release image.
pub fn container_commands(release: &LinterRelease, repo_root: &Path) -> Vec<TaskCommand> {
    let analysis = analysis_command(release);

    let mut args = vec![
        "run".to_string(),
        "--rm".to_string(),
        "-v".to_string(),
        format!("{}:{}", repo_root.display(), CONTAINER_WORKDIR),
        "-w".to_string(),
        CONTAINER_WORKDIR.to_string(),
        release.image_ref(),
        analysis.program,
    ];
    args.extend(analysis.args);

    vec![TaskCommand::new("docker", args).echoed()]
}

/// Install the release binary into `install_dir`, then run the analysis
/// against whatever `golangci-lint` resolves to on the search path.
pub fn host_commands(release: &LinterRelease, install_dir: &Path) -> Vec<TaskCommand> {
    let install = TaskCommand::new("curl", ["-sSfL", release.install_script_url]).pipe_into(
        TaskCommand::new(
            "sh",
            [
                "-s".to_string(),
                "--".to_string(),
                "-b".to_string(),
                install_dir.display().to_string(),
                release.tag(),
            ],
        ),
    );

    vec![install, analysis_command(release)]
}

/// Runs the linter in the selected environment.
#[derive(Debug, Clone)]
pub struct LintRunner {
    pub environment: LintEnvironment,
    pub release: LinterRelease,
    /// Skips the `git rev-parse --show-toplevel` lookup when set
    pub repo_root: Option<PathBuf>,
    /// Skips the `go env GOPATH` lookup when set
    pub install_dir: Option<PathBuf>,
}

impl LintRunner {
    pub fn new(environment: LintEnvironment) -> Self {
        Self {
            environment,
            release: GOLANGCI_LINT,
            repo_root: None,
            install_dir: None,
        }
    }

    pub fn with_repo_root(mut self, repo_root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(repo_root.into());
        self
    }

    pub fn with_install_dir(mut self, install_dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(install_dir.into());
        self
    }

    pub fn with_release(mut self, release: LinterRelease) -> Self {
        self.release = release;
        self
    }
}

impl Task for LintRunner {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn plan(&self, executor: &mut dyn CommandExecutor) -> Result<Vec<TaskCommand>> {
        debug!(
            "Planning {} {} in {} environment",
            self.release.binary,
            self.release.tag(),
            self.environment
        );

        match self.environment {
            LintEnvironment::Container => {
                let repo_root = match &self.repo_root {
                    Some(root) => root.clone(),
                    None => workspace::repo_root(executor)?,
                };
                Ok(container_commands(&self.release, &repo_root))
            }
            LintEnvironment::Host => {
                let install_dir = match &self.install_dir {
                    Some(dir) => dir.clone(),
                    None => workspace::go_bin_dir(executor)?,
                };
                Ok(host_commands(&self.release, &install_dir))
            }
        }
    }
}
