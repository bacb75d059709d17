use anyhow::Result;
use clap::{Parser, Subcommand};
use devtask_core::LintEnvironment;
use std::path::PathBuf;

use crate::commands::{OutputMode, lint_command, test_command};

const LINT_LONG_ABOUT: &str = "Run linter.

By default, this runs the pinned golangci-lint container image against the \
repository root. Some environments (such as CI machines without a container \
runtime) are better served by installing the golangci-lint binary on the host: \
`devtask lint --env host`.

Note that the host mode downloads the official install script and writes the \
binary into the Go toolchain's bin directory, modifying the host machine.";

#[derive(Parser, Debug)]
#[command(name = "devtask")]
#[command(version, about = "Developer-workflow tasks for the Go code base", long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Print the planned commands without executing them
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    /// Print the plan as JSON (requires --dry-run)
    #[arg(long, global = true, requires = "dry_run")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run unit tests
    #[command(visible_alias = "t")]
    Test,
    /// Run linter
    #[command(long_about = LINT_LONG_ABOUT)]
    Lint {
        /// Environment to run the linter in. Supported: container, host
        #[arg(
            long,
            value_name = "ENV",
            default_value = "container",
            value_parser = parse_environment
        )]
        env: LintEnvironment,

        /// Repository root to mount (defaults to `git rev-parse --show-toplevel`)
        #[arg(long, value_name = "PATH")]
        repo_root: Option<PathBuf>,

        /// Directory to install golangci-lint into (defaults to `$(go env GOPATH)/bin`)
        #[arg(long, value_name = "PATH")]
        install_dir: Option<PathBuf>,
    },
}

fn parse_environment(value: &str) -> Result<LintEnvironment, devtask_core::Error> {
    value.parse()
}

impl Cli {
    /// Execute the selected task
    pub fn execute(self) -> Result<()> {
        let mode = OutputMode {
            dry_run: self.dry_run,
            json: self.json,
        };

        match self.command {
            Commands::Test => test_command(mode),
            Commands::Lint {
                env,
                repo_root,
                install_dir,
            } => lint_command(env, repo_root, install_dir, mode),
        }
    }
}
