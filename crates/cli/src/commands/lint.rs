use anyhow::{Context, Result};
use devtask_core::{LintEnvironment, LintRunner};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{OutputMode, run_task};

pub fn lint_command(
    environment: LintEnvironment,
    repo_root: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    mode: OutputMode,
) -> Result<()> {
    debug!("Running linter in {} environment", environment);

    let mut runner = LintRunner::new(environment);

    match environment {
        LintEnvironment::Container if install_dir.is_some() => {
            warn!("--install-dir is ignored in the container environment");
        }
        LintEnvironment::Host if repo_root.is_some() => {
            warn!("--repo-root is ignored in the host environment");
        }
        _ => {}
    }

    if let Some(root) = repo_root {
        runner = runner.with_repo_root(absolute_path(&root, "--repo-root")?);
    }
    if let Some(dir) = install_dir {
        runner = runner.with_install_dir(absolute_path(&dir, "--install-dir")?);
    }

    run_task(&runner, mode)
}

/// Docker reads a relative `-v` source as a named volume, so overrides are
/// made absolute against the current directory.
fn absolute_path(path: &Path, flag: &str) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {} {}", flag, path.display()))
}
