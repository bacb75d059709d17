//! Lookups that resolve paths from the surrounding toolchains

use std::path::PathBuf;
use tracing::debug;

use crate::command::{CommandExecutor, TaskCommand};
use crate::error::{Error, Result};

/// Top-level directory of the git repository containing the working directory.
pub fn repo_root(executor: &mut dyn CommandExecutor) -> Result<PathBuf> {
    let probe = TaskCommand::new("git", ["rev-parse", "--show-toplevel"]);
    let root = executor
        .capture(&probe)
        .map_err(|e| Error::LookupError(format!("could not resolve the repository root: {e}")))?;
    if root.is_empty() {
        return Err(Error::LookupError(
            "git reported an empty repository root".to_string(),
        ));
    }

    debug!("Repository root: {}", root);
    Ok(PathBuf::from(root))
}

/// Binary directory of the Go toolchain, `$(go env GOPATH)/bin`.
///
/// When GOPATH lists several directories, the first one wins, matching where
/// `go install` puts binaries.
pub fn go_bin_dir(executor: &mut dyn CommandExecutor) -> Result<PathBuf> {
    let probe = TaskCommand::new("go", ["env", "GOPATH"]);
    let gopath = executor
        .capture(&probe)
        .map_err(|e| Error::LookupError(format!("could not resolve GOPATH: {e}")))?;

    let first = std::env::split_paths(&gopath)
        .find(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::LookupError("go reported an empty GOPATH".to_string()))?;

    let bin_dir = first.join("bin");
    debug!("Go binary directory: {}", bin_dir.display());
    Ok(bin_dir)
}
