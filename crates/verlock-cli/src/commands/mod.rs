//! Command dispatch and handler modules.

mod check;
mod explain;
mod lock;
mod pin;
mod resolve;

use std::path::Path;

use miette::Result;
use verlock_ops::project::Project;
use verlock_util::errors::VerlockError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let manifest_path = cli.manifest_path.as_deref();
    match cli.command {
        Command::Resolve { context, format } => resolve::exec(manifest_path, context, format),
        Command::Lock { update } => lock::exec(manifest_path, update),
        Command::Check => check::exec(manifest_path),
        Command::Explain { module, context } => explain::exec(manifest_path, &module, context),
        Command::Pin {
            target,
            version,
            test,
        } => pin::exec(manifest_path, target, version, test),
    }
}

/// Load the project the command operates on.
fn load_project(manifest_path: Option<&Path>) -> Result<Project> {
    let cwd = std::env::current_dir().map_err(VerlockError::Io)?;
    Project::discover(&cwd, manifest_path)
}
