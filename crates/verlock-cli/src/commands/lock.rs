//! Handler for `verlock lock`.

use std::path::Path;

use miette::Result;
use verlock_ops::ops_lock::{self, LockOutcome};
use verlock_util::progress;

pub fn exec(manifest_path: Option<&Path>, update: bool) -> Result<()> {
    let project = super::load_project(manifest_path)?;
    progress::status("Resolving", &project.display_name());

    match ops_lock::lock(&project, update)? {
        LockOutcome::Created { modules } => {
            progress::status("Locked", &format!("{modules} entries in Verlock.lock"));
        }
        LockOutcome::UpToDate { modules } => {
            progress::status_info("Fresh", &format!("{modules} entries already locked"));
        }
        LockOutcome::Updated { modules, changes } => {
            progress::status(
                "Relocked",
                &format!("{modules} entries in Verlock.lock ({changes} changed)"),
            );
        }
    }
    Ok(())
}
