//! Operation: verify Verlock.lock against a fresh resolution, without writing.

use verlock_core::context::ResolutionContext;
use verlock_core::lockfile::LockFile;
use verlock_resolver::error::ResolveError;
use verlock_resolver::lock::detect_drift;
use verlock_util::errors::VerlockError;

use crate::project::Project;

/// Resolve both contexts and fail if the result differs from the lock.
///
/// Returns the number of locked entries that were verified.
pub fn check(project: &Project) -> miette::Result<usize> {
    let lock_path = project.lock_path();
    let existing = LockFile::load_if_exists(&lock_path)?.ok_or_else(|| VerlockError::Lockfile {
        message: format!("{} not found", lock_path.display()),
    })?;

    let resolutions = project.resolve(&ResolutionContext::ALL)?;
    crate::report_warnings(&resolutions);

    let drift = detect_drift(&existing, &resolutions);
    if !drift.is_empty() {
        return Err(ResolveError::Drift(drift).into());
    }
    Ok(existing.len())
}
