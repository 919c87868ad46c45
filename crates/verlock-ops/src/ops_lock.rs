//! Operation: resolve all contexts and write Verlock.lock.

use verlock_core::context::ResolutionContext;
use verlock_core::lockfile::LockFile;
use verlock_resolver::error::ResolveError;
use verlock_resolver::lock::{detect_drift, to_lockfile};

use crate::project::Project;

/// What `lock` did to the lock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// No lock existed; one was written.
    Created { modules: usize },
    /// The lock already matched the resolution.
    UpToDate { modules: usize },
    /// The lock drifted and `update` allowed rewriting it.
    Updated { modules: usize, changes: usize },
}

/// Resolve both contexts and persist the result.
///
/// An existing lock that differs from the fresh resolution fails with
/// [`ResolveError::Drift`] unless `update` is set. Nothing is written on
/// any failure.
pub fn lock(project: &Project, update: bool) -> miette::Result<LockOutcome> {
    let resolutions = project.resolve(&ResolutionContext::ALL)?;
    crate::report_warnings(&resolutions);

    let fresh = to_lockfile(&resolutions);
    let modules = fresh.len();
    let lock_path = project.lock_path();

    let outcome = match LockFile::load_if_exists(&lock_path)? {
        None => LockOutcome::Created { modules },
        Some(existing) => {
            let drift = detect_drift(&existing, &resolutions);
            if drift.is_empty() {
                LockOutcome::UpToDate { modules }
            } else if update {
                for d in &drift.drifts {
                    tracing::info!("Relocking {d}");
                }
                LockOutcome::Updated {
                    modules,
                    changes: drift.len(),
                }
            } else {
                return Err(ResolveError::Drift(drift).into());
            }
        }
    };

    fresh.write_to(&lock_path)?;
    tracing::info!("Wrote {} ({modules} entries)", lock_path.display());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verlock_core::coordinate::ModuleId;

    fn write_manifest(dir: &std::path::Path, body: &str) -> Project {
        let path = dir.join("Verlock.toml");
        std::fs::write(&path, body).unwrap();
        Project::load(&path).unwrap()
    }

    #[test]
    fn first_lock_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.0"]"#);

        let outcome = lock(&project, false).unwrap();
        assert_eq!(outcome, LockOutcome::Created { modules: 2 });

        let written = LockFile::from_path(&project.lock_path()).unwrap();
        let id = ModuleId::new("a", "b");
        assert_eq!(written.get(ResolutionContext::Default, &id), Some("1.0"));
        assert_eq!(written.get(ResolutionContext::Test, &id), Some("1.0"));
    }

    #[test]
    fn relocking_unchanged_project_is_up_to_date() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.0"]"#);
        lock(&project, false).unwrap();
        assert_eq!(
            lock(&project, false).unwrap(),
            LockOutcome::UpToDate { modules: 2 }
        );
    }

    #[test]
    fn drift_fails_without_update_and_keeps_lock() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.0"]"#);
        lock(&project, false).unwrap();
        let before = std::fs::read_to_string(project.lock_path()).unwrap();

        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.1"]"#);
        let err = lock(&project, false).unwrap_err();
        let resolve_err = err.downcast_ref::<ResolveError>().unwrap();
        assert!(matches!(resolve_err, ResolveError::Drift(_)));
        assert_eq!(std::fs::read_to_string(project.lock_path()).unwrap(), before);
    }

    #[test]
    fn update_rewrites_drifted_lock() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.0"]"#);
        lock(&project, false).unwrap();

        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.1"]"#);
        let outcome = lock(&project, true).unwrap();
        assert_eq!(outcome, LockOutcome::Updated { modules: 2, changes: 2 });

        let written = LockFile::from_path(&project.lock_path()).unwrap();
        assert_eq!(
            written.get(ResolutionContext::Default, &ModuleId::new("a", "b")),
            Some("1.1")
        );
    }

    #[test]
    fn conflict_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(
            tmp.path(),
            r#"dependencies = ["org.slf4j:slf4j-api:1.7", "org.slf4j:slf4j-api:1.8"]"#,
        );
        let err = lock(&project, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::Conflict(_))
        ));
        assert!(!project.lock_path().exists());
    }

    #[test]
    fn written_lock_reads_back_on_next_run() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(
            tmp.path(),
            r#"dependencies = ["a:b:1.0+build.5", "c:d:[1.0, 2.0)"]"#,
        );
        assert_eq!(lock(&project, false).unwrap(), LockOutcome::Created { modules: 4 });
        assert_eq!(lock(&project, false).unwrap(), LockOutcome::UpToDate { modules: 4 });
    }

    #[test]
    fn unlockable_version_is_rejected_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let project = write_manifest(tmp.path(), r#"dependencies = ["a:b:1.0=rc"]"#);
        assert!(lock(&project, false).is_err());
        assert!(!project.lock_path().exists());
    }
}
