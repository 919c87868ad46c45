//! Lock file generation and drift detection.

use std::collections::BTreeMap;
use std::fmt;

use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::ModuleId;
use verlock_core::lockfile::LockFile;

use crate::resolver::Resolution;

/// How a resolved module differs from the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftKind {
    Changed { locked: String, resolved: String },
    /// Resolved but absent from the lock.
    Added { resolved: String },
    /// Locked but no longer resolved.
    Removed { locked: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub context: ResolutionContext,
    pub id: ModuleId,
    pub kind: DriftKind,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.context, self.id)?;
        match &self.kind {
            DriftKind::Changed { locked, resolved } => {
                write!(f, "locked {locked} but resolved {resolved}")
            }
            DriftKind::Added { resolved } => write!(f, "resolved {resolved} but not locked"),
            DriftKind::Removed { locked } => write!(f, "locked {locked} but no longer resolved"),
        }
    }
}

/// All differences between fresh resolutions and the lock.
#[derive(Debug, Clone, Default)]
pub struct DriftReport {
    pub drifts: Vec<Drift>,
}

impl DriftReport {
    pub fn is_empty(&self) -> bool {
        self.drifts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drifts.len()
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.drifts.is_empty() {
            return write!(f, "Lock file is up to date.");
        }
        write!(f, "Resolved versions drifted from Verlock.lock ({}):", self.drifts.len())?;
        for d in &self.drifts {
            write!(f, "\n  {d}")?;
        }
        Ok(())
    }
}

/// Build the lock record for a set of resolutions.
pub fn to_lockfile(resolutions: &[Resolution]) -> LockFile {
    let mut lock = LockFile::new();
    for resolution in resolutions {
        lock.set_context(resolution.context, resolution.versions());
    }
    lock
}

/// Compare `resolutions` against `lock`, context by context.
///
/// A context the lock has never seen counts as locked-empty, so all of its
/// modules show up as added.
pub fn detect_drift(lock: &LockFile, resolutions: &[Resolution]) -> DriftReport {
    let empty = BTreeMap::new();
    let mut drifts = Vec::new();

    for resolution in resolutions {
        let context = resolution.context;
        let locked = lock.context(context).unwrap_or(&empty);
        let resolved = resolution.versions();

        for (id, version) in &resolved {
            let kind = match locked.get(id) {
                Some(l) if l == version => continue,
                Some(l) => DriftKind::Changed {
                    locked: l.clone(),
                    resolved: version.clone(),
                },
                None => DriftKind::Added {
                    resolved: version.clone(),
                },
            };
            drifts.push(Drift {
                context,
                id: id.clone(),
                kind,
            });
        }
        for (id, version) in locked {
            if !resolved.contains_key(id) {
                drifts.push(Drift {
                    context,
                    id: id.clone(),
                    kind: DriftKind::Removed {
                        locked: version.clone(),
                    },
                });
            }
        }
    }

    drifts.sort_by(|a, b| (a.context, &a.id).cmp(&(b.context, &b.id)));
    DriftReport { drifts }
}
