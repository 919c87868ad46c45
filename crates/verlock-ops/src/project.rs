//! A loaded project: its manifest, compiled policy, and lock file location.

use std::path::{Path, PathBuf};

use verlock_core::context::ResolutionContext;
use verlock_core::manifest::Manifest;
use verlock_core::{LOCK_FILE, MANIFEST_FILE};
use verlock_resolver::policy::ResolutionPolicy;
use verlock_resolver::resolver::{self, Resolution};
use verlock_util::errors::VerlockError;
use verlock_util::fs::find_ancestor_with;

pub struct Project {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

impl Project {
    /// Find the manifest: `explicit` if given, else the nearest
    /// `Verlock.toml` in `cwd` or its ancestors.
    pub fn locate(cwd: &Path, explicit: Option<&Path>) -> miette::Result<PathBuf> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(VerlockError::Manifest {
                    message: format!("{} does not exist", path.display()),
                }
                .into());
            }
            return Ok(path.to_path_buf());
        }
        let root = find_ancestor_with(cwd, MANIFEST_FILE).ok_or_else(|| VerlockError::Manifest {
            message: format!("Could not find {MANIFEST_FILE} in current or parent directories"),
        })?;
        Ok(root.join(MANIFEST_FILE))
    }

    pub fn load(manifest_path: &Path) -> miette::Result<Self> {
        let manifest = Manifest::from_path(manifest_path)?;
        let root = match manifest_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tracing::debug!("Loaded {}", manifest_path.display());
        Ok(Self {
            root,
            manifest_path: manifest_path.to_path_buf(),
            manifest,
        })
    }

    /// Locate and load in one step.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> miette::Result<Self> {
        Self::load(&Self::locate(cwd, explicit)?)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Display name for status lines.
    pub fn display_name(&self) -> String {
        self.manifest
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Compile the manifest's rules into a policy.
    pub fn policy(&self) -> miette::Result<ResolutionPolicy> {
        let policy = ResolutionPolicy::new(self.manifest.rules()?, self.manifest.policy)?;
        tracing::debug!("Compiled {} override rules", policy.rule_count());
        Ok(policy)
    }

    /// Resolve `contexts`, reporting conflicts from all of them together.
    pub fn resolve(&self, contexts: &[ResolutionContext]) -> miette::Result<Vec<Resolution>> {
        let policy = self.policy()?;
        let inputs = contexts
            .iter()
            .map(|&ctx| -> miette::Result<_> { Ok((ctx, self.manifest.requests(ctx)?)) })
            .collect::<miette::Result<Vec<_>>>()?;
        Ok(resolver::resolve_all(&inputs, &policy)?)
    }
}
