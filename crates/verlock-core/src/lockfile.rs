//! The `Verlock.lock` record of resolved versions.
//!
//! One line per resolved module and version, listing the contexts that
//! resolved it:
//!
//! ```text
//! commons-io:commons-io:2.1=default
//! commons-io:commons-io:2.6=test
//! org.slf4j:slf4j-api:1.8.0-alpha2=default,test
//! empty=
//! ```
//!
//! Lines are sorted by group, module, then version, so the file diffs cleanly.
//! `empty=` names the contexts that resolved nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use verlock_util::errors::VerlockError;

use crate::context::ResolutionContext;
use crate::coordinate::{DependencyRequest, ModuleId};

const HEADER: &str = "# verlock dependency lock. Regenerate with `verlock lock --update`.\n\
                      # Manual edits are overwritten.\n";

const EMPTY_KEY: &str = "empty";

/// Locked versions per context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockFile {
    contexts: BTreeMap<ResolutionContext, BTreeMap<ModuleId, String>>,
}

impl LockFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything recorded for `context`.
    pub fn set_context(&mut self, context: ResolutionContext, modules: BTreeMap<ModuleId, String>) {
        self.contexts.insert(context, modules);
    }

    /// Record a single locked version.
    pub fn insert(&mut self, context: ResolutionContext, id: ModuleId, version: impl Into<String>) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(id, version.into());
    }

    /// Locked modules of `context`, or `None` if the context was never locked.
    pub fn context(&self, context: ResolutionContext) -> Option<&BTreeMap<ModuleId, String>> {
        self.contexts.get(&context)
    }

    pub fn get(&self, context: ResolutionContext, id: &ModuleId) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|m| m.get(id))
            .map(String::as_str)
    }

    /// Total number of locked (context, module) entries.
    pub fn len(&self) -> usize {
        self.contexts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse lock file content.
    pub fn parse(content: &str) -> Result<Self, VerlockError> {
        let mut lock = Self::new();

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, contexts) = line.rsplit_once('=').ok_or_else(|| VerlockError::Lockfile {
                message: format!("line {line_no}: expected 'group:module:version=contexts'"),
            })?;
            let contexts = parse_contexts(contexts, line_no)?;

            if key.trim() == EMPTY_KEY {
                for context in contexts {
                    lock.contexts.entry(context).or_default();
                }
                continue;
            }

            let request = DependencyRequest::parse(key).ok_or_else(|| VerlockError::Lockfile {
                message: format!("line {line_no}: invalid coordinate '{}'", key.trim()),
            })?;
            if contexts.is_empty() {
                return Err(VerlockError::Lockfile {
                    message: format!("line {line_no}: '{request}' is not assigned to any context"),
                });
            }

            for context in contexts {
                if let Some(previous) = lock.get(context, &request.id) {
                    if previous != request.requested_version {
                        return Err(VerlockError::Lockfile {
                            message: format!(
                                "line {line_no}: {} locked twice for context '{context}' ({previous} and {})",
                                request.id, request.requested_version
                            ),
                        });
                    }
                }
                lock.insert(context, request.id.clone(), request.requested_version.as_str());
            }
        }

        Ok(lock)
    }

    /// Load and parse a `Verlock.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VerlockError::Lockfile {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content).map_err(Into::into)
    }

    /// Load the lock file if it exists.
    pub fn load_if_exists(path: &Path) -> miette::Result<Option<Self>> {
        if path.is_file() {
            Self::from_path(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Render the lock file in its canonical, sorted form.
    pub fn render(&self) -> String {
        let mut lines: BTreeMap<(&ModuleId, &str), BTreeSet<ResolutionContext>> = BTreeMap::new();
        let mut empty = Vec::new();

        for (context, modules) in &self.contexts {
            if modules.is_empty() {
                empty.push(context.as_str());
            }
            for (id, version) in modules {
                lines
                    .entry((id, version.as_str()))
                    .or_default()
                    .insert(*context);
            }
        }

        let mut out = String::from(HEADER);
        for ((id, version), contexts) in lines {
            let contexts: Vec<&str> = contexts.iter().map(|c| c.as_str()).collect();
            out.push_str(&format!("{id}:{version}={}\n", contexts.join(",")));
        }
        out.push_str(&format!("{EMPTY_KEY}={}\n", empty.join(",")));
        out
    }

    /// Atomically write the lock file to `path`.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        verlock_util::fs::write_atomic(path, &self.render()).map_err(|e| {
            VerlockError::Lockfile {
                message: format!("Failed to write {}: {e}", path.display()),
            }
            .into()
        })
    }
}

fn parse_contexts(raw: &str, line_no: usize) -> Result<Vec<ResolutionContext>, VerlockError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|e| VerlockError::Lockfile {
                message: format!("line {line_no}: {e}"),
            })
        })
        .collect()
}
