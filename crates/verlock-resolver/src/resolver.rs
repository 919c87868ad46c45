//! The resolution pass: one concrete version per module for one context.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::{DependencyRequest, ModuleId};
use verlock_core::manifest::ConflictStrategy;
use verlock_core::rule::{MatchKey, RuleScope};

use crate::conflict::{ConflictReport, VersionConflict};
use crate::error::ResolveError;
use crate::policy::ResolutionPolicy;
use crate::version::{MavenVersion, VersionRequirement};

/// Why a module ended up at its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionReason {
    /// Every request agreed and no rule applied.
    Requested,
    /// An override rule forced the version.
    Rule { key: MatchKey, scope: RuleScope },
    /// Requests disagreed and the highest exact version was taken.
    Highest,
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requested => write!(f, "requested"),
            Self::Rule { key, scope } => write!(f, "forced by {key} (scope: {scope})"),
            Self::Highest => write!(f, "highest of conflicting requests"),
        }
    }
}

/// The outcome for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub version: String,
    pub reason: ResolutionReason,
    /// Distinct versions the module was requested at.
    pub requested: BTreeSet<String>,
}

/// A rule forced a version outside a range the module was requested with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeWarning {
    pub context: ResolutionContext,
    pub id: ModuleId,
    pub range: String,
    pub forced: String,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} forced to {}, outside requested range {}",
            self.context, self.id, self.forced, self.range
        )
    }
}

/// The result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub context: ResolutionContext,
    pub modules: BTreeMap<ModuleId, ResolvedModule>,
    pub warnings: Vec<RangeWarning>,
}

impl Resolution {
    /// Final version per module, as recorded in the lock file.
    pub fn versions(&self) -> BTreeMap<ModuleId, String> {
        self.modules
            .iter()
            .map(|(id, m)| (id.clone(), m.version.clone()))
            .collect()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ResolvedModule> {
        self.modules.get(id)
    }
}

/// Resolve `requests` under `context`.
///
/// Each module gets the version of the rule [`ResolutionPolicy::select`]
/// returns, or its requested version when no rule applies. Modules
/// requested at different versions with no rule fail the pass with
/// [`ResolveError::Conflict`] under [`ConflictStrategy::Fail`]; every
/// conflict of the pass is reported at once.
pub fn resolve(
    requests: &[DependencyRequest],
    policy: &ResolutionPolicy,
    context: ResolutionContext,
) -> Result<Resolution, ResolveError> {
    let mut requested: BTreeMap<&ModuleId, BTreeSet<String>> = BTreeMap::new();
    for request in requests {
        requested
            .entry(&request.id)
            .or_default()
            .insert(request.requested_version.clone());
    }

    let mut modules = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut conflicts = ConflictReport::new();

    for (id, versions) in requested {
        let (version, reason) = if let Some(rule) = policy.select(id, context) {
            tracing::debug!("[{context}] {id}: {rule}");
            warnings.extend(range_warnings(context, id, &versions, &rule.version));
            (
                rule.version.clone(),
                ResolutionReason::Rule {
                    key: rule.key.clone(),
                    scope: rule.scope,
                },
            )
        } else if versions.len() == 1 {
            let only = versions.iter().next().cloned().unwrap_or_default();
            (only, ResolutionReason::Requested)
        } else {
            let outcome = match policy.conflict_strategy() {
                ConflictStrategy::Fail => {
                    Err("no override rule reconciles them".to_string())
                }
                ConflictStrategy::Highest => pick_highest(&versions),
            };
            match outcome {
                Ok(highest) => {
                    tracing::debug!("[{context}] {id}: highest of {versions:?} is {highest}");
                    (highest, ResolutionReason::Highest)
                }
                Err(reason) => {
                    conflicts.add(VersionConflict {
                        context,
                        id: id.clone(),
                        requested: versions.into_iter().collect(),
                        reason,
                    });
                    continue;
                }
            }
        };

        modules.insert(
            id.clone(),
            ResolvedModule {
                version,
                reason,
                requested: versions,
            },
        );
    }

    if !conflicts.is_empty() {
        return Err(ResolveError::Conflict(conflicts));
    }

    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::debug!("[{context}] resolved {} modules", modules.len());

    Ok(Resolution {
        context,
        modules,
        warnings,
    })
}

/// Resolve several contexts against one policy.
///
/// Conflicts from all contexts are collected into a single report before
/// failing.
pub fn resolve_all(
    inputs: &[(ResolutionContext, Vec<DependencyRequest>)],
    policy: &ResolutionPolicy,
) -> Result<Vec<Resolution>, ResolveError> {
    let mut resolutions = Vec::with_capacity(inputs.len());
    let mut conflicts = ConflictReport::new();

    for (context, requests) in inputs {
        match resolve(requests, policy, *context) {
            Ok(resolution) => resolutions.push(resolution),
            Err(ResolveError::Conflict(report)) => conflicts.merge(report),
            Err(other) => return Err(other),
        }
    }

    if conflicts.is_empty() {
        Ok(resolutions)
    } else {
        Err(ResolveError::Conflict(conflicts))
    }
}

fn range_warnings(
    context: ResolutionContext,
    id: &ModuleId,
    requested: &BTreeSet<String>,
    forced: &str,
) -> Vec<RangeWarning> {
    let forced_version = MavenVersion::parse(forced);
    requested
        .iter()
        .filter(|raw| {
            let req = VersionRequirement::parse(raw);
            req.is_range() && !req.allows(&forced_version)
        })
        .map(|raw| RangeWarning {
            context,
            id: id.clone(),
            range: raw.clone(),
            forced: forced.to_string(),
        })
        .collect()
}

/// The highest exact requested version, if every requested range allows it.
fn pick_highest(requested: &BTreeSet<String>) -> Result<String, String> {
    let mut exact = Vec::new();
    let mut ranges = Vec::new();
    for raw in requested {
        match VersionRequirement::parse(raw) {
            VersionRequirement::Exact(v) => exact.push(v),
            req @ VersionRequirement::Ranges(_) => ranges.push((raw, req)),
        }
    }

    let highest = exact
        .into_iter()
        .max()
        .ok_or_else(|| "only version ranges were requested; add an override".to_string())?;

    if let Some((raw, _)) = ranges.iter().find(|(_, req)| !req.allows(&highest)) {
        return Err(format!("highest requested version {highest} is outside {raw}"));
    }
    Ok(highest.as_str().to_string())
}
