use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use verlock_util::errors::VerlockError;

use crate::context::ResolutionContext;
use crate::coordinate::{is_valid_version, DependencyRequest, ModuleId};
use crate::properties;
use crate::rule::{MatchKey, OverrideRule, RuleScope};

/// The parsed representation of a `Verlock.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Requests resolved under every context.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Requests added on top of `dependencies` under the test context.
    #[serde(default, rename = "test-dependencies")]
    pub test_dependencies: Vec<String>,

    #[serde(default)]
    pub project: Option<ProjectMetadata>,

    /// Named versions referenced as `${name}`.
    #[serde(default)]
    pub versions: BTreeMap<String, String>,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default, rename = "override")]
    pub overrides: Vec<OverrideEntry>,
}

/// Project identity from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resolution behaviour from the `[policy]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default, rename = "conflict-strategy")]
    pub conflict_strategy: ConflictStrategy,
    #[serde(default, rename = "duplicate-rules")]
    pub duplicate_rules: DuplicateRules,
}

/// What to do when a module is requested at different versions and no rule
/// settles it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    /// Fail the resolution.
    #[default]
    Fail,
    /// Pick the highest exact version, provided every requested range allows it.
    Highest,
}

/// What to do when two rules with the same key and scope force different versions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateRules {
    /// Treat it as a configuration error.
    #[default]
    Error,
    /// The rule declared last wins.
    LastWins,
}

/// One `[[override]]` table as written in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// `group:module`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub version: String,
    #[serde(default)]
    pub scope: RuleScope,
}

impl Manifest {
    /// Load and parse a `Verlock.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VerlockError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Verlock.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            VerlockError::Manifest {
                message: format!("Failed to parse Verlock.toml: {e}"),
            }
            .into()
        })
    }

    /// Project name, if the manifest declares one.
    pub fn name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// The requests to resolve under `context`.
    ///
    /// The test context resolves `dependencies` followed by `test-dependencies`.
    pub fn requests(&self, context: ResolutionContext) -> miette::Result<Vec<DependencyRequest>> {
        let mut requests = parse_requests(&self.dependencies, "dependencies", &self.versions)?;
        if context == ResolutionContext::Test {
            requests.extend(parse_requests(
                &self.test_dependencies,
                "test-dependencies",
                &self.versions,
            )?);
        }
        Ok(requests)
    }

    /// All override rules in declaration order.
    pub fn rules(&self) -> miette::Result<Vec<OverrideRule>> {
        self.overrides
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_rule(index, &self.versions))
            .collect()
    }
}

impl OverrideEntry {
    fn to_rule(
        &self,
        index: usize,
        versions: &BTreeMap<String, String>,
    ) -> miette::Result<OverrideRule> {
        let position = index + 1;
        let key = match (&self.group, &self.module) {
            (Some(group), None) if !group.trim().is_empty() => {
                MatchKey::Group(group.trim().to_string())
            }
            (None, Some(module)) => {
                let id = ModuleId::parse(module.trim()).ok_or_else(|| VerlockError::Manifest {
                    message: format!(
                        "override #{position}: invalid module '{module}', expected group:module"
                    ),
                })?;
                MatchKey::Module(id)
            }
            _ => {
                return Err(VerlockError::Manifest {
                    message: format!(
                        "override #{position}: set exactly one of 'group' or 'module'"
                    ),
                }
                .into())
            }
        };

        let version = properties::interpolate(&self.version, versions).map_err(|name| {
            VerlockError::Manifest {
                message: format!("override #{position}: undefined version variable '{name}'"),
            }
        })?;
        if !is_valid_version(&version) {
            return Err(VerlockError::Manifest {
                message: format!(
                    "override #{position}: invalid version '{version}' \
                     (must be non-empty, without '=', ':' or control characters)"
                ),
            }
            .into());
        }

        Ok(OverrideRule {
            key,
            version: version.trim().to_string(),
            scope: self.scope,
        })
    }
}

fn parse_requests(
    entries: &[String],
    section: &str,
    versions: &BTreeMap<String, String>,
) -> miette::Result<Vec<DependencyRequest>> {
    entries
        .iter()
        .map(|raw| -> miette::Result<DependencyRequest> {
            let expanded =
                properties::interpolate(raw, versions).map_err(|name| VerlockError::Manifest {
                    message: format!(
                        "{section}: undefined version variable '{name}' in '{raw}'"
                    ),
                })?;
            let request = DependencyRequest::parse(&expanded).ok_or_else(|| {
                VerlockError::Manifest {
                    message: format!(
                        "{section}: invalid dependency '{raw}', expected group:module:version \
                         (version without '=' or control characters)"
                    ),
                }
            })?;
            Ok(request)
        })
        .collect()
}
