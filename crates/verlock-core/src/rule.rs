use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ResolutionContext;
use crate::coordinate::ModuleId;

/// What an override rule matches on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKey {
    /// Every module of a group.
    Group(String),
    /// One exact module.
    Module(ModuleId),
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(group) => write!(f, "{group}:*"),
            Self::Module(module) => write!(f, "{module}"),
        }
    }
}

/// Where an override rule applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Applies under every context.
    #[default]
    All,
    /// Applies only under the test context, on top of `All` rules.
    Test,
}

impl RuleScope {
    pub fn applies_to(self, context: ResolutionContext) -> bool {
        match self {
            Self::All => true,
            Self::Test => context == ResolutionContext::Test,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for RuleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forced version for a group or module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    pub key: MatchKey,
    pub version: String,
    pub scope: RuleScope,
}

impl OverrideRule {
    pub fn group(group: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            key: MatchKey::Group(group.into()),
            version: version.into(),
            scope: RuleScope::All,
        }
    }

    pub fn module(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            key: MatchKey::Module(ModuleId::new(group, module)),
            version: version.into(),
            scope: RuleScope::All,
        }
    }

    /// Restrict this rule to the test context.
    pub fn test_only(mut self) -> Self {
        self.scope = RuleScope::Test;
        self
    }
}

impl fmt::Display for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (scope: {})", self.key, self.version, self.scope)
    }
}
