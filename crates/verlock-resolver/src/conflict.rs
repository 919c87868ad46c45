//! Reports for version conflicts and disagreeing override rules.

use std::fmt;

use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::ModuleId;
use verlock_core::rule::{MatchKey, RuleScope};

/// A module requested at several versions that no rule reconciles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    pub context: ResolutionContext,
    pub id: ModuleId,
    /// The competing requested versions, sorted.
    pub requested: Vec<String>,
    pub reason: String,
}

/// Every version conflict found in one or more resolution passes.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<VersionConflict>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: VersionConflict) {
        self.conflicts.push(conflict);
    }

    /// Append the conflicts of another pass.
    pub fn merge(&mut self, other: ConflictReport) {
        self.conflicts.extend(other.conflicts);
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        write!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            write!(f, "\n  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} requested at {} ({})",
            self.context,
            self.id,
            self.requested.join(", "),
            self.reason
        )
    }
}

/// Rules with the same key and scope that force different versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConflict {
    pub key: MatchKey,
    pub scope: RuleScope,
    /// Forced versions in declaration order.
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RuleConflictReport {
    pub conflicts: Vec<RuleConflict>,
}

impl RuleConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl fmt::Display for RuleConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conflicting override rules ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            write!(f, "\n  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RuleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (scope: {}) forced to {}",
            self.key,
            self.scope,
            self.versions.join(" and ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = ConflictReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert_eq!(report.to_string(), "No version conflicts.");
    }

    #[test]
    fn report_lists_every_conflict() {
        let mut report = ConflictReport::new();
        report.add(VersionConflict {
            context: ResolutionContext::Default,
            id: ModuleId::new("org.slf4j", "slf4j-api"),
            requested: vec!["1.7".to_string(), "1.8".to_string()],
            reason: "no override rule applies".to_string(),
        });
        let mut other = ConflictReport::new();
        other.add(VersionConflict {
            context: ResolutionContext::Test,
            id: ModuleId::new("junit", "junit"),
            requested: vec!["4.12".to_string(), "4.13".to_string()],
            reason: "no override rule applies".to_string(),
        });
        report.merge(other);

        assert_eq!(report.len(), 2);
        let s = report.to_string();
        assert!(s.starts_with("Version conflicts (2):"));
        assert!(s.contains("[default] org.slf4j:slf4j-api requested at 1.7, 1.8"));
        assert!(s.contains("[test] junit:junit requested at 4.12, 4.13"));
    }

    #[test]
    fn rule_conflict_display() {
        let report = RuleConflictReport {
            conflicts: vec![RuleConflict {
                key: MatchKey::Group("org.apache.logging.log4j".to_string()),
                scope: RuleScope::All,
                versions: vec!["2.17.1".to_string(), "2.17.2".to_string()],
            }],
        };
        assert_eq!(
            report.to_string(),
            "Conflicting override rules (1):\n  org.apache.logging.log4j:* (scope: all) forced to 2.17.1 and 2.17.2"
        );
    }
}
