//! Compiled override rules.
//!
//! Rules are split into two layers by scope. The base layer holds rules that
//! apply everywhere; the test layer is consulted after it under the test
//! context, so a test rule that matches always beats a base rule.

use std::collections::{BTreeMap, HashMap};

use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::ModuleId;
use verlock_core::manifest::{ConflictStrategy, DuplicateRules, PolicyConfig};
use verlock_core::rule::{MatchKey, OverrideRule, RuleScope};

use crate::conflict::{RuleConflict, RuleConflictReport};
use crate::error::ResolveError;

/// The rules of one scope, indexed for lookup.
#[derive(Debug, Clone)]
pub struct RuleLayer {
    scope: RuleScope,
    modules: HashMap<ModuleId, OverrideRule>,
    groups: HashMap<String, OverrideRule>,
}

impl RuleLayer {
    fn new(scope: RuleScope) -> Self {
        Self {
            scope,
            modules: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// The rule deciding `id` in this layer: an exact module rule, else a group rule.
    pub fn lookup(&self, id: &ModuleId) -> Option<&OverrideRule> {
        self.modules
            .get(id)
            .or_else(|| self.groups.get(&id.group))
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a rule, returning the version it displaced if that differs.
    fn insert(&mut self, rule: OverrideRule) -> Option<String> {
        let previous = match &rule.key {
            MatchKey::Module(id) => self.modules.insert(id.clone(), rule.clone()),
            MatchKey::Group(group) => self.groups.insert(group.clone(), rule.clone()),
        };
        previous
            .filter(|p| p.version != rule.version)
            .map(|p| p.version)
    }
}

/// Immutable rule set and options for a resolution pass.
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    base: RuleLayer,
    test: RuleLayer,
    conflict_strategy: ConflictStrategy,
}

impl ResolutionPolicy {
    /// Compile `rules` (in declaration order) into a policy.
    ///
    /// Fails with [`ResolveError::RuleConflict`] when two rules with the same
    /// key and scope force different versions, unless `config` selects
    /// [`DuplicateRules::LastWins`].
    pub fn new(rules: Vec<OverrideRule>, config: PolicyConfig) -> Result<Self, ResolveError> {
        let mut base = RuleLayer::new(RuleScope::All);
        let mut test = RuleLayer::new(RuleScope::Test);
        let mut disagreements: BTreeMap<(RuleScope, MatchKey), Vec<String>> = BTreeMap::new();

        for rule in rules {
            let layer = match rule.scope {
                RuleScope::All => &mut base,
                RuleScope::Test => &mut test,
            };
            let key = (rule.scope, rule.key.clone());
            let version = rule.version.clone();
            if let Some(displaced) = layer.insert(rule) {
                tracing::debug!(
                    "Rule for {} (scope: {}) redeclared: {displaced} -> {version}",
                    key.1,
                    key.0
                );
                let versions = disagreements.entry(key).or_default();
                if versions.is_empty() {
                    versions.push(displaced);
                }
                if !versions.contains(&version) {
                    versions.push(version);
                }
            }
        }

        if config.duplicate_rules == DuplicateRules::Error && !disagreements.is_empty() {
            let conflicts = disagreements
                .into_iter()
                .map(|((scope, key), versions)| RuleConflict {
                    key,
                    scope,
                    versions,
                })
                .collect();
            return Err(ResolveError::RuleConflict(RuleConflictReport { conflicts }));
        }

        Ok(Self {
            base,
            test,
            conflict_strategy: config.conflict_strategy,
        })
    }

    /// A policy with no rules.
    pub fn empty() -> Self {
        Self {
            base: RuleLayer::new(RuleScope::All),
            test: RuleLayer::new(RuleScope::Test),
            conflict_strategy: ConflictStrategy::Fail,
        }
    }

    pub fn conflict_strategy(&self) -> ConflictStrategy {
        self.conflict_strategy
    }

    /// The layers active under `context`, base first.
    pub fn layers(
        &self,
        context: ResolutionContext,
    ) -> impl DoubleEndedIterator<Item = &RuleLayer> + '_ {
        std::iter::once(&self.base).chain(
            std::iter::once(&self.test).filter(move |layer| layer.scope.applies_to(context)),
        )
    }

    /// The rule that decides `id` under `context`, if any.
    ///
    /// Later layers win: under the test context a matching test rule beats
    /// any base rule, regardless of specificity.
    pub fn select(&self, id: &ModuleId, context: ResolutionContext) -> Option<&OverrideRule> {
        self.layers(context).rev().find_map(|layer| layer.lookup(id))
    }

    /// Number of distinct rules after deduplication.
    pub fn rule_count(&self) -> usize {
        self.base.len() + self.test.len()
    }
}
