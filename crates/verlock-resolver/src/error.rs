use miette::Diagnostic;
use thiserror::Error;

use crate::conflict::{ConflictReport, RuleConflictReport};
use crate::lock::DriftReport;

/// Exit code for [`ResolveError::Conflict`].
pub const EXIT_CONFLICT: i32 = 10;
/// Exit code for [`ResolveError::Drift`].
pub const EXIT_DRIFT: i32 = 11;
/// Exit code for [`ResolveError::RuleConflict`].
pub const EXIT_RULE_CONFLICT: i32 = 12;

/// Policy failures. Each one is fatal to the run and leaves the lock untouched.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// Same module requested at irreconcilable versions with no applicable rule.
    #[error("{0}")]
    #[diagnostic(
        code(verlock::conflict),
        help("Add an [[override]] for each listed module, or align the requested versions")
    )]
    Conflict(ConflictReport),

    /// Fresh resolution differs from Verlock.lock.
    #[error("{0}")]
    #[diagnostic(
        code(verlock::drift),
        help("Run `verlock lock --update` if the new versions are intended")
    )]
    Drift(DriftReport),

    /// Two rules at equal specificity disagree.
    #[error("{0}")]
    #[diagnostic(
        code(verlock::rule_conflict),
        help("Remove one of the rules, or set `duplicate-rules = \"last-wins\"` under [policy]")
    )]
    RuleConflict(RuleConflictReport),
}

impl ResolveError {
    /// Process exit code for this failure, distinct per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Conflict(_) => EXIT_CONFLICT,
            Self::Drift(_) => EXIT_DRIFT,
            Self::RuleConflict(_) => EXIT_RULE_CONFLICT,
        }
    }
}
