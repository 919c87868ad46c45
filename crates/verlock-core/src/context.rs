use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The resolution contexts a project is resolved under.
///
/// `Test` layers test-only overrides on top of the rules that apply
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionContext {
    Default,
    Test,
}

impl ResolutionContext {
    /// Every context, in lock file order.
    pub const ALL: [ResolutionContext; 2] = [ResolutionContext::Default, ResolutionContext::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(Self::Default),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "unknown context '{other}' (expected 'default' or 'test')"
            )),
        }
    }
}
