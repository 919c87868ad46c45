use std::fmt;

use serde::{Deserialize, Serialize};

/// A `group:module` pair identifying one artifact independent of version.
///
/// Ordering is by group, then module, which is also the lock file order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    pub group: String,
    pub module: String,
}

impl ModuleId {
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
        }
    }

    /// Parse `"group:module"`. Surrounding whitespace on either part is dropped.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, module) = s.split_once(':')?;
        let (group, module) = (group.trim(), module.trim());
        if group.is_empty() || module.is_empty() || module.contains(':') {
            return None;
        }
        Some(Self::new(group, module))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.module)
    }
}

/// One declared dependency edge: a module at the version its declarer asked for.
///
/// The requested version is kept verbatim and may be a Maven range such as
/// `[1.0.0,2.0.0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRequest {
    pub id: ModuleId,
    pub requested_version: String,
}

impl DependencyRequest {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        requested_version: impl Into<String>,
    ) -> Self {
        Self {
            id: ModuleId::new(group, module),
            requested_version: requested_version.into(),
        }
    }

    /// Parse `"group:module:version"` into a request.
    ///
    /// The version part may itself contain commas and brackets (ranges) but
    /// never a colon, and must pass [`is_valid_version`].
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split(':').map(str::trim).collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        if !is_valid_version(parts[2]) {
            return None;
        }
        Some(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// Whether `version` can be written to and read back from the lock file.
///
/// `=` separates the coordinate from its contexts on a lock line, so it
/// cannot appear in a version; neither can `:` or control characters.
pub fn is_valid_version(version: &str) -> bool {
    !version.trim().is_empty()
        && !version
            .chars()
            .any(|c| c == '=' || c == ':' || c.is_control())
}

impl fmt::Display for DependencyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.requested_version)
    }
}
