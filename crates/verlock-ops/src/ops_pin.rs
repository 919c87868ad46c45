//! Operation: add or update an override rule in Verlock.toml.

use std::path::Path;

use toml_edit::{value, ArrayOfTables, DocumentMut, Item, Table};
use verlock_core::coordinate::{is_valid_version, ModuleId};
use verlock_core::rule::RuleScope;
use verlock_util::errors::VerlockError;
use verlock_util::fs::write_atomic;

/// Options for `verlock pin`.
pub struct PinOptions {
    /// `group` or `group:module`.
    pub target: String,
    pub version: String,
    /// Apply only under the test context.
    pub test: bool,
}

/// What `pin` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinOutcome {
    Added,
    /// An existing rule for the same key and scope got a new version.
    Updated { previous: String },
    Unchanged,
}

/// Add an `[[override]]` to `Verlock.toml` using format-preserving edits.
///
/// A rule with the same key and scope is updated in place rather than
/// duplicated, so pinning never introduces a rule conflict.
pub fn pin(manifest_path: &Path, opts: &PinOptions) -> miette::Result<PinOutcome> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| VerlockError::Manifest {
        message: format!("Failed to read {}: {e}", manifest_path.display()),
    })?;
    let mut doc: DocumentMut = content.parse().map_err(|e| VerlockError::Manifest {
        message: format!("Failed to parse Verlock.toml: {e}"),
    })?;

    let (field, key) = match opts.target.split_once(':') {
        Some(_) => {
            let id = ModuleId::parse(&opts.target).ok_or_else(|| VerlockError::Generic {
                message: format!(
                    "Invalid pin target '{}'. Expected group or group:module",
                    opts.target
                ),
            })?;
            ("module", id.to_string())
        }
        None if !opts.target.trim().is_empty() => ("group", opts.target.trim().to_string()),
        None => {
            return Err(VerlockError::Generic {
                message: "Pin target must not be empty".to_string(),
            }
            .into())
        }
    };
    let version = opts.version.trim();
    if !is_valid_version(version) {
        return Err(VerlockError::Generic {
            message: format!(
                "Invalid version '{version}'. It must be non-empty, without '=', ':' or control characters"
            ),
        }
        .into());
    }
    let scope = if opts.test {
        RuleScope::Test
    } else {
        RuleScope::All
    };

    if !doc.as_table().contains_key("override") {
        doc.as_table_mut()
            .insert("override", Item::ArrayOfTables(ArrayOfTables::new()));
    }
    let overrides = doc["override"]
        .as_array_of_tables_mut()
        .ok_or_else(|| VerlockError::Manifest {
            message: "'override' must be an array of tables ([[override]])".to_string(),
        })?;

    let existing = overrides.iter_mut().find(|table| {
        let table_scope = table.get("scope").and_then(Item::as_str).unwrap_or("all");
        table.get(field).and_then(Item::as_str) == Some(key.as_str())
            && table_scope == scope.as_str()
    });

    let outcome = match existing {
        Some(table) => {
            let previous = table
                .get("version")
                .and_then(Item::as_str)
                .unwrap_or_default()
                .to_string();
            if previous == version {
                return Ok(PinOutcome::Unchanged);
            }
            table["version"] = value(version);
            PinOutcome::Updated { previous }
        }
        None => {
            let mut table = Table::new();
            table[field] = value(key.as_str());
            table["version"] = value(version);
            if scope == RuleScope::Test {
                table["scope"] = value(scope.as_str());
            }
            overrides.push(table);
            PinOutcome::Added
        }
    };

    write_atomic(manifest_path, &doc.to_string()).map_err(VerlockError::Io)?;
    tracing::info!("Pinned {key} to {version} (scope: {scope})");
    Ok(outcome)
}
