//! Operation: explain why a module resolves to its version.

use std::fmt::Write as _;

use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::ModuleId;
use verlock_core::lockfile::LockFile;
use verlock_resolver::error::ResolveError;
use verlock_resolver::resolver;
use verlock_util::errors::VerlockError;

use crate::ops_resolve::selected_contexts;
use crate::project::Project;

/// Describe how `module` (`group:module`) resolves under each selected context.
///
/// Lists every rule that matches it, layer by layer, marking the one that
/// decides. Only the module's own requests are resolved, so conflicts on
/// other modules do not hide the answer, and a conflict on this module is
/// reported in the explanation instead of failing.
pub fn explain(
    project: &Project,
    module: &str,
    context: Option<ResolutionContext>,
) -> miette::Result<String> {
    let id = ModuleId::parse(module).ok_or_else(|| VerlockError::Generic {
        message: format!("Invalid module '{module}'. Expected group:module"),
    })?;
    let policy = project.policy()?;
    let lock = LockFile::load_if_exists(&project.lock_path())?;

    let mut out = String::new();
    let _ = writeln!(out, "{id}");

    for ctx in selected_contexts(context) {
        let requests: Vec<_> = project
            .manifest
            .requests(ctx)?
            .into_iter()
            .filter(|r| r.id == id)
            .collect();
        if requests.is_empty() {
            let _ = writeln!(out, "  [{ctx}] not requested");
            continue;
        }
        let requested: Vec<&str> = requests
            .iter()
            .map(|r| r.requested_version.as_str())
            .collect();

        let _ = writeln!(out, "  [{ctx}]");
        let _ = writeln!(out, "    requested: {}", requested.join(", "));

        let winner = policy.select(&id, ctx);
        for layer in policy.layers(ctx) {
            if let Some(rule) = layer.lookup(&id) {
                let marker = if winner == Some(rule) { "*" } else { " " };
                let _ = writeln!(out, "    rule {marker}   {rule}");
            }
        }

        match resolver::resolve(&requests, &policy, ctx) {
            Ok(resolution) => {
                if let Some(m) = resolution.get(&id) {
                    let _ = writeln!(out, "    resolved:  {}", m.version);
                    let _ = writeln!(out, "    reason:    {}", m.reason);
                }
                for w in resolution.warnings.iter().filter(|w| w.id == id) {
                    let _ = writeln!(out, "    warning:   outside requested range {}", w.range);
                }
            }
            Err(ResolveError::Conflict(report)) => {
                for c in &report.conflicts {
                    let _ = writeln!(out, "    conflict:  {}", c.reason);
                }
            }
            Err(other) => return Err(other.into()),
        }

        if let Some(lock) = &lock {
            let locked = lock.get(ctx, &id).unwrap_or("(not locked)");
            let _ = writeln!(out, "    locked:    {locked}");
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(body: &str) -> (tempfile::TempDir, Project) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Verlock.toml");
        std::fs::write(&path, body).unwrap();
        let project = Project::load(&path).unwrap();
        (tmp, project)
    }

    const MANIFEST: &str = r#"
dependencies = ["commons-io:commons-io:2.4", "org.slf4j:slf4j-api:1.7", "org.slf4j:slf4j-api:1.8"]

[[override]]
group = "commons-io"
version = "2.1"

[[override]]
module = "commons-io:commons-io"
version = "2.6"
scope = "test"
"#;

    #[test]
    fn shows_layers_and_winner() {
        let (_tmp, project) = project(MANIFEST);
        let out = explain(&project, "commons-io:commons-io", None).unwrap();
        assert!(out.starts_with("commons-io:commons-io\n"));
        assert!(out.contains("    rule *   commons-io:* -> 2.1 (scope: all)"));
        assert!(out.contains("    rule     commons-io:* -> 2.1 (scope: all)"));
        assert!(out.contains("    rule *   commons-io:commons-io -> 2.6 (scope: test)"));
        assert!(out.contains("    resolved:  2.6"));
    }

    #[test]
    fn reports_conflict_instead_of_failing() {
        let (_tmp, project) = project(MANIFEST);
        let out = explain(&project, "org.slf4j:slf4j-api", Some(ResolutionContext::Default)).unwrap();
        assert!(out.contains("requested: 1.7, 1.8"));
        assert!(out.contains("conflict:"));
    }

    #[test]
    fn unrequested_module() {
        let (_tmp, project) = project(MANIFEST);
        let out = explain(&project, "junit:junit", Some(ResolutionContext::Test)).unwrap();
        assert!(out.contains("[test] not requested"));
    }

    #[test]
    fn invalid_module_is_rejected() {
        let (_tmp, project) = project(MANIFEST);
        assert!(explain(&project, "junit", None).is_err());
    }
}
