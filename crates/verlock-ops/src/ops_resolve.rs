//! Operation: resolve and print versions without touching the lock file.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;
use verlock_core::context::ResolutionContext;
use verlock_resolver::resolver::{Resolution, ResolutionReason};
use verlock_util::errors::VerlockError;

use crate::project::Project;

/// Output format for `verlock resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Options for `verlock resolve`.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Resolve only this context; both when `None`.
    pub context: Option<ResolutionContext>,
    pub format: OutputFormat,
}

/// One row of JSON output.
#[derive(Debug, Serialize)]
pub struct ResolvedEntry {
    pub context: ResolutionContext,
    pub group: String,
    pub module: String,
    pub version: String,
    pub reason: String,
    pub requested: Vec<String>,
}

/// The contexts an optional `--context` flag selects.
pub fn selected_contexts(context: Option<ResolutionContext>) -> Vec<ResolutionContext> {
    match context {
        Some(ctx) => vec![ctx],
        None => ResolutionContext::ALL.to_vec(),
    }
}

/// Resolve the project and render the result.
pub fn resolve(project: &Project, opts: &ResolveOptions) -> miette::Result<String> {
    let resolutions = project.resolve(&selected_contexts(opts.context))?;
    crate::report_warnings(&resolutions);
    match opts.format {
        OutputFormat::Text => Ok(render_text(&resolutions)),
        OutputFormat::Json => render_json(&resolutions),
    }
}

pub fn render_text(resolutions: &[Resolution]) -> String {
    let mut out = String::new();
    for resolution in resolutions {
        let _ = writeln!(
            out,
            "[{}] {} modules",
            resolution.context,
            resolution.modules.len()
        );
        for (id, module) in &resolution.modules {
            let _ = write!(out, "  {id} {}", module.version);
            if module.reason != ResolutionReason::Requested {
                let _ = write!(out, " ({})", module.reason);
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_json(resolutions: &[Resolution]) -> miette::Result<String> {
    let entries: Vec<ResolvedEntry> = resolutions
        .iter()
        .flat_map(|r| {
            r.modules.iter().map(move |(id, m)| ResolvedEntry {
                context: r.context,
                group: id.group.clone(),
                module: id.module.clone(),
                version: m.version.clone(),
                reason: m.reason.to_string(),
                requested: m.requested.iter().cloned().collect(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|e| {
        VerlockError::Generic {
            message: format!("Failed to serialize resolution: {e}"),
        }
        .into()
    })
}
