//! Handler for `verlock resolve`.

use std::path::Path;

use miette::Result;
use verlock_core::context::ResolutionContext;
use verlock_ops::ops_resolve::{self, OutputFormat, ResolveOptions};

pub fn exec(
    manifest_path: Option<&Path>,
    context: Option<ResolutionContext>,
    format: OutputFormat,
) -> Result<()> {
    let project = super::load_project(manifest_path)?;
    let output = ops_resolve::resolve(&project, &ResolveOptions { context, format })?;
    print!("{output}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
