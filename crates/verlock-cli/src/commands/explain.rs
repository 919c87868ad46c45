use std::path::Path;

use miette::Result;
use verlock_core::context::ResolutionContext;
use verlock_ops::ops_explain;

pub fn exec(
    manifest_path: Option<&Path>,
    module: &str,
    context: Option<ResolutionContext>,
) -> Result<()> {
    let project = super::load_project(manifest_path)?;
    print!("{}", ops_explain::explain(&project, module, context)?);
    Ok(())
}
