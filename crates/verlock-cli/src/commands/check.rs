use std::path::Path;

use miette::Result;
use verlock_ops::ops_check;
use verlock_util::progress;

pub fn exec(manifest_path: Option<&Path>) -> Result<()> {
    let project = super::load_project(manifest_path)?;
    let verified = ops_check::check(&project)?;
    progress::status("Verified", &format!("{verified} locked entries match"));
    Ok(())
}
