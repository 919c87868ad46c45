//! Handler for `verlock pin`.

use std::path::Path;

use miette::Result;
use verlock_ops::ops_pin::{self, PinOptions, PinOutcome};
use verlock_util::progress;

pub fn exec(manifest_path: Option<&Path>, target: String, version: String, test: bool) -> Result<()> {
    let project = super::load_project(manifest_path)?;
    let scope = if test { "test" } else { "all" };
    let opts = PinOptions {
        target,
        version,
        test,
    };

    match ops_pin::pin(&project.manifest_path, &opts)? {
        PinOutcome::Added => progress::status(
            "Pinned",
            &format!("{} to {} (scope: {scope})", opts.target, opts.version),
        ),
        PinOutcome::Updated { previous } => progress::status(
            "Pinned",
            &format!(
                "{} from {previous} to {} (scope: {scope})",
                opts.target, opts.version
            ),
        ),
        PinOutcome::Unchanged => progress::status_info(
            "Unchanged",
            &format!("{} already pinned to {}", opts.target, opts.version),
        ),
    }
    Ok(())
}
