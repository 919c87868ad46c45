pub mod ops_check;
pub mod ops_explain;
pub mod ops_lock;
pub mod ops_pin;
pub mod ops_resolve;
pub mod project;

use verlock_resolver::resolver::Resolution;

/// Show the range warnings of `resolutions` as status lines.
pub fn report_warnings(resolutions: &[Resolution]) {
    for warning in resolutions.iter().flat_map(|r| &r.warnings) {
        verlock_util::progress::status_warn("Warning", &warning.to_string());
    }
}
