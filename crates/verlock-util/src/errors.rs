use miette::Diagnostic;
use thiserror::Error;

/// Exit code for failures that are not policy violations.
pub const EXIT_FAILURE: i32 = 1;

/// Unified error type for verlock operations outside the resolution policy.
#[derive(Debug, Error, Diagnostic)]
pub enum VerlockError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (Verlock.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(verlock::manifest),
        help("Check your Verlock.toml for syntax errors")
    )]
    Manifest { message: String },

    /// Invalid, missing or unreadable lock file (Verlock.lock).
    #[error("Lock file error: {message}")]
    #[diagnostic(
        code(verlock::lockfile),
        help("Run `verlock lock` to create or regenerate Verlock.lock")
    )]
    Lockfile { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
