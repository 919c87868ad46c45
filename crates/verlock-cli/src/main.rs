//! verlock CLI binary.
//!
//! This is the entry point for the `verlock` command-line tool. It parses
//! arguments with `clap`, initializes logging via `tracing`, dispatches to
//! the appropriate command handler, and maps failures to exit codes.

mod cli;
mod commands;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use verlock_resolver::error::ResolveError;
use verlock_util::errors::EXIT_FAILURE;

fn main() -> ExitCode {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match commands::dispatch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let code = report
                .downcast_ref::<ResolveError>()
                .map(ResolveError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            eprintln!("{report:?}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
