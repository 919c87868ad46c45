//! CLI argument definitions for verlock.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use verlock_core::context::ResolutionContext;
use verlock_ops::ops_resolve::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "verlock",
    version,
    about = "Resolve dependency versions against override rules and lock them",
    long_about = "verlock resolves the dependency versions a project requests under its \
                  default and test contexts, applies group and module override rules, fails \
                  on unreconciled version conflicts, and records the result in Verlock.lock."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to Verlock.toml (default: nearest in current or parent directories)
    #[arg(long, global = true, env = "VERLOCK_MANIFEST_PATH")]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and print versions without touching the lock file
    Resolve {
        /// Resolve only this context: default, test
        #[arg(short, long)]
        context: Option<ResolutionContext>,
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve all contexts and write Verlock.lock
    Lock {
        /// Rewrite the lock even if resolved versions drifted from it
        #[arg(long)]
        update: bool,
    },

    /// Verify Verlock.lock matches a fresh resolution
    Check,

    /// Explain why a module resolves to its version
    Explain {
        /// Module coordinate (group:module)
        module: String,
        /// Explain only this context: default, test
        #[arg(short, long)]
        context: Option<ResolutionContext>,
    },

    /// Force a version for a group or module
    Pin {
        /// group or group:module
        target: String,
        /// Version to force
        version: String,
        /// Apply the rule only under the test context
        #[arg(long)]
        test: bool,
    },
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
