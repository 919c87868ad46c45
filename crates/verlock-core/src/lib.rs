//! Core data types for verlock.
//!
//! This crate defines what a resolution works on: module coordinates,
//! dependency requests, override rules, the `Verlock.toml` manifest, and
//! the `Verlock.lock` record of previously resolved versions.
//!
//! This crate is intentionally free of resolution logic.

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Verlock.toml";

/// File name of the lock file, stored next to the manifest.
pub const LOCK_FILE: &str = "Verlock.lock";

pub mod context;
pub mod coordinate;
pub mod lockfile;
pub mod manifest;
pub mod properties;
pub mod rule;
