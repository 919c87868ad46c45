//! Shared utilities for verlock.
//!
//! This crate provides cross-cutting concerns used by all other verlock crates:
//! the common error type, filesystem helpers, and terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;
