//! Version resolution policy: override rules layered per context, strict
//! version-conflict detection, lock file generation and drift checks.

pub mod conflict;
pub mod error;
pub mod lock;
pub mod policy;
pub mod resolver;
pub mod version;
