//! lockwalk - walk NuGet-style lock files
//!
//! This crate reads a resolved package graph (`project.assets.json`) and
//! recovers, for a library or a whole project, every package it
//! transitively depends on. Library lookup tolerates dependency names whose
//! letter case differs from the resolved entry.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for lockwalk unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    DependencySpec, Library, LibraryVersion, LockFile, Target, TargetLibrary, VersionRange,
};

pub use resolver::{resolve_library, walk, LibraryResolver, ResolveError};
pub use util::context::GlobalContext;
