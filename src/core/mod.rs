//! Core data structures for lockwalk.
//!
//! This module contains the read-only lock file model:
//! - Versions and version ranges
//! - Resolved libraries and per-target library records
//! - The lock file itself, with its targets and project dependency groups

pub mod library;
pub mod lock_file;
pub mod version;

pub use library::{names_match_ignore_case, DependencySpec, Library, TargetLibrary};
pub use lock_file::{
    LockFile, LockFileError, ProjectDependencyGroup, Target, LOCK_FILE_FORMAT_VERSION,
};
pub use version::{LibraryVersion, VersionError, VersionRange};
