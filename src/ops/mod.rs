//! High-level operations.
//!
//! This module contains the implementation of lockwalk commands.

pub mod closure;
pub mod lockfile;

pub use closure::{
    approximate_matches, library_closure, project_closure, select_target, target_closures,
    ApproximateMatch, ClosureError, ClosureOptions,
};
pub use lockfile::{find_lock_file, load_lock_file, parse_lock_file, save_lock_file};
