//! Dependency lookup and transitive walking over a parsed lock file.
//!
//! Nothing here computes a resolution: the lock file already records one.
//! The resolver is pure - all I/O happens before a [`LockFile`] exists.
//!
//! [`LockFile`]: crate::core::LockFile

pub mod encode;
pub mod errors;
pub mod library;
pub mod walk;

pub use encode::AssetsFile;
pub use errors::ResolveError;
pub use library::{resolve_library, LibraryResolver, LookupStrategy};
pub use walk::{walk, TransitiveDependencies};
