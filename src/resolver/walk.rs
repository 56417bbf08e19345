//! Transitive dependency walking within one target.
//!
//! The walk is lazy, depth-first and pre-order: each dependency is yielded
//! before everything it depends on. Shared dependencies are yielded once per
//! path that reaches them. A dependency that leads back onto the current path
//! ends the walk with [`ResolveError::CyclicDependency`].
//!
//! A dependency is matched to its target entry by exact, case-sensitive
//! name. A dependency declared as `nest` does not find a target entry
//! `NEST/1.9.1` and fails with [`ResolveError::TargetLibraryNotFound`];
//! only the lookup in the global library set falls back on case.

use std::iter::FusedIterator;

use crate::core::{DependencySpec, Library, LockFile, Target, TargetLibrary};
use crate::resolver::errors::ResolveError;
use crate::resolver::library::LibraryResolver;

/// Start a walk over everything `target_library` transitively depends on.
///
/// Every call starts from scratch; the returned iterator owns its cursor.
pub fn walk<'a>(
    target_library: &'a TargetLibrary,
    lock_file: &'a LockFile,
    target: &'a Target,
) -> TransitiveDependencies<'a> {
    TransitiveDependencies::new(target_library, lock_file, target)
}

/// A position in the walk: a target library and its next dependency.
#[derive(Debug, Clone)]
struct Frame<'a> {
    library: &'a TargetLibrary,
    next: usize,
}

/// Iterator over the transitive dependencies of a target library.
///
/// Yields `Err` at most once; the iterator is exhausted afterwards.
#[derive(Debug, Clone)]
pub struct TransitiveDependencies<'a> {
    resolver: LibraryResolver<'a>,
    target: &'a Target,
    /// The current path from the root, root first
    stack: Vec<Frame<'a>>,
}

impl<'a> TransitiveDependencies<'a> {
    pub fn new(root: &'a TargetLibrary, lock_file: &'a LockFile, target: &'a Target) -> Self {
        TransitiveDependencies {
            resolver: LibraryResolver::new(lock_file),
            target,
            stack: vec![Frame {
                library: root,
                next: 0,
            }],
        }
    }

    /// Drive the walk to completion, stopping at the first error.
    pub fn try_collect(self) -> Result<Vec<&'a Library>, ResolveError> {
        self.collect()
    }

    fn step(&mut self, dependency: &'a DependencySpec) -> Result<&'a Library, ResolveError> {
        let child = self.target.library(dependency.name()).ok_or_else(|| {
            ResolveError::TargetLibraryNotFound {
                name: dependency.name().to_string(),
                target: self.target.name().to_string(),
            }
        })?;

        if self.stack.iter().any(|frame| frame.library.same_identity(child)) {
            let path = self
                .stack
                .iter()
                .map(|frame| frame.library.key())
                .chain(std::iter::once(child.key()))
                .collect();
            return Err(ResolveError::CyclicDependency { path });
        }

        let library = self.resolver.resolve(dependency.name(), dependency.range())?;

        tracing::trace!("{} -> {}", self.stack.len(), library);

        self.stack.push(Frame {
            library: child,
            next: 0,
        });

        Ok(library)
    }
}

impl<'a> Iterator for TransitiveDependencies<'a> {
    type Item = Result<&'a Library, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let library = frame.library;

            let Some(dependency) = library.dependencies().get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            return match self.step(dependency) {
                Ok(library) => Some(Ok(library)),
                Err(err) => {
                    self.stack.clear();
                    Some(Err(err))
                }
            };
        }
    }
}

impl FusedIterator for TransitiveDependencies<'_> {}
