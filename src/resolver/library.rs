//! Library lookup with case-insensitive fallbacks.
//!
//! The global library set is keyed by exact name, but a package can be
//! declared as a dependency under a different letter case than the one it
//! was resolved under. When the upstream resolver also picked an
//! approximate version (dependency on `NEST >= 1.9.0`, only `NEST 1.9.1`
//! available), the declared minimum no longer matches the recorded version
//! either. A lock file keeps a single version per case-insensitive name, so
//! the last strategy takes whichever version is recorded.

use std::fmt;

use crate::core::{names_match_ignore_case, Library, LibraryVersion, LockFile, VersionRange};
use crate::resolver::errors::ResolveError;

/// One way of matching a dependency reference against the library set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStrategy {
    /// Same name (case-sensitive), version equal to the range minimum.
    Exact,
    /// Name equal ignoring case, version equal to the range minimum.
    CaseInsensitive,
    /// First library whose name is equal ignoring case, any version.
    CaseInsensitiveAnyVersion,
}

impl LookupStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDER: [LookupStrategy; 3] = [
        LookupStrategy::Exact,
        LookupStrategy::CaseInsensitive,
        LookupStrategy::CaseInsensitiveAnyVersion,
    ];

    /// Whether this strategy only runs after the exact lookup missed.
    pub fn is_fallback(self) -> bool {
        self != LookupStrategy::Exact
    }

    /// Whether the match may carry a different version than requested.
    pub fn ignores_version(self) -> bool {
        self == LookupStrategy::CaseInsensitiveAnyVersion
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LookupStrategy::Exact => "exact",
            LookupStrategy::CaseInsensitive => "case-insensitive",
            LookupStrategy::CaseInsensitiveAnyVersion => "case-insensitive, any version",
        }
    }

    fn find<'a>(
        self,
        lock_file: &'a LockFile,
        name: &str,
        min_version: Option<&LibraryVersion>,
    ) -> Option<&'a Library> {
        match self {
            LookupStrategy::Exact => lock_file.library(name, min_version?),
            LookupStrategy::CaseInsensitive => {
                let version = min_version?;
                lock_file.libraries().iter().find(|library| {
                    names_match_ignore_case(library.name(), name) && library.version() == version
                })
            }
            LookupStrategy::CaseInsensitiveAnyVersion => lock_file
                .libraries()
                .iter()
                .find(|library| names_match_ignore_case(library.name(), name)),
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves dependency references to libraries of one lock file.
#[derive(Debug, Clone, Copy)]
pub struct LibraryResolver<'a> {
    lock_file: &'a LockFile,
}

impl<'a> LibraryResolver<'a> {
    pub fn new(lock_file: &'a LockFile) -> Self {
        LibraryResolver { lock_file }
    }

    pub fn lock_file(&self) -> &'a LockFile {
        self.lock_file
    }

    /// Find the library for `name` and `range`.
    pub fn resolve(&self, name: &str, range: &VersionRange) -> Result<&'a Library, ResolveError> {
        self.resolve_with_strategy(name, range)
            .map(|(library, _)| library)
    }

    /// Find the library for `name` and `range`, reporting which strategy hit.
    pub fn resolve_with_strategy(
        &self,
        name: &str,
        range: &VersionRange,
    ) -> Result<(&'a Library, LookupStrategy), ResolveError> {
        let min_version = range.min_version();

        for strategy in LookupStrategy::ORDER {
            if let Some(library) = strategy.find(self.lock_file, name, min_version) {
                if strategy.is_fallback() {
                    tracing::debug!(
                        "resolved `{} {}` to {} using {} lookup",
                        name,
                        range,
                        library,
                        strategy
                    );
                }
                return Ok((library, strategy));
            }
        }

        Err(ResolveError::LibraryNotFound {
            name: name.to_string(),
            range: range.clone(),
        })
    }
}

/// Resolve a single dependency reference against `lock_file`.
pub fn resolve_library<'a>(
    lock_file: &'a LockFile,
    name: &str,
    range: &VersionRange,
) -> Result<&'a Library, ResolveError> {
    LibraryResolver::new(lock_file).resolve(name, range)
}
