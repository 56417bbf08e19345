//! Package closures: everything that must be installed for a library, a
//! project, or every library of a target.

use std::collections::HashSet;

use miette::Diagnostic as MietteDiagnostic;
use rayon::prelude::*;
use thiserror::Error;

use crate::core::{Library, LibraryVersion, LockFile, Target, TargetLibrary, VersionRange};
use crate::resolver::{walk, LibraryResolver, LookupStrategy, ResolveError};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Options shared by the closure operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureOptions {
    /// Drop repeated libraries, keeping the first occurrence.
    pub dedupe: bool,
}

/// Error computing a closure.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ClosureError {
    #[error("target `{target}` not found in the lock file")]
    #[diagnostic(code(lockwalk::closure::target_not_found))]
    TargetNotFound {
        target: String,
        available: Vec<String>,
    },

    #[error("the lock file has {} targets; choose one", .available.len())]
    #[diagnostic(code(lockwalk::closure::ambiguous_target))]
    AmbiguousTarget { available: Vec<String> },

    #[error("library `{name}` not found in target `{target}`")]
    #[diagnostic(code(lockwalk::closure::root_not_found))]
    RootNotFound { name: String, target: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

impl ClosureError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClosureError::TargetNotFound { .. } => "LW1101",
            ClosureError::AmbiguousTarget { .. } => "LW1102",
            ClosureError::RootNotFound { .. } => "LW1103",
            ClosureError::Resolve(err) => err.error_code(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ClosureError::Resolve(err) => err.to_diagnostic(),

            ClosureError::TargetNotFound { available, .. }
            | ClosureError::AmbiguousTarget { available } => {
                let mut diag = Diagnostic::error(self.to_string()).with_code(self.error_code());
                if available.is_empty() {
                    diag = diag.with_context("the lock file has no targets");
                } else {
                    diag = diag.with_context(format!("available targets: {}", available.join(", ")));
                }
                diag.with_suggestion(suggestions::CHOOSE_TARGET)
            }

            ClosureError::RootNotFound { .. } => Diagnostic::error(self.to_string())
                .with_code(self.error_code())
                .with_suggestion(suggestions::LIST_TARGETS),
        }
    }
}

/// A dependency that only resolved by ignoring its requested version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximateMatch<'a> {
    /// The target library declaring the dependency
    pub dependent: &'a TargetLibrary,
    /// Declared dependency name
    pub name: &'a str,
    /// Declared range
    pub range: &'a VersionRange,
    /// What the lock file actually holds
    pub resolved: &'a Library,
}

impl ApproximateMatch<'_> {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let requested = self
            .range
            .min_version()
            .map_or_else(|| self.range.to_string(), LibraryVersion::to_string);

        Diagnostic::warning(format!(
            "{} depends on {} ({}) but {} {} was not found; using {}",
            self.dependent,
            self.name,
            self.range,
            self.name,
            requested,
            self.resolved
        ))
        .with_code("LW2001")
    }
}

/// Pick a target by name, or the only target when no name is given.
pub fn select_target<'a>(
    lock_file: &'a LockFile,
    name: Option<&str>,
) -> Result<&'a Target, ClosureError> {
    let available = || -> Vec<String> {
        lock_file
            .targets()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    };

    match name {
        Some(name) => lock_file
            .target(name)
            .ok_or_else(|| ClosureError::TargetNotFound {
                target: name.to_string(),
                available: available(),
            }),
        None => match lock_file.targets() {
            [only] => Ok(only),
            _ => Err(ClosureError::AmbiguousTarget {
                available: available(),
            }),
        },
    }
}

/// Everything `library_name` transitively depends on within `target`.
pub fn library_closure<'a>(
    lock_file: &'a LockFile,
    target: &'a Target,
    library_name: &str,
    options: ClosureOptions,
) -> Result<Vec<&'a Library>, ClosureError> {
    let root = target
        .library(library_name)
        .ok_or_else(|| ClosureError::RootNotFound {
            name: library_name.to_string(),
            target: target.name().to_string(),
        })?;

    let libraries = walk(root, lock_file, target).try_collect()?;
    Ok(finish(libraries, options))
}

/// Every library the project needs for `target`: each direct project
/// dependency followed by its transitive dependencies.
pub fn project_closure<'a>(
    lock_file: &'a LockFile,
    target: &'a Target,
    options: ClosureOptions,
) -> Result<Vec<&'a Library>, ClosureError> {
    let resolver = LibraryResolver::new(lock_file);
    let mut libraries = Vec::new();

    for dependency in lock_file.project_dependencies(target) {
        let library = resolver.resolve(dependency.name(), dependency.range())?;
        libraries.push(library);

        let root = target
            .library(dependency.name())
            .or_else(|| target.library(library.name()))
            .ok_or_else(|| ResolveError::TargetLibraryNotFound {
                name: dependency.name().to_string(),
                target: target.name().to_string(),
            })?;

        for library in walk(root, lock_file, target) {
            libraries.push(library?);
        }
    }

    Ok(finish(libraries, options))
}

/// The closure of every library in `target`, in target order.
///
/// Closures are computed in parallel; the lock file is shared read-only.
pub fn target_closures<'a>(
    lock_file: &'a LockFile,
    target: &'a Target,
    options: ClosureOptions,
) -> Result<Vec<(&'a TargetLibrary, Vec<&'a Library>)>, ClosureError> {
    target
        .libraries()
        .par_iter()
        .map(|root| -> Result<_, ClosureError> {
            let libraries = walk(root, lock_file, target).try_collect()?;
            Ok((root, finish(libraries, options)))
        })
        .collect()
}

/// Dependencies in `target` that only resolve by ignoring their version.
pub fn approximate_matches<'a>(lock_file: &'a LockFile, target: &'a Target) -> Vec<ApproximateMatch<'a>> {
    let resolver = LibraryResolver::new(lock_file);

    target
        .libraries()
        .iter()
        .flat_map(|dependent| {
            dependent
                .dependencies()
                .iter()
                .map(move |dependency| (dependent, dependency))
        })
        .filter_map(|(dependent, dependency)| {
            match resolver.resolve_with_strategy(dependency.name(), dependency.range()) {
                Ok((resolved, strategy)) if strategy == LookupStrategy::CaseInsensitiveAnyVersion => {
                    Some(ApproximateMatch {
                        dependent,
                        name: dependency.name(),
                        range: dependency.range(),
                        resolved,
                    })
                }
                _ => None,
            }
        })
        .collect()
}

fn finish(libraries: Vec<&Library>, options: ClosureOptions) -> Vec<&Library> {
    if options.dedupe {
        dedupe(libraries)
    } else {
        libraries
    }
}

/// Keep the first occurrence of each (name, version).
pub fn dedupe(libraries: Vec<&Library>) -> Vec<&Library> {
    let mut seen = HashSet::new();
    libraries
        .into_iter()
        .filter(|library| seen.insert((library.name(), library.version())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::lockfile::parse_lock_file;
    use crate::test_support::{LockFileBuilder, ASSETS_JSON, CYCLIC_ASSETS_JSON, RUNTIME_TARGET, TARGET};

    fn keys(libraries: &[&Library]) -> Vec<String> {
        libraries.iter().map(|l| l.key()).collect()
    }

    fn diamond() -> LockFile {
        LockFileBuilder::new()
            .target("net472")
            .package("A", "1.0", &[("B", "1.0"), ("C", "1.0")])
            .package("B", "1.0", &[("D", "1.0")])
            .package("C", "1.0", &[("D", "1.0")])
            .package("D", "1.0", &[])
            .project_dependency("net472", "A", "1.0")
            .build()
    }

    #[test]
    fn test_library_closure_from_assets() {
        let lock_file = parse_lock_file(ASSETS_JSON).unwrap();
        let target = select_target(&lock_file, Some(TARGET)).unwrap();

        let closure =
            library_closure(&lock_file, target, "Contoso.Logging", ClosureOptions::default())
                .unwrap();

        assert_eq!(
            keys(&closure),
            vec![
                "NEST/1.9.1",
                "Elasticsearch.Net/1.9.1",
                "newtonsoft.json/9.0.1",
                "newtonsoft.json/9.0.1",
            ]
        );
    }

    #[test]
    fn test_project_closure_with_dedupe() {
        let lock_file = parse_lock_file(ASSETS_JSON).unwrap();
        let target = select_target(&lock_file, Some(TARGET)).unwrap();

        let closure = project_closure(&lock_file, target, ClosureOptions { dedupe: true }).unwrap();

        assert_eq!(
            keys(&closure),
            vec![
                "Contoso.Logging/1.0.0",
                "NEST/1.9.1",
                "Elasticsearch.Net/1.9.1",
                "newtonsoft.json/9.0.1",
            ]
        );
    }

    #[test]
    fn test_project_closure_for_runtime_target() {
        let lock_file = parse_lock_file(ASSETS_JSON).unwrap();
        let target = select_target(&lock_file, Some(RUNTIME_TARGET)).unwrap();

        let closure = project_closure(&lock_file, target, ClosureOptions::default()).unwrap();

        assert_eq!(
            keys(&closure),
            vec!["Contoso.Logging/1.0.0", "newtonsoft.json/9.0.1"]
        );
    }

    #[test]
    fn test_diamond_with_and_without_dedupe() {
        let lock_file = diamond();
        let target = lock_file.target("net472").unwrap();

        let all = library_closure(&lock_file, target, "A", ClosureOptions::default()).unwrap();
        assert_eq!(keys(&all), vec!["B/1.0.0", "D/1.0.0", "C/1.0.0", "D/1.0.0"]);

        let unique =
            library_closure(&lock_file, target, "A", ClosureOptions { dedupe: true }).unwrap();
        assert_eq!(keys(&unique), vec!["B/1.0.0", "D/1.0.0", "C/1.0.0"]);
    }

    #[test]
    fn test_target_closures_keep_target_order() {
        let lock_file = diamond();
        let target = lock_file.target("net472").unwrap();

        let closures = target_closures(&lock_file, target, ClosureOptions { dedupe: true }).unwrap();

        let summary: Vec<_> = closures
            .iter()
            .map(|(root, libs)| (root.name(), libs.len()))
            .collect();
        assert_eq!(summary, vec![("A", 3), ("B", 1), ("C", 1), ("D", 0)]);
    }

    #[test]
    fn test_cycle_propagates() {
        let lock_file = parse_lock_file(CYCLIC_ASSETS_JSON).unwrap();
        let target = select_target(&lock_file, None).unwrap();

        let err = library_closure(&lock_file, target, "A", ClosureOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ClosureError::Resolve(ResolveError::CyclicDependency { .. })
        ));

        let err = target_closures(&lock_file, target, ClosureOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "LW1003");
    }

    #[test]
    fn test_resolve_error_keeps_both_codes() {
        let err = ClosureError::from(ResolveError::CyclicDependency {
            path: vec!["A/1.0.0".into(), "A/1.0.0".into()],
        });

        assert_eq!(err.error_code(), "LW1003");
        let code = MietteDiagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("lockwalk::resolve::cyclic_dependency"));

        let root = ClosureError::RootNotFound {
            name: "Z".into(),
            target: "net472".into(),
        };
        let code = MietteDiagnostic::code(&root).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("lockwalk::closure::root_not_found"));
    }

    #[test]
    fn test_unknown_root() {
        let lock_file = diamond();
        let target = lock_file.target("net472").unwrap();

        let err = library_closure(&lock_file, target, "Z", ClosureOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ClosureError::RootNotFound {
                name: "Z".into(),
                target: "net472".into()
            }
        );
    }

    #[test]
    fn test_select_target() {
        let lock_file = parse_lock_file(ASSETS_JSON).unwrap();

        let err = select_target(&lock_file, None).unwrap_err();
        assert!(matches!(err, ClosureError::AmbiguousTarget { ref available } if available.len() == 2));

        let err = select_target(&lock_file, Some("net8.0")).unwrap_err();
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error[LW1101]"));
        assert!(output.contains(TARGET));
    }

    #[test]
    fn test_approximate_matches() {
        let lock_file = parse_lock_file(ASSETS_JSON).unwrap();
        let target = lock_file.target(TARGET).unwrap();

        let matches = approximate_matches(&lock_file, target);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].dependent.name(), "Contoso.Logging");
        assert_eq!(matches[0].resolved.key(), "NEST/1.9.1");

        let output = matches[0].to_diagnostic().format(false);
        assert!(output.contains("warning[LW2001]"));
        assert!(output.contains("NEST 1.9.0 was not found; using NEST/1.9.1"));
    }
}
