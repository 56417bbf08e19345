//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::VersionRange;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while looking up or walking libraries in a lock file.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unable to find library `{name}` matching `{range}` in the lock file")]
    #[diagnostic(code(lockwalk::resolve::library_not_found))]
    LibraryNotFound { name: String, range: VersionRange },

    #[error("`{name}` is declared as a dependency but has no entry in target `{target}`")]
    #[diagnostic(code(lockwalk::resolve::target_library_not_found))]
    TargetLibraryNotFound { name: String, target: String },

    #[error("cyclic dependency detected: {}", .path.join(" -> "))]
    #[diagnostic(code(lockwalk::resolve::cyclic_dependency))]
    CyclicDependency { path: Vec<String> },
}

impl ResolveError {
    /// Stable error code reported to build log sinks.
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::LibraryNotFound { .. } => "LW1001",
            ResolveError::TargetLibraryNotFound { .. } => "LW1002",
            ResolveError::CyclicDependency { .. } => "LW1003",
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_code(self.error_code());

        match self {
            ResolveError::LibraryNotFound { name, range } => {
                let mut diag = diag.with_context(format!(
                    "no library named `{}` (in any letter case) is recorded in `libraries`",
                    name
                ));
                if let Some(min) = range.min_version() {
                    diag = diag.with_context(format!("looked for version {}", min));
                }
                diag.with_suggestion(suggestions::RESTORE)
            }

            ResolveError::TargetLibraryNotFound { name, target } => diag
                .with_context(format!(
                    "target `{}` has no library named exactly `{}`",
                    target, name
                ))
                .with_context("the lock file is truncated or was edited by hand")
                .with_suggestion(suggestions::RESTORE),

            ResolveError::CyclicDependency { path } => diag
                .with_context(format!("cycle: {}", path.join(" -> ")))
                .with_suggestion("Break the cycle by removing one of the dependencies")
                .with_suggestion(suggestions::RESTORE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LibraryVersion;

    #[test]
    fn test_library_not_found_diagnostic() {
        let err = ResolveError::LibraryNotFound {
            name: "NEST".to_string(),
            range: VersionRange::at_least(LibraryVersion::new(1, 9, 0)),
        };

        let output = err.to_diagnostic().format(false);

        assert!(output.contains("error[LW1001]"));
        assert!(output.contains("`NEST`"));
        assert!(output.contains("looked for version 1.9.0"));
    }

    #[test]
    fn test_cycle_message_lists_path() {
        let err = ResolveError::CyclicDependency {
            path: vec!["A/1.0.0".into(), "B/1.0.0".into(), "A/1.0.0".into()],
        };

        assert_eq!(
            err.to_string(),
            "cyclic dependency detected: A/1.0.0 -> B/1.0.0 -> A/1.0.0"
        );
        assert_eq!(err.error_code(), "LW1003");
    }
}
