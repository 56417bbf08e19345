//! Library records - WHAT was resolved and what each target declares.
//!
//! A [`Library`] is an entry in the lock file's global resolved set. A
//! [`TargetLibrary`] is the per-target view of the same package, carrying
//! the dependencies it declares within that target.

use std::fmt;

use serde::Serialize;

use crate::core::version::{LibraryVersion, VersionRange};

/// Package type used when a lock file does not say otherwise.
pub const DEFAULT_LIBRARY_KIND: &str = "package";

/// Compare two package names ignoring case, one char at a time.
///
/// Each char is folded to its simple uppercase form, so no char ever
/// expands (`ß` stays `ß`) and compatibility chars such as the Kelvin
/// sign do not match their ASCII look-alikes.
pub fn names_match_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.chars().map(simple_uppercase).eq(b.chars().map(simple_uppercase))
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// A resolved library in the lock file's global set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Library {
    name: String,
    version: LibraryVersion,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha512: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<String>,
}

impl Library {
    /// Create a new package library with no installation metadata.
    pub fn new(name: impl Into<String>, version: LibraryVersion) -> Self {
        Library {
            name: name.into(),
            version,
            kind: DEFAULT_LIBRARY_KIND.to_string(),
            sha512: None,
            path: None,
            files: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_sha512(mut self, sha512: impl Into<String>) -> Self {
        self.sha512 = Some(sha512.into());
        self
    }

    /// Set the install path, relative to the package folder.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &LibraryVersion {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn sha512(&self) -> Option<&str> {
        self.sha512.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The `Name/version` key used by the lock file.
    pub fn key(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// A dependency declared by a target library: a name and a version range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencySpec {
    name: String,
    range: VersionRange,
}

impl DependencySpec {
    pub fn new(name: impl Into<String>, range: VersionRange) -> Self {
        DependencySpec {
            name: name.into(),
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> &VersionRange {
        &self.range
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.range)
    }
}

/// A library as seen from one target, with its declared dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLibrary {
    name: String,
    version: LibraryVersion,
    kind: String,
    dependencies: Vec<DependencySpec>,
}

impl TargetLibrary {
    pub fn new(name: impl Into<String>, version: LibraryVersion) -> Self {
        TargetLibrary {
            name: name.into(),
            version,
            kind: DEFAULT_LIBRARY_KIND.to_string(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Append a dependency; declaration order is preserved.
    pub fn with_dependency(mut self, dependency: DependencySpec) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<DependencySpec>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &LibraryVersion {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    /// Check whether `other` names the same (name, version) pair.
    pub fn same_identity(&self, other: &TargetLibrary) -> bool {
        self.name == other.name && self.version == other.version
    }

    pub fn key(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl fmt::Display for TargetLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_ignore_case() {
        assert!(names_match_ignore_case("NEST", "nest"));
        assert!(names_match_ignore_case("Newtonsoft.Json", "newtonsoft.json"));
        assert!(names_match_ignore_case("Ünicode.Pkg", "ünicode.pkg"));
        assert!(!names_match_ignore_case("NEST", "NEST.Core"));
        // Kelvin sign lowercases to `k` but does not uppercase to `K`
        assert!(!names_match_ignore_case("\u{212A}afka.Client", "kafka.client"));
        assert!(!names_match_ignore_case("Straße", "STRASSE"));
        assert!(names_match_ignore_case("Straße", "STRAßE"));
    }

    #[test]
    fn test_library_key() {
        let lib = Library::new("NEST", "1.9.1".parse().unwrap()).with_path("nest/1.9.1");
        assert_eq!(lib.key(), "NEST/1.9.1");
        assert_eq!(lib.path(), Some("nest/1.9.1"));
        assert_eq!(lib.kind(), "package");
    }

    #[test]
    fn test_target_library_keeps_dependency_order() {
        let lib = TargetLibrary::new("A", LibraryVersion::new(1, 0, 0))
            .with_dependency(DependencySpec::new("Z", VersionRange::any()))
            .with_dependency(DependencySpec::new("B", VersionRange::any()));

        let names: Vec<_> = lib.dependencies().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Z", "B"]);
    }
}
