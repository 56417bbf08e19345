//! Test utilities for lockwalk unit tests.
//!
//! Provides a builder for in-memory lock files and helpers for writing
//! assets files to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use lockwalk::test_support::LockFileBuilder;
//!
//! let lock_file = LockFileBuilder::new()
//!     .target("net472")
//!     .package("A", "1.0", &[("B", "1.0")])
//!     .package("B", "1.0", &[])
//!     .build();
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

use crate::core::{
    DependencySpec, Library, LibraryVersion, LockFile, ProjectDependencyGroup, Target,
    TargetLibrary, VersionRange,
};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Builder for lock files in tests.
///
/// Versions and ranges are given as strings and parsed eagerly; a bad
/// literal panics, which is what a test wants.
#[derive(Debug, Default)]
pub struct LockFileBuilder {
    libraries: Vec<Library>,
    targets: Vec<(String, Vec<TargetLibrary>)>,
    groups: Vec<ProjectDependencyGroup>,
    format_version: Option<u32>,
}

impl LockFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a library to the global set only.
    pub fn library(mut self, name: &str, version: &str) -> Self {
        self.libraries.push(library(name, version));
        self
    }

    /// Start a new target; following `package` calls add to it.
    pub fn target(mut self, name: &str) -> Self {
        self.targets.push((name.to_string(), Vec::new()));
        self
    }

    /// Add a package to the current target, and to the global set unless
    /// the same (name, version) is already there.
    pub fn package(mut self, name: &str, version: &str, deps: &[(&str, &str)]) -> Self {
        let parsed: LibraryVersion = version.parse().unwrap();
        if !self
            .libraries
            .iter()
            .any(|l| l.name() == name && l.version() == &parsed)
        {
            self.libraries.push(library(name, version));
        }

        let dependencies = deps
            .iter()
            .map(|(dep, range)| DependencySpec::new(*dep, range.parse::<VersionRange>().unwrap()))
            .collect();

        let (_, libraries) = self
            .targets
            .last_mut()
            .expect("call `target` before `package`");
        libraries.push(TargetLibrary::new(name, parsed).with_dependencies(dependencies));
        self
    }

    /// Add a direct project dependency for `framework` (`""` for all).
    pub fn project_dependency(mut self, framework: &str, name: &str, range: &str) -> Self {
        let spec = DependencySpec::new(name, range.parse::<VersionRange>().unwrap());
        match self.groups.iter().position(|g| g.framework() == framework) {
            Some(index) => {
                let group = &self.groups[index];
                let mut deps = group.dependencies().to_vec();
                deps.push(spec);
                self.groups[index] = ProjectDependencyGroup::new(framework, deps);
            }
            None => self
                .groups
                .push(ProjectDependencyGroup::new(framework, vec![spec])),
        }
        self
    }

    pub fn format_version(mut self, version: u32) -> Self {
        self.format_version = Some(version);
        self
    }

    pub fn build(self) -> LockFile {
        let targets = self
            .targets
            .into_iter()
            .map(|(name, libraries)| Target::new(name, libraries).unwrap())
            .collect();

        let mut lock_file = LockFile::new(self.libraries, targets)
            .unwrap()
            .with_project_dependencies(self.groups);
        if let Some(version) = self.format_version {
            lock_file = lock_file.with_format_version(version);
        }
        lock_file
    }
}

/// A library with a path and hash the way restore writes them.
pub fn library(name: &str, version: &str) -> Library {
    let parsed: LibraryVersion = version.parse().unwrap();
    Library::new(name, parsed.clone())
        .with_path(format!("{}/{}", name.to_lowercase(), parsed))
        .with_sha512(format!("sha512-{}-{}", name.to_lowercase(), parsed))
}

/// Write `content` as `obj/project.assets.json` under `dir`.
pub fn write_assets(dir: &Path, content: &str) -> PathBuf {
    let obj = dir.join("obj");
    std::fs::create_dir_all(&obj).unwrap();
    let path = obj.join("project.assets.json");
    std::fs::write(&path, content).unwrap();
    path
}
