//! LockFile - the immutable, parsed snapshot of a resolved package graph.
//!
//! Once built, a LockFile is read-only. Lookups borrow from it, so any
//! number of threads can resolve against the same instance.

use std::collections::HashMap;

use thiserror::Error;

use crate::core::library::{DependencySpec, Library, TargetLibrary};
use crate::core::version::LibraryVersion;

/// Lock file format version understood by this crate.
pub const LOCK_FILE_FORMAT_VERSION: u32 = 3;

/// Structural problems found while assembling a lock file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockFileError {
    #[error("library `{name}/{version}` is listed more than once")]
    DuplicateLibrary { name: String, version: String },

    #[error("target `{name}` is listed more than once")]
    DuplicateTarget { name: String },

    #[error("library `{name}` appears more than once in target `{target}`")]
    DuplicateTargetLibrary { target: String, name: String },
}

/// A named build target (framework, optionally with a runtime identifier).
#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    libraries: Vec<TargetLibrary>,
    /// Exact name -> position in `libraries`
    by_name: HashMap<String, usize>,
}

impl Target {
    /// Create a target; each library name may appear only once.
    pub fn new(
        name: impl Into<String>,
        libraries: Vec<TargetLibrary>,
    ) -> Result<Self, LockFileError> {
        let name = name.into();
        let mut by_name = HashMap::with_capacity(libraries.len());

        for (index, library) in libraries.iter().enumerate() {
            if by_name.insert(library.name().to_string(), index).is_some() {
                return Err(LockFileError::DuplicateTargetLibrary {
                    target: name,
                    name: library.name().to_string(),
                });
            }
        }

        Ok(Target {
            name,
            libraries,
            by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The framework part of the target name (`net472/win-x64` -> `net472`).
    pub fn framework(&self) -> &str {
        self.name
            .split_once('/')
            .map_or(self.name.as_str(), |(framework, _)| framework)
    }

    /// The runtime identifier part of the target name, if any.
    pub fn runtime(&self) -> Option<&str> {
        self.name.split_once('/').map(|(_, runtime)| runtime)
    }

    pub fn libraries(&self) -> &[TargetLibrary] {
        &self.libraries
    }

    /// Find a target library by exact (case-sensitive) name.
    pub fn library(&self, name: &str) -> Option<&TargetLibrary> {
        self.by_name.get(name).map(|&index| &self.libraries[index])
    }
}

/// Direct dependencies a project declares for one framework.
///
/// An empty framework applies to every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDependencyGroup {
    framework: String,
    dependencies: Vec<DependencySpec>,
}

impl ProjectDependencyGroup {
    pub fn new(framework: impl Into<String>, dependencies: Vec<DependencySpec>) -> Self {
        ProjectDependencyGroup {
            framework: framework.into(),
            dependencies,
        }
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }

    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    fn applies_to(&self, target: &Target) -> bool {
        self.framework.is_empty() || self.framework == target.framework()
    }
}

/// The parsed lock file.
#[derive(Debug, Clone)]
pub struct LockFile {
    version: u32,
    libraries: Vec<Library>,
    targets: Vec<Target>,
    project_dependencies: Vec<ProjectDependencyGroup>,
    /// Exact name -> positions in `libraries`
    by_name: HashMap<String, Vec<usize>>,
}

impl LockFile {
    /// Assemble a lock file, checking that (name, version) pairs and target
    /// names are unique.
    pub fn new(libraries: Vec<Library>, targets: Vec<Target>) -> Result<Self, LockFileError> {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, library) in libraries.iter().enumerate() {
            let slots = by_name.entry(library.name().to_string()).or_default();
            if slots
                .iter()
                .any(|&other| libraries[other].version() == library.version())
            {
                return Err(LockFileError::DuplicateLibrary {
                    name: library.name().to_string(),
                    version: library.version().to_string(),
                });
            }
            slots.push(index);
        }

        for (index, target) in targets.iter().enumerate() {
            if targets[..index].iter().any(|t| t.name() == target.name()) {
                return Err(LockFileError::DuplicateTarget {
                    name: target.name().to_string(),
                });
            }
        }

        Ok(LockFile {
            version: LOCK_FILE_FORMAT_VERSION,
            libraries,
            targets,
            project_dependencies: Vec::new(),
            by_name,
        })
    }

    /// Set the format version recorded in the file.
    pub fn with_format_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_project_dependencies(mut self, groups: Vec<ProjectDependencyGroup>) -> Self {
        self.project_dependencies = groups;
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Check if the format version is one this crate understands.
    pub fn is_compatible(&self) -> bool {
        self.version == LOCK_FILE_FORMAT_VERSION
    }

    /// All resolved libraries, in file order.
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Find a target by exact name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    /// Find a library by exact (case-sensitive) name and version.
    pub fn library(&self, name: &str, version: &LibraryVersion) -> Option<&Library> {
        self.by_name
            .get(name)?
            .iter()
            .map(|&index| &self.libraries[index])
            .find(|library| library.version() == version)
    }

    pub fn project_dependency_groups(&self) -> &[ProjectDependencyGroup] {
        &self.project_dependencies
    }

    /// Direct project dependencies that apply to `target`, in file order.
    pub fn project_dependencies<'a>(
        &'a self,
        target: &'a Target,
    ) -> impl Iterator<Item = &'a DependencySpec> + 'a {
        self.project_dependencies
            .iter()
            .filter(move |group| group.applies_to(target))
            .flat_map(|group| group.dependencies().iter())
    }
}
