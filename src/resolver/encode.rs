//! Lock file encoding and decoding.
//!
//! `project.assets.json` is the lock file written by restore. Every JSON
//! object in it is order-significant (dependencies are walked in declared
//! order), so objects decode into [`OrderedMap`] instead of a hash map.

use std::fmt;
use std::marker::PhantomData;

use anyhow::{anyhow, Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{
    DependencySpec, Library, LibraryVersion, LockFile, ProjectDependencyGroup, Target,
    TargetLibrary, VersionRange, LOCK_FILE_FORMAT_VERSION,
};

/// A JSON object decoded as a list of entries in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Lock file representation for serialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetsFile {
    /// Lock file format version
    pub version: u32,

    /// Target name -> `Name/version` -> per-target record
    #[serde(default)]
    pub targets: OrderedMap<OrderedMap<AssetsTargetLibrary>>,

    /// `Name/version` -> resolved library
    #[serde(default)]
    pub libraries: OrderedMap<AssetsLibrary>,

    /// Framework -> direct project dependencies (`"Name >= 1.0.0"`)
    #[serde(
        rename = "projectFileDependencyGroups",
        default,
        skip_serializing_if = "OrderedMap::is_empty"
    )]
    pub project_file_dependency_groups: OrderedMap<Vec<String>>,
}

/// A library entry of a target section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AssetsTargetLibrary {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Dependency name -> version range
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub dependencies: OrderedMap<String>,
}

/// An entry of the global `libraries` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AssetsLibrary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha512: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl AssetsFile {
    /// Parse an assets file from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse lock file")
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize lock file")
    }

    /// Create an assets file from a lock file.
    pub fn from_lock_file(lock_file: &LockFile) -> Self {
        let targets = lock_file
            .targets()
            .iter()
            .map(|target| {
                let libraries = target
                    .libraries()
                    .iter()
                    .map(|library| {
                        let dependencies = library
                            .dependencies()
                            .iter()
                            .map(|dep| (dep.name().to_string(), dep.range().to_string()))
                            .collect();
                        let entry = AssetsTargetLibrary {
                            kind: Some(library.kind().to_string()),
                            dependencies: OrderedMap(dependencies),
                        };
                        (library.key(), entry)
                    })
                    .collect();
                (target.name().to_string(), OrderedMap(libraries))
            })
            .collect();

        let libraries = lock_file
            .libraries()
            .iter()
            .map(|library| {
                let entry = AssetsLibrary {
                    sha512: library.sha512().map(str::to_string),
                    kind: Some(library.kind().to_string()),
                    path: library.path().map(str::to_string),
                    files: library.files().to_vec(),
                };
                (library.key(), entry)
            })
            .collect();

        let groups = lock_file
            .project_dependency_groups()
            .iter()
            .map(|group| {
                let deps = group
                    .dependencies()
                    .iter()
                    .map(encode_project_dependency)
                    .collect();
                (group.framework().to_string(), deps)
            })
            .collect();

        AssetsFile {
            version: lock_file.version(),
            targets: OrderedMap(targets),
            libraries: OrderedMap(libraries),
            project_file_dependency_groups: OrderedMap(groups),
        }
    }

    /// Convert to a validated lock file.
    pub fn into_lock_file(self) -> Result<LockFile> {
        let libraries = self
            .libraries
            .0
            .into_iter()
            .map(|(key, entry)| -> Result<Library> {
                let (name, version) =
                    split_key(&key).with_context(|| format!("in library `{key}`"))?;
                let mut library = Library::new(name, version).with_files(entry.files);
                if let Some(kind) = entry.kind {
                    library = library.with_kind(kind);
                }
                if let Some(sha512) = entry.sha512 {
                    library = library.with_sha512(sha512);
                }
                if let Some(path) = entry.path {
                    library = library.with_path(path);
                }
                Ok(library)
            })
            .collect::<Result<Vec<_>>>()?;

        let targets = self
            .targets
            .0
            .into_iter()
            .map(|(target_name, entries)| -> Result<Target> {
                let libraries = entries
                    .0
                    .into_iter()
                    .map(|(key, entry)| decode_target_library(&key, entry))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("in target `{target_name}`"))?;
                Ok(Target::new(target_name, libraries)?)
            })
            .collect::<Result<Vec<_>>>()?;

        let groups = self
            .project_file_dependency_groups
            .0
            .into_iter()
            .map(|(framework, entries)| -> Result<ProjectDependencyGroup> {
                let deps = entries
                    .iter()
                    .map(|entry| parse_project_dependency(entry))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| {
                        format!("in project dependency group `{framework}`")
                    })?;
                Ok(ProjectDependencyGroup::new(framework, deps))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LockFile::new(libraries, targets)?
            .with_format_version(self.version)
            .with_project_dependencies(groups))
    }

    /// Check if the format version is supported.
    pub fn is_compatible(&self) -> bool {
        self.version == LOCK_FILE_FORMAT_VERSION
    }
}

fn decode_target_library(key: &str, entry: AssetsTargetLibrary) -> Result<TargetLibrary> {
    let (name, version) = split_key(key).with_context(|| format!("in library `{key}`"))?;

    let dependencies = entry
        .dependencies
        .0
        .into_iter()
        .map(|(dep, range)| -> Result<DependencySpec> {
            let range: VersionRange = range
                .parse()
                .with_context(|| format!("in dependency `{dep}` of `{key}`"))?;
            Ok(DependencySpec::new(dep, range))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut library = TargetLibrary::new(name, version).with_dependencies(dependencies);
    if let Some(kind) = entry.kind {
        library = library.with_kind(kind);
    }
    Ok(library)
}

/// Split a `Name/version` key.
pub fn split_key(key: &str) -> Result<(&str, LibraryVersion)> {
    let (name, version) = key
        .split_once('/')
        .ok_or_else(|| anyhow!("expected `name/version`, found `{key}`"))?;
    if name.is_empty() {
        return Err(anyhow!("library name is empty in `{key}`"));
    }
    Ok((name, version.parse()?))
}

/// Parse a project dependency such as `NEST >= 1.9.0` or `Foo [1.0, 2.0)`.
pub fn parse_project_dependency(entry: &str) -> Result<DependencySpec> {
    let entry = entry.trim();
    let (name, range) = match entry.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (entry, ""),
    };

    if name.is_empty() {
        return Err(anyhow!("project dependency is empty"));
    }

    let range = if range.is_empty() {
        VersionRange::any()
    } else {
        range
            .parse()
            .with_context(|| format!("in project dependency `{entry}`"))?
    };

    Ok(DependencySpec::new(name, range))
}

fn encode_project_dependency(dep: &DependencySpec) -> String {
    let range = dep.range();
    match (range.min_version(), range.max_version()) {
        (None, None) => dep.name().to_string(),
        (Some(min), None) if range.is_min_inclusive() => format!("{} >= {}", dep.name(), min),
        _ => format!("{} {}", dep.name(), range),
    }
}
