//! Library versions and version ranges as they appear in lock files.
//!
//! Lock file versions are looser than strict semver: `1.0` and `1.0.0.0`
//! are both valid and both equal `1.0.0`. Ranges use interval notation
//! (`[1.0, 2.0)`), and a bare version means "at least this version".

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error parsing a version or a version range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid version `{input}`: {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("invalid version range `{input}`: {reason}")]
    InvalidRange { input: String, reason: String },
}

impl VersionError {
    fn version(input: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    fn range(input: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidRange {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A resolved library version.
///
/// Wraps a semver [`Version`] with an optional fourth `revision` component.
/// Equality and ordering ignore build metadata.
#[derive(Debug, Clone)]
pub struct LibraryVersion {
    version: Version,
    revision: u64,
}

impl LibraryVersion {
    /// Create a release version from three components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        LibraryVersion {
            version: Version::new(major, minor, patch),
            revision: 0,
        }
    }

    /// Set the fourth (revision) component.
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pre-release label, empty for release versions.
    pub fn prerelease(&self) -> &str {
        self.version.pre.as_str()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// The underlying semver version (revision dropped).
    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    fn key(&self) -> (u64, u64, u64, u64) {
        (
            self.version.major,
            self.version.minor,
            self.version.patch,
            self.revision,
        )
    }
}

impl From<Version> for LibraryVersion {
    fn from(version: Version) -> Self {
        LibraryVersion {
            version,
            revision: 0,
        }
    }
}

impl FromStr for LibraryVersion {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.is_empty() {
            return Err(VersionError::version(input, "version is empty"));
        }

        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (s, None),
        };
        let (numbers, pre) = match rest.split_once('-') {
            Some((numbers, pre)) => (numbers, Some(pre)),
            None => (rest, None),
        };

        let parts = numbers
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    VersionError::version(input, format!("`{part}` is not a number"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if parts.len() > 4 {
            return Err(VersionError::version(
                input,
                "expected at most four numeric components",
            ));
        }

        let component = |i: usize| parts.get(i).copied().unwrap_or(0);
        let mut version = Version::new(component(0), component(1), component(2));

        if let Some(pre) = pre {
            version.pre = Prerelease::new(pre)
                .map_err(|e| VersionError::version(input, e.to_string()))?;
        }
        if let Some(build) = build {
            version.build = BuildMetadata::new(build)
                .map_err(|e| VersionError::version(input, e.to_string()))?;
        }

        Ok(LibraryVersion {
            version,
            revision: component(3),
        })
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        )?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        if !self.version.pre.is_empty() {
            write!(f, "-{}", self.version.pre)?;
        }
        if !self.version.build.is_empty() {
            write!(f, "+{}", self.version.build)?;
        }
        Ok(())
    }
}

impl PartialEq for LibraryVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.version.pre == other.version.pre
    }
}

impl Eq for LibraryVersion {}

impl Hash for LibraryVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.version.pre.as_str().hash(state);
    }
}

impl PartialOrd for LibraryVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LibraryVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // A release sorts after any of its pre-releases; semver's Prerelease
        // ordering already treats the empty label as greatest.
        self.key()
            .cmp(&other.key())
            .then_with(|| self.version.pre.cmp(&other.version.pre))
    }
}

impl Serialize for LibraryVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LibraryVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A version constraint.
///
/// Only the minimum bound takes part in library lookup; the full interval
/// is kept for display and [`VersionRange::contains`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    min: Option<LibraryVersion>,
    min_inclusive: bool,
    max: Option<LibraryVersion>,
    max_inclusive: bool,
}

impl VersionRange {
    /// `>= version`
    pub fn at_least(version: LibraryVersion) -> Self {
        VersionRange {
            min: Some(version),
            min_inclusive: true,
            max: None,
            max_inclusive: false,
        }
    }

    /// `[version]`
    pub fn exact(version: LibraryVersion) -> Self {
        VersionRange {
            min: Some(version.clone()),
            min_inclusive: true,
            max: Some(version),
            max_inclusive: true,
        }
    }

    /// A range without bounds.
    pub fn any() -> Self {
        VersionRange {
            min: None,
            min_inclusive: false,
            max: None,
            max_inclusive: false,
        }
    }

    /// The lower bound, regardless of whether it is inclusive.
    pub fn min_version(&self) -> Option<&LibraryVersion> {
        self.min.as_ref()
    }

    pub fn max_version(&self) -> Option<&LibraryVersion> {
        self.max.as_ref()
    }

    pub fn is_min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    pub fn is_max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    /// Check whether `version` satisfies both bounds.
    pub fn contains(&self, version: &LibraryVersion) -> bool {
        let above_min = match &self.min {
            Some(min) if self.min_inclusive => version >= min,
            Some(min) => version > min,
            None => true,
        };
        let below_max = match &self.max {
            Some(max) if self.max_inclusive => version <= max,
            Some(max) => version < max,
            None => true,
        };
        above_min && below_max
    }

    fn parse_interval(input: &str, s: &str) -> Result<Self, VersionError> {
        let min_inclusive = s.starts_with('[');
        let max_inclusive = match s.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(VersionError::range(input, "missing closing `]` or `)`")),
        };
        let inner = &s[1..s.len() - 1];

        let bound = |text: &str| -> Result<Option<LibraryVersion>, VersionError> {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some)
            }
        };

        let Some((low, high)) = inner.split_once(',') else {
            if !(min_inclusive && max_inclusive) {
                return Err(VersionError::range(
                    input,
                    "a single-version range must use `[version]`",
                ));
            }
            let version = bound(inner)?
                .ok_or_else(|| VersionError::range(input, "range is empty"))?;
            return Ok(VersionRange::exact(version));
        };

        if high.contains(',') {
            return Err(VersionError::range(input, "too many `,` separators"));
        }

        let min = bound(low)?;
        let max = bound(high)?;

        if let (Some(min), Some(max)) = (&min, &max) {
            match min.cmp(max) {
                Ordering::Greater => {
                    return Err(VersionError::range(
                        input,
                        "minimum is greater than maximum",
                    ))
                }
                Ordering::Equal if !(min_inclusive && max_inclusive) => {
                    return Err(VersionError::range(input, "range excludes every version"))
                }
                _ => {}
            }
        }

        Ok(VersionRange {
            min_inclusive: min_inclusive && min.is_some(),
            max_inclusive: max_inclusive && max.is_some(),
            min,
            max,
        })
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.is_empty() {
            return Err(VersionError::range(input, "range is empty"));
        }

        if s.starts_with('[') || s.starts_with('(') {
            return Self::parse_interval(input, s);
        }

        // `>= 1.0` appears in project dependency groups
        let version = s.strip_prefix(">=").unwrap_or(s);
        version
            .parse()
            .map(VersionRange::at_least)
            .map_err(|e| match e {
                VersionError::InvalidVersion { reason, .. } => VersionError::range(input, reason),
                other => other,
            })
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) if min == max && self.min_inclusive && self.max_inclusive => {
                write!(f, "[{min}]")
            }
            _ => {
                f.write_str(if self.min_inclusive { "[" } else { "(" })?;
                if let Some(min) = &self.min {
                    write!(f, "{min}")?;
                }
                f.write_str(", ")?;
                if let Some(max) = &self.max {
                    write!(f, "{max}")?;
                }
                f.write_str(if self.max_inclusive { "]" } else { ")" })
            }
        }
    }
}

impl Serialize for VersionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> LibraryVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_short_versions_are_padded() {
        assert_eq!(v("1.0"), LibraryVersion::new(1, 0, 0));
        assert_eq!(v("1"), LibraryVersion::new(1, 0, 0));
        assert_eq!(v("1.0.0.0"), v("1.0.0"));
        assert_eq!(v("1.0.0.0").to_string(), "1.0.0");
    }

    #[test]
    fn test_revision_component() {
        let version = v("4.5.0.1");
        assert_eq!(version.revision(), 1);
        assert_eq!(version.to_string(), "4.5.0.1");
        assert!(version > v("4.5.0"));
    }

    #[test]
    fn test_prerelease_ordering() {
        assert!(v("2.0.0-beta1") < v("2.0.0"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
        assert!(v("2.0.0-beta").is_prerelease());
    }

    #[test]
    fn test_build_metadata_ignored_for_equality() {
        assert_eq!(v("1.2.3+abc"), v("1.2.3"));
        assert_eq!(v("1.2.3+abc").to_string(), "1.2.3+abc");
    }

    #[test]
    fn test_invalid_versions() {
        assert!("".parse::<LibraryVersion>().is_err());
        assert!("1.x".parse::<LibraryVersion>().is_err());
        assert!("1.2.3.4.5".parse::<LibraryVersion>().is_err());
    }

    #[test]
    fn test_bare_version_is_minimum() {
        let range: VersionRange = "1.9.0".parse().unwrap();
        assert_eq!(range.min_version(), Some(&v("1.9.0")));
        assert!(range.is_min_inclusive());
        assert!(range.contains(&v("1.9.1")));
        assert!(!range.contains(&v("1.8.9")));
        assert_eq!(range.to_string(), "[1.9.0, )");
    }

    #[test]
    fn test_interval_ranges() {
        let range: VersionRange = "[1.0, 2.0)".parse().unwrap();
        assert!(range.contains(&v("1.0")));
        assert!(range.contains(&v("1.99")));
        assert!(!range.contains(&v("2.0")));

        let range: VersionRange = "(1.0,)".parse().unwrap();
        assert_eq!(range.min_version(), Some(&v("1.0")));
        assert!(!range.contains(&v("1.0")));
        assert!(range.contains(&v("1.0.1")));

        let range: VersionRange = "(,2.0]".parse().unwrap();
        assert_eq!(range.min_version(), None);
        assert!(range.contains(&v("2.0")));
    }

    #[test]
    fn test_exact_range() {
        let range: VersionRange = "[3.1.4]".parse().unwrap();
        assert_eq!(range, VersionRange::exact(v("3.1.4")));
        assert_eq!(range.to_string(), "[3.1.4]");
        assert!(!range.contains(&v("3.1.5")));
    }

    #[test]
    fn test_greater_equal_prefix() {
        let range: VersionRange = ">= 1.9.0".parse().unwrap();
        assert_eq!(range, VersionRange::at_least(v("1.9.0")));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!("[2.0, 1.0]".parse::<VersionRange>().is_err());
        assert!("(1.0)".parse::<VersionRange>().is_err());
        assert!("[1.0, 2.0".parse::<VersionRange>().is_err());
        assert!("[1.0,2.0,3.0]".parse::<VersionRange>().is_err());
        assert!("(1.0, 1.0]".parse::<VersionRange>().is_err());
    }

    #[test]
    fn test_unbounded_range() {
        let range: VersionRange = "(, )".parse().unwrap();
        assert_eq!(range, VersionRange::any());
        assert!(range.contains(&v("0.0.1")));
    }
}
