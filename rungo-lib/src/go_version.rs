use crate::error::{ReleaseError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Oldest minor release line that is still offered for download.
pub const MINIMUM_MINOR: u64 = 16;

/// First go1 minor release whose initial build is labelled with `.0`.
const FIRST_MINOR_WITH_ZERO_PATCH: u64 = 21;

static LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^go(0|[1-9]\d*)\.(0|[1-9]\d*)(?:\.(0|[1-9]\d*))?$").unwrap()
});

/// A Go toolchain release such as `go1.20` or `go1.22.3`.
///
/// The patch number is optional because releases before go1.21 published their
/// first build without one. Ordering follows semantic version precedence, with
/// a missing patch compared as zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
}

impl GoVersion {
    /// Parses a release label exactly as it appears on the download page.
    pub fn parse(label: &str) -> Result<Self> {
        let caps = LABEL_REGEX
            .captures(label)
            .ok_or_else(|| ReleaseError::InvalidVersion(label.to_string()))?;
        let number = |index: usize| -> Result<Option<u64>> {
            caps.get(index)
                .map(|m| m.as_str().parse::<u64>())
                .transpose()
                .map_err(|_| ReleaseError::InvalidVersion(label.to_string()))
        };

        let major = number(1)?.ok_or_else(|| ReleaseError::InvalidVersion(label.to_string()))?;
        let minor = number(2)?.ok_or_else(|| ReleaseError::InvalidVersion(label.to_string()))?;
        let patch = number(3)?;

        Ok(GoVersion {
            major,
            minor,
            patch,
        })
    }

    /// Like [Self::parse], but also accepts input without the `go` prefix
    /// (`1.22.3`) as typed on the command line.
    pub fn parse_loose(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.starts_with("go") {
            Self::parse(input)
        } else {
            Self::parse(&format!("go{input}"))
                .map_err(|_| ReleaseError::InvalidVersion(input.to_string()))
        }
    }

    /// Whether this release belongs to a supported release line.
    pub fn is_supported(&self) -> bool {
        self.minor >= MINIMUM_MINOR
    }

    /// The comparable semantic version form, e.g. `go1.20` becomes `1.20.0`.
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch.unwrap_or(0))
    }

    /// Converts the comparable form back into the label go.dev publishes.
    ///
    /// Up to go1.20 the first release of a minor line had no patch number
    /// (`go1.20`); from go1.21 on it is spelled `go1.21.0`. Every published
    /// label therefore survives `to_semver` followed by `from_semver`.
    pub fn from_semver(version: &semver::Version) -> Self {
        let unnumbered_first_release = version.major == 1
            && version.minor < FIRST_MINOR_WITH_ZERO_PATCH
            && version.patch == 0;
        GoVersion {
            major: version.major,
            minor: version.minor,
            patch: (!unnumbered_first_release).then_some(version.patch),
        }
    }
}

impl PartialOrd for GoVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GoVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_semver()
            .cmp(&other.to_semver())
            // go1.21 and go1.21.0 share precedence; keep the order total.
            .then(self.patch.is_some().cmp(&other.patch.is_some()))
    }
}

impl FromStr for GoVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GoVersion {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<GoVersion> for String {
    fn from(value: GoVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "go{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v1 = GoVersion::parse("go1.22.3").unwrap();
        assert_eq!(v1.major, 1);
        assert_eq!(v1.minor, 22);
        assert_eq!(v1.patch, Some(3));

        let v2 = GoVersion::parse("go1.20").unwrap();
        assert_eq!(v2.minor, 20);
        assert_eq!(v2.patch, None);

        assert!(GoVersion::parse("go1.22rc1").is_err());
        assert!(GoVersion::parse("go1.21.0 ").is_err());
        assert!(GoVersion::parse("1.21.0").is_err());
        assert!(GoVersion::parse("go1.021").is_err());
        assert!(GoVersion::parse("go1").is_err());
        assert!(GoVersion::parse("go1.2.3.4").is_err());
        assert!(GoVersion::parse("go99999999999999999999.1").is_err());
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(
            GoVersion::parse_loose("1.22.3").unwrap(),
            GoVersion::parse("go1.22.3").unwrap()
        );
        assert_eq!(
            GoVersion::parse_loose(" go1.20 ").unwrap(),
            GoVersion::parse("go1.20").unwrap()
        );
        assert!(matches!(
            GoVersion::parse_loose("latest"),
            Err(ReleaseError::InvalidVersion(input)) if input == "latest"
        ));
    }

    #[test]
    fn test_supported_floor() {
        assert!(GoVersion::parse("go1.16").unwrap().is_supported());
        assert!(GoVersion::parse("go1.19.13").unwrap().is_supported());
        assert!(GoVersion::parse("go1.22.0").unwrap().is_supported());
        assert!(!GoVersion::parse("go1.15.15").unwrap().is_supported());
        assert!(!GoVersion::parse("go1.9").unwrap().is_supported());
    }

    #[test]
    fn test_label_round_trip() {
        for label in [
            "go1.16", "go1.16.15", "go1.20", "go1.20.14", "go1.21.0", "go1.22.10", "go2.0.0",
        ] {
            let version = GoVersion::parse(label).unwrap();
            let comparable = version.to_semver();
            assert_eq!(GoVersion::from_semver(&comparable).to_string(), label);
        }
    }

    #[test]
    fn test_from_semver() {
        let go120 = GoVersion::from_semver(&semver::Version::parse("1.20.0").unwrap());
        assert_eq!(go120.to_string(), "go1.20");
        assert_eq!(go120.to_semver().to_string(), "1.20.0");

        let go121 = GoVersion::from_semver(&semver::Version::parse("1.21.0").unwrap());
        assert_eq!(go121.to_string(), "go1.21.0");

        let go120_3 = GoVersion::from_semver(&semver::Version::parse("1.20.3").unwrap());
        assert_eq!(go120_3.to_string(), "go1.20.3");
    }

    #[test]
    fn test_version_sorting() {
        let v1 = GoVersion::parse("go1.16").unwrap();
        let v2 = GoVersion::parse("go1.16.15").unwrap();
        let v3 = GoVersion::parse("go1.20").unwrap();
        let v4 = GoVersion::parse("go1.20.2").unwrap();
        let v5 = GoVersion::parse("go1.20.10").unwrap();
        let v6 = GoVersion::parse("go1.21.0").unwrap();
        let v7 = GoVersion::parse("go1.100.0").unwrap();

        let mut versions = vec![
            v5.clone(),
            v1.clone(),
            v7.clone(),
            v3.clone(),
            v6.clone(),
            v2.clone(),
            v4.clone(),
        ];
        versions.sort();

        assert_eq!(versions, vec![v1, v2, v3, v4, v5, v6, v7]);
    }

    #[test]
    fn test_missing_patch_sorts_as_zero() {
        let bare = GoVersion::parse("go1.21").unwrap();
        let zero = GoVersion::parse("go1.21.0").unwrap();
        let one = GoVersion::parse("go1.21.1").unwrap();

        assert_eq!(bare.to_semver(), zero.to_semver());
        assert!(bare < zero);
        assert!(zero < one);
        assert_ne!(bare, zero);
    }

    #[test]
    fn test_serializes_as_label() {
        let version = GoVersion::parse("go1.22.3").unwrap();
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"go1.22.3\"");

        let back: GoVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
        assert!(serde_json::from_str::<GoVersion>("\"not-a-version\"").is_err());
    }
}
