use crate::error::{ReleaseError, Result};
use crate::go_version::GoVersion;
use std::fmt;
use std::path::{Component, Path};

/// Name of a downloadable archive, e.g. `go1.22.0.linux-amd64.tar.gz`.
///
/// The fetcher treats it as an opaque key: it is appended to the download URL
/// and used verbatim as the destination file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseFile(String);

impl ReleaseFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The archive name go.dev publishes for `version` in the given flavour.
    pub fn for_version(version: &GoVersion, kind: &ArchiveKind) -> Self {
        match kind {
            ArchiveKind::Source => Self(format!("{version}.src.tar.gz")),
            ArchiveKind::Binary { os, arch } => {
                let extension = if os == "windows" { "zip" } else { "tar.gz" };
                Self(format!("{version}.{os}-{arch}.{extension}"))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rejects names that would escape the destination directory once joined
    /// onto it.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.0).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !self.0.contains(['/', '\\']) => Ok(()),
            _ => Err(ReleaseError::InvalidReleaseFile(self.0.clone())),
        }
    }
}

impl fmt::Display for ReleaseFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which archive of a release to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveKind {
    /// The source tree, `goX.Y.Z.src.tar.gz`.
    Source,
    /// A prebuilt toolchain; `os` and `arch` use Go's GOOS/GOARCH names.
    Binary { os: String, arch: String },
}

impl ArchiveKind {
    /// The binary archive for a platform described by Rust's
    /// `std::env::consts::{OS, ARCH}` values.
    pub fn for_platform(os: &str, arch: &str) -> Self {
        ArchiveKind::Binary {
            os: go_os(os).to_string(),
            arch: go_arch(arch).to_string(),
        }
    }
}

/// Maps a Rust target OS name to the GOOS used in archive names.
pub fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Maps a Rust target architecture name to the GOARCH used in archive names.
pub fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "arm" => "armv6l",
        "loongarch64" => "loong64",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        other => other,
    }
}
