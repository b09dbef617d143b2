use crate::error::{ReleaseError, Result};
use crate::go_version::GoVersion;
use crate::release_client::ReleaseClient;
use crate::release_file::{ArchiveKind, ReleaseFile};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An archive already present in a downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArchive {
    pub file: ReleaseFile,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Picks a version out of `available` (newest first). Accepts `latest`, a full
/// label (`go1.22.3`) or a bare number (`1.22.3`).
pub fn resolve_version(available: &[GoVersion], input: &str) -> Result<GoVersion> {
    if input.trim().eq_ignore_ascii_case("latest") {
        return available
            .first()
            .cloned()
            .ok_or_else(|| ReleaseError::VersionNotFound(input.trim().to_string()));
    }

    let version = GoVersion::parse_loose(input)?;
    if available.contains(&version) {
        Ok(version)
    } else {
        Err(ReleaseError::VersionNotFound(version.to_string()))
    }
}

/// Lists the published versions, resolves `input` against them and downloads
/// the matching archive into `dst`.
pub async fn download_release<C: ReleaseClient>(
    client: &C,
    input: &str,
    kind: &ArchiveKind,
    dst: &Path,
) -> Result<(GoVersion, PathBuf)> {
    let available = client.list_versions().await?;
    let version = resolve_version(&available, input)?;
    let file = ReleaseFile::for_version(&version, kind);

    tracing::debug!("Resolved '{}' to {}, fetching {}", input, version, file);
    let path = client.fetch_artifact(&file, dst).await?;
    Ok((version, path))
}

/// Go release archives in `dir`, sorted by file name. A missing directory has
/// no archives.
pub fn list_downloaded(dir: &Path) -> Result<Vec<DownloadedArchive>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !is_release_archive(&name) {
            continue;
        }

        archives.push(DownloadedArchive {
            file: ReleaseFile::new(name),
            path: entry.path(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }

    archives.sort_by(|a, b| a.file.as_str().cmp(b.file.as_str()));
    Ok(archives)
}

fn is_release_archive(name: &str) -> bool {
    name.starts_with("go") && (name.ends_with(".tar.gz") || name.ends_with(".zip"))
}

/// Whether any of `archives` was downloaded for `version`.
pub fn is_downloaded(archives: &[DownloadedArchive], version: &GoVersion) -> bool {
    let prefix = format!("{version}.");
    archives.iter().any(|archive| {
        archive
            .file
            .as_str()
            .strip_prefix(&prefix)
            // go1.22.3.linux-amd64.tar.gz must not count as go1.22
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
    })
}
