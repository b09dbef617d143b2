use crate::error::Result;
use crate::go_version::GoVersion;
use crate::release_file::ReleaseFile;
use std::path::{Path, PathBuf};

/// The boundary callers use to discover and download Go releases.
pub trait ReleaseClient {
    /// Installable versions, newest first, without duplicates.
    fn list_versions(&self) -> impl Future<Output = Result<Vec<GoVersion>>> + Send;

    /// Downloads `file` into `dst` and returns the path of the written archive.
    fn fetch_artifact(
        &self,
        file: &ReleaseFile,
        dst: &Path,
    ) -> impl Future<Output = Result<PathBuf>> + Send;
}
