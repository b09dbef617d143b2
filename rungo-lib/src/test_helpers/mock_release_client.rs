use crate::error::{ReleaseError, Result};
use crate::go_version::GoVersion;
use crate::release_client::ReleaseClient;
use crate::release_file::ReleaseFile;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory stand-in for the distribution site.
pub struct MockReleaseClient {
    versions: Vec<GoVersion>,
    body: Vec<u8>,
    fetched: Mutex<Vec<ReleaseFile>>,
}

impl MockReleaseClient {
    /// Serves `labels` (already newest first) and answers every fetch with `body`.
    pub fn new(labels: &[&str], body: &[u8]) -> Self {
        Self {
            versions: labels
                .iter()
                .map(|label| GoVersion::parse(label).unwrap())
                .collect(),
            body: body.to_vec(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<ReleaseFile> {
        self.fetched.lock().unwrap().clone()
    }
}

impl ReleaseClient for MockReleaseClient {
    async fn list_versions(&self) -> Result<Vec<GoVersion>> {
        Ok(self.versions.clone())
    }

    async fn fetch_artifact(&self, file: &ReleaseFile, dst: &Path) -> Result<PathBuf> {
        file.validate()?;
        self.fetched.lock().unwrap().push(file.clone());

        let path = dst.join(file.as_str());
        std::fs::write(&path, &self.body).map_err(ReleaseError::Io)?;
        Ok(path)
    }
}
