use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Host serving the release index (`/dl`) and the archives (`/dl/<file>`).
pub const DEFAULT_BASE_URL: &str = "https://go.dev";

/// Upper bound for establishing a connection to the distribution host.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest a response may stall without delivering data. Slow but progressing
/// downloads are never cut off.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for rungo data
    pub data_dir: PathBuf,

    /// Default destination for downloaded archives
    pub downloads_dir: PathBuf,

    /// Distribution host, without the `/dl` path
    pub base_url: String,

    /// Timeout for connecting to the host
    pub connect_timeout: Duration,

    /// Timeout for each read while receiving a response
    pub read_timeout: Duration,

    /// Platform-specific operating system string.
    pub os: String,

    /// Platform-specific architecture string.
    pub arch: String,
}

impl Config {
    pub fn new_for_path(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            downloads_dir: data_dir.join("downloads"),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Sets up a new Config for the given data directory, creating the
    /// downloads directory. See also [Self::default_data_dir].
    pub fn setup(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = data_dir
            .map(|d| d.to_path_buf())
            .unwrap_or_else(Self::default_data_dir);
        let config = Self::new_for_path(&data_dir);

        std::fs::create_dir_all(&config.downloads_dir)?;

        Ok(config)
    }

    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..self
        }
    }

    pub fn with_read_timeout(self, read_timeout: Duration) -> Self {
        Self {
            read_timeout,
            ..self
        }
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
            .join("rungo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_for_path() {
        let config = Config::new_for_path(Path::new("/tmp/rungo-data"));
        assert_eq!(config.downloads_dir, PathBuf::from("/tmp/rungo-data/downloads"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.read_timeout, DEFAULT_READ_TIMEOUT);
        assert_eq!(config.os, std::env::consts::OS);
    }

    #[test]
    fn test_setup_creates_downloads_dir() -> Result<()> {
        let tmp_dir = TempDir::new()?;
        let config = Config::setup(Some(tmp_dir.path()))?;
        assert!(config.downloads_dir.is_dir());
        assert!(config.downloads_dir.starts_with(tmp_dir.path()));
        Ok(())
    }

    #[test]
    fn test_with_base_url() {
        let config = Config::new_for_path(Path::new("/tmp/rungo-data"))
            .with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/rungo-data"));
    }

    #[test]
    fn test_with_read_timeout() {
        let config = Config::new_for_path(Path::new("/tmp/rungo-data"))
            .with_read_timeout(Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
