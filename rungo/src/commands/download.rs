use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use rungo_lib::config::Config;
use rungo_lib::downloader;
use rungo_lib::go_dev::GoDevClient;
use rungo_lib::release_file::{ArchiveKind, go_arch, go_os};
use std::path::PathBuf;

#[derive(Args)]
pub struct DownloadCommand {
    /// The Go version to download (e.g. go1.22.3, 1.22.3, or "latest")
    pub version: String,

    /// Download the source archive instead of a prebuilt toolchain
    #[arg(long, conflicts_with_all = ["os", "arch"])]
    pub source: bool,

    /// Target operating system, using Go's names (linux, darwin, windows, ...)
    #[arg(long)]
    pub os: Option<String>,

    /// Target architecture, using Go's names (amd64, arm64, 386, ...)
    #[arg(long)]
    pub arch: Option<String>,

    /// Directory to write the archive to (defaults to the downloads directory)
    #[arg(long, short)]
    pub dest: Option<PathBuf>,
}

impl DownloadCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let client = GoDevClient::new(&config)?;
        let kind = self.archive_kind(&config);
        let dest = self.dest.clone().unwrap_or(config.downloads_dir.clone());

        let (version, path) = downloader::download_release(&client, &self.version, &kind, &dest)
            .await
            .context(format!("Failed to download Go version {}", self.version))?;

        ui::success(&format!("Downloaded {} to {}", version, path.display()));
        Ok(())
    }

    fn archive_kind(&self, config: &Config) -> ArchiveKind {
        if self.source {
            return ArchiveKind::Source;
        }
        ArchiveKind::Binary {
            os: self
                .os
                .clone()
                .unwrap_or_else(|| go_os(&config.os).to_string()),
            arch: self
                .arch
                .clone()
                .unwrap_or_else(|| go_arch(&config.arch).to_string()),
        }
    }
}
