use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rungo_lib::downloader::{self, DownloadedArchive};
use rungo_lib::go_dev::GoDevClient;
use rungo_lib::go_version::GoVersion;
use rungo_lib::release_client::ReleaseClient;

#[derive(Args)]
pub struct ListCommand {
    /// Only show versions containing this text (e.g. "1.22", "go1.21.")
    pub query: Option<String>,

    /// Print the versions as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Show at most this many versions
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl ListCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let client = GoDevClient::new(&config)?;
        let versions = client
            .list_versions()
            .await
            .context(format!("Failed to list Go versions from {}", client.base_url()))?;

        let selected = self.select(&versions);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&selected)?);
            return Ok(());
        }

        let downloaded = downloader::list_downloaded(&config.downloads_dir)?;
        ui::heading(&format!("Go releases available from {}:", client.base_url()));
        Self::print_versions(&selected, versions.first(), &downloaded);

        tracing::info!("");
        if let Some(query) = &self.query {
            ui::info(&format!(
                "Found {} matches for '{}'",
                versions
                    .iter()
                    .filter(|v| v.to_string().contains(query.as_str()))
                    .count(),
                query
            ));
        }
        ui::tip("Use `rungo download <version>` to download a release archive");

        Ok(())
    }

    fn select<'a>(&self, versions: &'a [GoVersion]) -> Vec<&'a GoVersion> {
        versions
            .iter()
            .filter(|v| {
                self.query
                    .as_deref()
                    .is_none_or(|query| v.to_string().contains(query))
            })
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn print_versions(
        versions: &[&GoVersion],
        latest: Option<&GoVersion>,
        downloaded: &[DownloadedArchive],
    ) {
        if versions.is_empty() {
            ui::warning("No releases found");
            return;
        }
        let width = versions
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(0);
        for version in versions {
            let latest_str = if latest == Some(*version) {
                " (latest)".bright_blue()
            } else {
                "".normal()
            };
            let downloaded_str = if downloader::is_downloaded(downloaded, version) {
                " (downloaded)".green()
            } else {
                "".normal()
            };
            ui::info(
                format!(
                    "{:width$}{}{}",
                    version.to_string(),
                    latest_str,
                    downloaded_str,
                    width = width,
                )
                .trim_end(),
            );
        }
    }
}
