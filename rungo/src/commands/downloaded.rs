use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Args;
use colored::Colorize;
use rungo_lib::downloader::{self, DownloadedArchive};

#[derive(Args)]
pub struct DownloadedCommand {
    /// Show the full path of each archive
    #[arg(long, short)]
    pub path: bool,
}

impl DownloadedCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let archives = downloader::list_downloaded(&config.downloads_dir)?;

        if archives.is_empty() {
            ui::warning("No Go archives downloaded yet");
            ui::tip("Use `rungo download <version>` to download one");
            return Ok(());
        }

        ui::heading(&format!(
            "Archives in {}:",
            config.downloads_dir.display()
        ));
        for archive in &archives {
            let name = if self.path {
                archive.path.display().to_string()
            } else {
                archive.file.to_string()
            };
            ui::info(&format!(
                "  {} {} {}",
                name,
                format_size(archive.size).cyan(),
                age(archive).dimmed()
            ));
        }

        Ok(())
    }
}

fn format_size(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    if bytes as f64 >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB)
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}

fn age(archive: &DownloadedArchive) -> String {
    let Some(modified) = archive.modified else {
        return String::new();
    };
    let modified: DateTime<Local> = modified.into();
    match Local::now().signed_duration_since(modified).num_days() {
        days if days <= 0 => "(today)".to_string(),
        1 => "(1 day ago)".to_string(),
        days => format!("({days} days ago)"),
    }
}
