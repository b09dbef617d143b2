use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rungo_lib::config::Config;
use std::path::PathBuf;
use std::time::Duration;

use crate::commands::{
    download::DownloadCommand, downloaded::DownloadedCommand, fetch::FetchCommand,
    list::ListCommand,
};

#[derive(Parser)]
#[command(name = "rungo")]
#[command(about = "List Go toolchain releases and download their archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(clap::Args, Clone)]
pub struct GlobalArgs {
    /// Use a different location for rungo's data, where downloads are kept
    #[arg(long, global = true)]
    pub datadir: Option<PathBuf>,

    /// Distribution host to query instead of https://go.dev
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Abort a request after this many seconds without receiving data
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn config(&self) -> Result<Config> {
        let config = Config::setup(self.datadir.as_deref())
            .context("Failed to set up the rungo data directory")?;
        let config = match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        };
        Ok(match self.timeout {
            Some(seconds) => config.with_read_timeout(Duration::from_secs(seconds)),
            None => config,
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List Go versions available for download, newest first
    #[command(alias = "ls")]
    List(ListCommand),

    /// Download the archive of a Go version
    Download(DownloadCommand),

    /// Download a release file by its exact name
    Fetch(FetchCommand),

    /// Show archives already in the downloads directory
    Downloaded(DownloadedCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::List(cmd) => cmd.run(self.global_args).await,
            Commands::Download(cmd) => cmd.run(self.global_args).await,
            Commands::Fetch(cmd) => cmd.run(self.global_args).await,
            Commands::Downloaded(cmd) => cmd.run(self.global_args).await,
        }
    }
}
