use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use rungo_lib::go_dev::GoDevClient;
use rungo_lib::release_client::ReleaseClient;
use rungo_lib::release_file::ReleaseFile;
use std::path::PathBuf;

#[derive(Args)]
pub struct FetchCommand {
    /// Exact release file name (e.g. go1.22.3.linux-amd64.tar.gz)
    pub file: String,

    /// Directory to write the file to (defaults to the downloads directory)
    #[arg(long, short)]
    pub dest: Option<PathBuf>,
}

impl FetchCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let client = GoDevClient::new(&config)?;
        let file = ReleaseFile::new(self.file);
        let dest = self.dest.unwrap_or(config.downloads_dir);

        let path = client
            .fetch_artifact(&file, &dest)
            .await
            .context(format!("Failed to fetch {file}"))?;

        ui::success(&format!("Saved {}", path.display()));
        Ok(())
    }
}
