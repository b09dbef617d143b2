pub mod config;
pub mod downloader;
pub mod error;
pub mod go_dev;
pub mod go_version;
pub mod logging;
pub mod release_client;
pub mod release_file;

#[cfg(test)]
pub mod test_helpers;
