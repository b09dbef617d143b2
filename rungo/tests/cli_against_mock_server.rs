//! Runs the real `rungo` binary against a local mock of the distribution
//! site, with a throwaway data directory.

use httpmock::prelude::*;
use std::process::{Command, Output};
use tempfile::TempDir;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <div class="toggleButton"><span>go1.21.0</span></div>
  <div class="toggleButton"><span>go1.21.0</span></div>
  <div class="toggleButton"><span>go1.22rc1</span></div>
  <div class="toggleButton"><span>go1.20</span></div>
  <div class="toggleButton"><span>go1.15</span></div>
</body></html>"#;

fn rungo(server: &MockServer, data_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rungo"))
        .args(args)
        .arg("--base-url")
        .arg(server.base_url())
        .arg("--datadir")
        .arg(data_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run rungo")
}

fn serve_index(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/dl");
        then.status(200).body(INDEX_PAGE);
    });
}

#[test]
fn list_prints_supported_versions_newest_first() {
    let server = MockServer::start();
    serve_index(&server);
    let data_dir = TempDir::new().unwrap();

    let output = rungo(&server, &data_dir, &["list", "--json"]);
    assert!(output.status.success(), "{output:?}");

    let versions: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(versions, vec!["go1.21.0", "go1.20"]);
}

#[test]
fn download_writes_archive_into_data_dir() {
    let server = MockServer::start();
    serve_index(&server);
    let archive = server.mock(|when, then| {
        when.method(GET).path("/dl/go1.20.src.tar.gz");
        then.status(200).body("ARCHIVE-BYTES");
    });
    let data_dir = TempDir::new().unwrap();

    let output = rungo(&server, &data_dir, &["download", "1.20", "--source"]);
    assert!(output.status.success(), "{output:?}");

    archive.assert();
    let written = data_dir.path().join("downloads").join("go1.20.src.tar.gz");
    assert_eq!(std::fs::read(written).unwrap(), b"ARCHIVE-BYTES");

    let listing = rungo(&server, &data_dir, &["downloaded"]);
    assert!(String::from_utf8_lossy(&listing.stdout).contains("go1.20.src.tar.gz"));
}

#[test]
fn fetch_reports_unexpected_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/dl/go1.99.0.linux-amd64.tar.gz");
        then.status(404);
    });
    let data_dir = TempDir::new().unwrap();

    let output = rungo(&server, &data_dir, &["fetch", "go1.99.0.linux-amd64.tar.gz"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unexpected status"), "{stderr}");
    assert!(
        !data_dir
            .path()
            .join("downloads")
            .join("go1.99.0.linux-amd64.tar.gz")
            .exists()
    );
}
