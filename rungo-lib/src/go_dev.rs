use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::go_version::GoVersion;
use crate::logging::{progress_bar_style, spinner_style};
use crate::release_client::ReleaseClient;
use crate::release_file::ReleaseFile;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Marks one release section on the download page; its `span` child holds the
/// version label.
const RELEASE_ENTRY_SELECTOR: &str = ".toggleButton";
const RELEASE_LABEL_SELECTOR: &str = "span";

/// Client for the official Go distribution site.
pub struct GoDevClient {
    base_url: String,
    client: Client,
}

impl ReleaseClient for GoDevClient {
    #[instrument(skip_all)]
    async fn list_versions(&self) -> Result<Vec<GoVersion>> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}"));
        current_span.pb_set_message("Fetching Go releases...");
        current_span.pb_set_finish_message("Fetching Go releases... Done");

        let url = format!("{}/dl", self.base_url);
        let response = self.get(&url).await?;
        let body = response
            .text()
            .await
            .map_err(|source| ReleaseError::RequestFailed {
                url: url.clone(),
                source,
            })?;

        let versions = parse_index_page(&body)?;
        tracing::debug!("Found {} supported releases at {}", versions.len(), url);
        Ok(versions)
    }

    #[instrument(skip_all, fields(file = %file))]
    async fn fetch_artifact(&self, file: &ReleaseFile, dst: &Path) -> Result<PathBuf> {
        file.validate()?;

        let url = format!("{}/dl/{}", self.base_url, file);
        let response = self.get(&url).await?;

        let current_span = tracing::Span::current();
        current_span.pb_set_style(&progress_bar_style());
        if let Some(length) = response.content_length() {
            current_span.pb_set_length(length);
        }
        current_span.pb_set_message(&format!("Downloading {file}..."));
        current_span.pb_set_finish_message(&format!("Downloading {file}... Complete!"));

        // The status is already known to be 200 here, so a failed request
        // never leaves a file behind.
        let path = dst.join(file.as_str());
        let mut out = tokio::fs::File::create(&path).await?;

        match copy_body(response, &mut out, &url).await {
            Ok(written) => {
                tracing::debug!("Wrote {} bytes to {}", written, path.display());
                Ok(path)
            }
            Err(e) => {
                drop(out);
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        "Failed to remove partial download {}: {}",
                        path.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }
}

impl GoDevClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rungo/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(ReleaseError::Client)?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET and accepts only `200 OK`.
    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ReleaseError::RequestFailed {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(ReleaseError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}

async fn copy_body(response: Response, out: &mut tokio::fs::File, url: &str) -> Result<u64> {
    let mut written = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| ReleaseError::RequestFailed {
            url: url.to_string(),
            source,
        })?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;

        tracing::Span::current().pb_set_position(written);
    }

    out.flush().await?;
    Ok(written)
}

/// Extracts the supported releases from the download page, newest first and
/// without duplicates.
///
/// Entries whose label is not a plain `go<major>.<minor>[.<patch>]` release
/// (betas, release candidates, malformed labels) or that predate
/// [crate::go_version::MINIMUM_MINOR] are skipped. A page with no release
/// entries at all is treated as a parse failure, since it means the markup no
/// longer matches what we look for.
pub fn parse_index_page(html: &str) -> Result<Vec<GoVersion>> {
    let entry_selector = Selector::parse(RELEASE_ENTRY_SELECTOR)
        .map_err(|e| ReleaseError::ParseFailure(e.to_string()))?;
    let label_selector = Selector::parse(RELEASE_LABEL_SELECTOR)
        .map_err(|e| ReleaseError::ParseFailure(e.to_string()))?;

    let document = Html::parse_document(html);
    let mut entries = 0usize;
    let mut versions = Vec::new();

    for entry in document.select(&entry_selector) {
        entries += 1;
        let label: String = entry
            .select(&label_selector)
            .flat_map(|span| span.text())
            .collect();
        let label = label.trim();

        match GoVersion::parse(label) {
            Ok(version) if version.is_supported() => versions.push(version),
            _ => tracing::trace!("Skipping release entry '{}'", label),
        }
    }

    if entries == 0 {
        return Err(ReleaseError::ParseFailure(format!(
            "no '{RELEASE_ENTRY_SELECTOR}' elements found"
        )));
    }

    versions.sort_by(|a, b| b.cmp(a));
    versions.dedup();
    Ok(versions)
}
