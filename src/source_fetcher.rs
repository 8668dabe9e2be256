use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{info, warn};
use url::Url;

use crate::error::DigestError;
use crate::models::{DOWNLOAD_CHUNK_SIZE, DownloadOutcome};

pub fn build_client(timeout: Option<Duration>) -> Result<Client, DigestError> {
    let client = Client::builder()
        .user_agent(concat!("crec-digest/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// `<output_dir>/<last path segment of the URL>`, percent-decoded.
pub fn destination_for(source_url: &str, output_dir: &Path) -> Result<PathBuf, DigestError> {
    let url = Url::parse(source_url)?;
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| {
            DigestError::InvalidUrl(format!("URL has no file name to save as: {source_url}"))
        })?;

    let decoded = urlencoding::decode(segment)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string());
    let file_name = Path::new(&decoded)
        .file_name()
        .ok_or_else(|| DigestError::InvalidUrl(format!("unusable file name '{decoded}'")))?;

    Ok(output_dir.join(file_name))
}

/// Streams `source_url` into `destination`.
///
/// A non-200 response is reported and returned as [`DownloadOutcome::Failed`]
/// without creating the destination file. Transport errors propagate; a body
/// interrupted midway leaves a partial file behind.
pub fn download_pdf(
    client: &Client,
    source_url: &str,
    destination: &Path,
) -> Result<DownloadOutcome, DigestError> {
    if let Some(parent) = destination.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut response = client.get(source_url).send()?;
    let status = response.status();
    if status != StatusCode::OK {
        let outcome = DownloadOutcome::Failed {
            status: status.as_u16(),
        };
        warn!(url = source_url, "{outcome}");
        return Ok(outcome);
    }

    let mut file = File::create(destination)?;
    let mut buffer = [0_u8; DOWNLOAD_CHUNK_SIZE];
    let mut written = 0_u64;
    loop {
        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])?;
        written += read as u64;
    }
    file.flush()?;

    let outcome = DownloadOutcome::Saved {
        path: destination.to_path_buf(),
        bytes: written,
    };
    info!(url = source_url, "{outcome}");
    Ok(outcome)
}
