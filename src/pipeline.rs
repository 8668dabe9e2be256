use std::path::{Path, PathBuf};

use pdf_regions::{
    ExtractionReport, PdfDocument, PreviewOptions, extract_first_page, extract_rest,
    render_preview_page,
};
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::DigestConfig;
use crate::error::DigestError;
use crate::models::{DownloadOutcome, PipelineReport};
use crate::source_fetcher::{destination_for, download_pdf};

/// Runs download, previews and (optionally) text extraction, in that order.
///
/// With `client` set to `None` the download step is skipped and the PDF is
/// expected to already be at its destination. A failed download is logged and
/// the later steps still run, so they surface the missing file as an error.
pub fn run(config: &DigestConfig, client: Option<&Client>) -> Result<PipelineReport, DigestError> {
    let pdf_path = destination_for(&config.source_url, &config.output_dir)?;

    let download = match client {
        Some(client) => Some(download_pdf(client, &config.source_url, &pdf_path)?),
        None => {
            info!(path = %pdf_path.display(), "download skipped, using existing file");
            None
        }
    };
    if let Some(outcome @ DownloadOutcome::Failed { .. }) = &download {
        warn!("continuing without a fresh download: {outcome}");
    }

    let previews = render_previews(config, &pdf_path)?;

    let text_files = if config.extract_text {
        extract_texts(config, &pdf_path)?
    } else {
        Vec::new()
    };

    Ok(PipelineReport {
        download,
        previews,
        text_files,
    })
}

pub fn render_previews(config: &DigestConfig, pdf_path: &Path) -> Result<Vec<PathBuf>, DigestError> {
    if config.previews.is_empty() {
        return Ok(Vec::new());
    }

    let document = PdfDocument::open(pdf_path)?;
    let options = PreviewOptions {
        output_dir: config.preview_dir.clone(),
        dpi: config.preview_dpi,
        include_header: config.include_header,
        ..PreviewOptions::default()
    };

    config
        .previews
        .iter()
        .map(|target| -> Result<PathBuf, DigestError> {
            let index = target.page.checked_sub(1).ok_or_else(|| {
                DigestError::Config("preview pages are 1-based".to_string())
            })?;
            Ok(render_preview_page(&document, index, &target.layout, &options)?)
        })
        .collect()
}

pub fn extract_texts(config: &DigestConfig, pdf_path: &Path) -> Result<Vec<PathBuf>, DigestError> {
    let (_, first) = extract_first_page(pdf_path, &config.first_page, config.include_header)?;
    log_warnings(&first);
    let (_, rest) = extract_rest(pdf_path, &config.rest_pages)?;
    log_warnings(&rest);

    Ok(vec![first.output_path, rest.output_path])
}

fn log_warnings(report: &ExtractionReport) {
    for warning in &report.warnings {
        debug!(page = ?warning.page, region = ?warning.region, "{}", warning.message);
    }
    if !report.warnings.is_empty() {
        warn!(
            path = %report.output_path.display(),
            count = report.warnings.len(),
            "extraction finished with warnings"
        );
    }
}
