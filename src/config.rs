use std::fs;
use std::path::{Path, PathBuf};

use pdf_regions::{DEFAULT_PREVIEW_DPI, LayoutParams};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DigestError;
use crate::models::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_URL, PreviewTarget, SOURCE_URL_ENV};

/// Everything one run of the pipeline needs; passed explicitly to each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub source_url: String,
    pub output_dir: PathBuf,
    pub preview_dir: PathBuf,
    pub preview_dpi: u32,
    /// Outline the header strip in previews and keep its text on the first page.
    pub include_header: bool,
    pub previews: Vec<PreviewTarget>,
    pub first_page: LayoutParams,
    pub rest_pages: LayoutParams,
    pub extract_text: bool,
    /// `None` lets a download block for as long as the server keeps the connection open.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preview_dir: PathBuf::from("."),
            preview_dpi: DEFAULT_PREVIEW_DPI,
            include_header: true,
            previews: vec![
                PreviewTarget {
                    page: 1,
                    layout: LayoutParams::first_page(),
                },
                PreviewTarget {
                    page: 2,
                    layout: LayoutParams::default().with_header(0.045).with_footer(0.04),
                },
            ],
            first_page: LayoutParams::first_page(),
            rest_pages: LayoutParams::rest_pages(),
            extract_text: false,
            request_timeout_secs: None,
        }
    }
}

impl DigestConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, DigestError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            DigestError::Config(format!("failed to read {}: {error}", path.display()))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Applies environment overrides, looked up through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SOURCE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.source_url = url.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), DigestError> {
        Url::parse(&self.source_url)?;

        if self.preview_dpi == 0 {
            return Err(DigestError::Config("preview_dpi must be positive".to_string()));
        }

        for target in &self.previews {
            if target.page == 0 {
                return Err(DigestError::Config("preview pages are 1-based".to_string()));
            }
            target.layout.validate().map_err(|error| {
                DigestError::Config(format!("preview of page {}: {error}", target.page))
            })?;
        }

        self.first_page
            .validate()
            .map_err(|error| DigestError::Config(format!("first_page: {error}")))?;
        self.rest_pages
            .validate()
            .map_err(|error| DigestError::Config(format!("rest_pages: {error}")))?;

        Ok(())
    }
}
