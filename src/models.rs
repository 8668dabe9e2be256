use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use pdf_regions::LayoutParams;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_URL: &str =
    "https://www.congress.gov/119/crec/2025/09/11/171/149/CREC-2025-09-11.pdf";
pub const DEFAULT_OUTPUT_DIR: &str = "daily_digest_pdfs";
pub const SOURCE_URL_ENV: &str = "SOURCE_URL";
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: u64 },
    Failed { status: u16 },
}

impl DownloadOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

impl Display for DownloadOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved { path, bytes } => {
                write!(f, "PDF downloaded successfully: {} ({bytes} bytes)", path.display())
            }
            Self::Failed { status } => write!(f, "Failed to download. Status code: {status}"),
        }
    }
}

/// One page to preview, with the proportions used to outline it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewTarget {
    /// 1-based page number.
    pub page: usize,
    #[serde(default)]
    pub layout: LayoutParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub download: Option<DownloadOutcome>,
    pub previews: Vec<PathBuf>,
    pub text_files: Vec<PathBuf>,
}
