pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod source_fetcher;

pub use config::DigestConfig;
pub use error::DigestError;
pub use models::{DownloadOutcome, PipelineReport, PreviewTarget};
