use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crec_digest::source_fetcher::build_client;
use crec_digest::{DigestConfig, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "crec-digest",
    version,
    about = "Download the Daily Digest PDF, preview its regions and extract their text"
)]
struct Cli {
    /// JSON file with pipeline settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// PDF URL (overrides config and SOURCE_URL).
    #[arg(long)]
    url: Option<String>,

    /// Directory the PDF is saved into.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory preview PNGs are written to.
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Use the PDF already on disk instead of downloading it.
    #[arg(long)]
    skip_download: bool,

    /// Also write region text files next to the PDF.
    #[arg(long)]
    extract: bool,

    /// Leave the header strip out of previews and first-page text.
    #[arg(long)]
    no_header: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<DigestConfig> {
        let base = match &self.config {
            Some(path) => DigestConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DigestConfig::default(),
        };
        let mut config = base.with_env_overrides(|key| std::env::var(key).ok());

        if let Some(url) = &self.url {
            config.source_url.clone_from(url);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(dir) = &self.preview_dir {
            config.preview_dir.clone_from(dir);
        }
        if self.extract {
            config.extract_text = true;
        }
        if self.no_header {
            config.include_header = false;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let client = if cli.skip_download {
        None
    } else {
        Some(build_client(config.request_timeout_secs.map(Duration::from_secs))?)
    };

    let report = pipeline::run(&config, client.as_ref()).context("pipeline failed")?;
    info!(
        previews = report.previews.len(),
        text_files = report.text_files.len(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "crec_digest=debug,pdf_regions=debug"
    } else {
        "crec_digest=info,pdf_regions=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
