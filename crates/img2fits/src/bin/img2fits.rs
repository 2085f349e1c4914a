use anyhow::{Context, Result};
use clap::Parser;
use img2fits::{Codecs, ConvertOptions, Dispatcher};
use tracing_subscriber::EnvFilter;

/// Image to FITS converter
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File or directory to convert
    target: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let codecs = Codecs::register();
    let summary = Dispatcher::new(&codecs, ConvertOptions::default())
        .run(&args.target)
        .with_context(|| format!("failed to convert '{}'", args.target))?;

    tracing::info!(
        images = summary.reports.len(),
        files = summary.files_written(),
        "done"
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
