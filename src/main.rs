use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod aggregate;
mod dataset;
mod filter;
mod server;

use dataset::{load_dataset, sample_dataset, SongRecord};
use server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the songs CSV file.
    #[clap(value_parser = parse_path)]
    pub dataset_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Load and summarize the dataset, then exit without serving.
    #[clap(long)]
    pub check_only: bool,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

/// Short form of a large count: 1.2K, 3.4M, 5.6B.
fn format_stream_count(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn summarize(records: &[SongRecord]) {
    let total_streams: u64 = records.iter().map(|record| record.streams).sum();
    println!(
        "Dataset has {} songs, {} total streams",
        records.len(),
        format_stream_count(total_streams as f64)
    );
    for entry in aggregate::streams_by_year(records) {
        println!("  {}: {}", entry.year, format_stream_count(entry.streams as f64));
    }
    for entry in aggregate::top_artists(records, 5) {
        println!("  {}: {}", entry.name, format_stream_count(entry.streams));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let records = match load_dataset(&cli_args.dataset_path) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "Could not load {}: {}. Falling back to the sample dataset.",
                cli_args.dataset_path.display(),
                err
            );
            sample_dataset()
        }
    };

    if cli_args.check_only {
        summarize(&records);
        return Ok(());
    }

    info!("Serving analytics on port {}", cli_args.port);
    run_server(
        records,
        cli_args.logging_level,
        cli_args.port,
        cli_args.frontend_dir_path,
    )
    .await
}
