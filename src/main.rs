//! CLI entry point for the delay report.
//!
//! Provides subcommands for inspecting a single month's per-line averages
//! and for building and rendering a year of per-line delay series.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use delay_report::analyzers::aggregate::aggregate_month;
use delay_report::analyzers::series::{DuplicatePolicy, MissingFilePolicy, build_series};
use delay_report::config::ReportConfig;
use delay_report::output::{
    ChartView, CsvRenderer, JsonRenderer, LogRenderer, Renderer, print_month,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "delay_report")]
#[command(about = "Average train delay per line, month by month", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Log,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the average delay of every line for one monthly file
    Month {
        /// Monthly CSV file, named like 2019_06.csv
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Build per-line series over a sequence of monthly files and render them
    Series {
        /// Monthly CSV files in chronological order (defaults to the 2019 archive)
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,

        /// JSON config with the file list and policies
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which series to render
        #[arg(long, value_enum, default_value_t = ChartView::Full)]
        view: ChartView,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Log)]
        format: Format,

        /// Output file for csv and json formats
        #[arg(short, long, default_value = "delay_series")]
        output: PathBuf,

        /// Skip months whose file cannot be opened instead of aborting
        #[arg(long, default_value_t = false)]
        skip_missing: bool,

        /// Ignore repeated months instead of aborting
        #[arg(long, default_value_t = false)]
        skip_duplicates: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/delay_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("delay_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Month { file } => {
            let month = aggregate_month(&file)
                .with_context(|| format!("aggregating {}", file.display()))?;
            print_month(&month);
        }
        Commands::Series {
            files,
            config,
            view,
            format,
            output,
            skip_missing,
            skip_duplicates,
        } => {
            let mut report = match config {
                Some(path) => ReportConfig::load(&path)?,
                None => ReportConfig::default(),
            };
            if !files.is_empty() {
                report.files = files;
            }
            if skip_missing {
                report.on_missing = MissingFilePolicy::Skip;
            }
            if skip_duplicates {
                report.on_duplicate = DuplicatePolicy::Skip;
            }

            info!(files = report.files.len(), ?view, "Building delay series");
            let series = build_series(&report.files, report.series_options())?;

            let renderer: Box<dyn Renderer> = match format {
                Format::Log => Box::new(LogRenderer { view }),
                Format::Csv => Box::new(CsvRenderer::new(output.with_extension("csv"), view)),
                Format::Json => Box::new(JsonRenderer::new(output.with_extension("json"), view)),
            };
            renderer.render(&series)?;
        }
    }

    Ok(())
}
