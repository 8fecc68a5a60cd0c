//! # stock_edge
//!
//! Command-line front end: forecast one ticker and print the signal table.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use polars::prelude::*;
use std::io;
use std::path::PathBuf;
use std::process;
use stock_edge::{run_pipeline_with_config, ForecastReport, PipelineConfig, PipelineOutcome, SourceKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned table
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV on stdout
    Csv,
}

#[derive(Parser)]
#[command(name = "stock_edge")]
#[command(about = "Stock price forecasting with ARIMA and momentum indicator analysis", long_about = None)]
struct Cli {
    /// Stock ticker symbol
    #[arg(short, long, default_value = "AAPL")]
    ticker: String,

    /// First date of history to fit on (YYYY-MM-DD)
    #[arg(short, long, default_value = "2022-01-01")]
    start: NaiveDate,

    /// Data source (yahoo, csv, synthetic); overrides STOCK_EDGE_SOURCE
    #[arg(long)]
    source: Option<String>,

    /// Directory of <TICKER>.csv files; overrides STOCK_EDGE_DATA_DIR
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Also write the forecast table as CSV to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_edge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env().context("invalid STOCK_EDGE_* configuration")?;
    if let Some(source) = &cli.source {
        config.source = source.parse::<SourceKind>()?;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    info!(source = %config.source, ticker = %cli.ticker, start = %cli.start, "starting forecast");

    match run_pipeline_with_config(&config, &cli.ticker, cli.start) {
        PipelineOutcome::Success(report) => {
            present(&report, cli.format)?;
            if let Some(path) = &cli.output {
                report
                    .table
                    .write_csv(path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "wrote forecast table");
            }
        }
        PipelineOutcome::NoData { .. } => {
            println!("No data available for the selected ticker and start date.");
        }
        PipelineOutcome::Failure(e) => {
            eprintln!("An error occurred: {}", e);
            process::exit(1);
        }
    }

    Ok(())
}

fn present(report: &ForecastReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.table.to_json()?),
        OutputFormat::Csv => {
            let mut df = report.table.to_dataframe()?;
            CsvWriter::new(io::stdout()).has_header(true).finish(&mut df)?;
        }
        OutputFormat::Table => {
            print_close_summary(report);
            println!();
            if report.degenerate_momentum {
                println!("Forecast path is flat; momentum set to the midpoint.");
            }
            println!("Predicted Closing Prices and Momentum Indicator:");
            println!("{}", report.table.to_dataframe()?);
        }
    }
    Ok(())
}

fn print_close_summary(report: &ForecastReport) {
    let history = &report.history;
    let closes = history.closes();
    let (low, high) = closes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));

    println!("Closing Prices for {}:", history.ticker());
    if let (Some(first), Some(last)) = (history.bars().first(), history.bars().last()) {
        println!("  {} trading days, {} to {}", history.len(), first.date, last.date);
        println!("  first {:.2}  last {:.2}  low {:.2}  high {:.2}", first.close, last.close, low, high);
    }
}
