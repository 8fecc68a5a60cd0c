use chrono::NaiveDate;
use stock_edge::models::arima::Arima;
use stock_edge::sources::SyntheticSource;
use stock_edge::{ForecastEngine, HistoryLoader, Pipeline, PipelineOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Stock Edge: Basic Forecasting Example");
    println!("=====================================\n");

    // Offline random walk so the example runs without network access
    let source = SyntheticSource::with_seed(7);
    let end_date = NaiveDate::from_ymd_opt(2023, 12, 29).ok_or("invalid end date")?;
    let start_date = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("invalid start date")?;

    let loader = HistoryLoader::new(source).with_end_date(end_date);
    let engine = ForecastEngine::with_model(Arima::new(5, 1, 0)?);
    let mut pipeline = Pipeline::new(loader, engine);

    for ticker in ["AAPL", "MSFT"] {
        match pipeline.run(ticker, start_date) {
            PipelineOutcome::Success(report) => {
                println!(
                    "{}: {} observed closes, last {:.2}",
                    report.history.ticker(),
                    report.history.len(),
                    report.history.last_close().unwrap_or_default()
                );
                for row in report.table.rows() {
                    println!(
                        "  {}  {:>8.2}  {:>6.1}  {}",
                        row.date, row.predicted_close, row.momentum, row.status
                    );
                }
                println!();
            }
            PipelineOutcome::NoData { ticker, .. } => println!("{}: no data\n", ticker),
            PipelineOutcome::Failure(e) => println!("{}: {}\n", ticker, e),
        }
    }

    // Running the same request again is served from the loader's memo
    println!("Cached series: {}", pipeline.loader().cached_entries());

    Ok(())
}
