//! End-to-end forecast for one (ticker, start date) request
//!
//! history → ARIMA fit and forecast → momentum → signal → result table.
//! Each stage either returns a complete value or an error; nothing is
//! retried and no partial table is ever produced.

use crate::config::PipelineConfig;
use crate::data::PriceSeries;
use crate::engine::ForecastEngine;
use crate::error::{ForecastError, Result};
use crate::loader::HistoryLoader;
use crate::models::arima::Arima;
use crate::models::ForecastModel;
use crate::momentum::MomentumTransform;
use crate::signals::SignalClassifier;
use crate::sources::HistorySource;
use crate::table::{ForecastTable, ResultAssembler};
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

/// Everything a successful run hands to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    /// Observed history the model was fitted on, for charting
    pub history: PriceSeries,
    /// Forecast rows
    pub table: ForecastTable,
    /// Every momentum value was set to the midpoint because the forecast
    /// differences had zero range
    pub degenerate_momentum: bool,
}

/// Result of one pipeline run
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Forecast produced
    Success(Box<ForecastReport>),
    /// The source returned no bars for the ticker and range
    NoData {
        /// Normalized ticker
        ticker: String,
        /// Requested start date
        start_date: NaiveDate,
    },
    /// The request failed; see the error for the stage
    Failure(ForecastError),
}

impl PipelineOutcome {
    /// The report, if the run succeeded
    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            PipelineOutcome::Success(report) => Some(report),
            _ => None,
        }
    }

    /// Whether this is the no-data outcome
    pub fn is_no_data(&self) -> bool {
        matches!(self, PipelineOutcome::NoData { .. })
    }
}

/// A loader and a forecast engine wired together
pub struct Pipeline<S: HistorySource, M: ForecastModel = Arima> {
    loader: HistoryLoader<S>,
    engine: ForecastEngine<M>,
}

impl Pipeline<Box<dyn HistorySource>, Arima> {
    /// Pipeline over the configured source with the ARIMA(5,1,0) engine
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let source = config.build_source()?;
        let loader = if config.cache_enabled {
            HistoryLoader::new(source)
        } else {
            HistoryLoader::without_cache(source)
        };
        Ok(Self::new(loader, ForecastEngine::new()))
    }
}

impl<S: HistorySource, M: ForecastModel> Pipeline<S, M> {
    /// Assemble a pipeline from its stages
    pub fn new(loader: HistoryLoader<S>, engine: ForecastEngine<M>) -> Self {
        Self { loader, engine }
    }

    /// The history loader
    pub fn loader(&self) -> &HistoryLoader<S> {
        &self.loader
    }

    /// Run the pipeline, folding every failure into the outcome
    pub fn run(&mut self, ticker: &str, start_date: NaiveDate) -> PipelineOutcome {
        let span = info_span!("pipeline", ticker = %ticker, start = %start_date);
        let _guard = span.enter();

        match self.try_run(ticker, start_date) {
            Ok(Some(report)) => PipelineOutcome::Success(Box::new(report)),
            Ok(None) => {
                info!("no data for request");
                PipelineOutcome::NoData {
                    ticker: ticker.trim().to_ascii_uppercase(),
                    start_date,
                }
            }
            Err(e) => {
                warn!(error = %e, "pipeline failed");
                PipelineOutcome::Failure(e)
            }
        }
    }

    /// Run the pipeline; `Ok(None)` means the source had no data
    pub fn try_run(&mut self, ticker: &str, start_date: NaiveDate) -> Result<Option<ForecastReport>> {
        let history = self.loader.load(ticker, start_date)?;
        if history.is_empty() {
            return Ok(None);
        }

        let points = self.engine.forecast(&history)?;
        let momentum = MomentumTransform.apply(&points)?;
        let statuses = SignalClassifier.classify_all(&momentum.values);
        let table = ResultAssembler.assemble(history.ticker(), &points, &momentum, &statuses)?;

        info!(rows = table.len(), degenerate = momentum.degenerate, "pipeline complete");

        Ok(Some(ForecastReport {
            history,
            table,
            degenerate_momentum: momentum.degenerate,
        }))
    }
}

/// Forecast `ticker` from `start_date` using configuration from the environment.
///
/// Each call builds a fresh [`Pipeline`], so nothing is memoized between
/// calls. Keep a [`Pipeline`] around to reuse loaded history.
pub fn run_pipeline(ticker: &str, start_date: NaiveDate) -> PipelineOutcome {
    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => return PipelineOutcome::Failure(e),
    };
    run_pipeline_with_config(&config, ticker, start_date)
}

/// Forecast `ticker` from `start_date` with an explicit configuration.
///
/// Like [`run_pipeline`], the history cache lives only for this call.
pub fn run_pipeline_with_config(
    config: &PipelineConfig,
    ticker: &str,
    start_date: NaiveDate,
) -> PipelineOutcome {
    match Pipeline::from_config(config) {
        Ok(mut pipeline) => pipeline.run(ticker, start_date),
        Err(e) => PipelineOutcome::Failure(e),
    }
}
