use crate::classifier::{classify_market, validate_timeframe};
use crate::client::AnalysisClient;
use crate::model::{AnalysisResult, MarketCode, SearchError, TickerQuery, TimeFrame};
use crate::orchestrator::state::SearchState;

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Drives the search flow: validate, request, settle. At most one request is in flight.
///
/// State is published on a `watch` channel; renderers hold receivers and never write.
pub struct SearchOrchestrator {
    client: Arc<dyn AnalysisClient>,
    state: watch::Sender<SearchState>,
}

impl SearchOrchestrator {
    pub fn new(client: Arc<dyn AnalysisClient>, default_timeframe: TimeFrame) -> Self {
        let (state, _) = watch::channel(SearchState::new(default_timeframe));
        Self { client, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Searches `input` with the current timeframe.
    pub async fn submit(&self, input: &str) -> Result<(), SearchError> {
        let query = TickerQuery::new(input);
        let timeframe = self.state.borrow().timeframe;
        self.run(query, timeframe).await
    }

    /// Re-runs the last submitted ticker with a new timeframe.
    pub async fn change_timeframe(&self, timeframe: TimeFrame) -> Result<(), SearchError> {
        let query = TickerQuery::new(&self.state.borrow().ticker);
        self.run(query, timeframe).await
    }

    async fn run(&self, query: TickerQuery, timeframe: TimeFrame) -> Result<(), SearchError> {
        let market = self.begin(&query, timeframe)?;

        info!("🔍 Requesting analysis for {} ({}) at {}", query.raw_code, market, timeframe);
        let outcome = self.client.analyze(&query, market, timeframe).await;
        self.settle(&query, outcome)
    }

    /// Validates and, on success, moves the state to loading in one step so that
    /// a concurrent caller observes `Busy`.
    fn begin(&self, query: &TickerQuery, timeframe: TimeFrame) -> Result<MarketCode, SearchError> {
        let mut result = Err(SearchError::Busy);

        self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.ticker = query.raw_code.clone();
            state.timeframe = timeframe;

            result = validate(query, timeframe);
            match &result {
                Ok(_) => {
                    state.loading = true;
                    state.error = None;
                }
                Err(e) => {
                    state.error = Some(e.user_message());
                    state.analysis = None;
                }
            }
            true
        });

        if let Err(e) = &result {
            warn!("Search rejected for '{}' at {}: {}", query.raw_code, timeframe, e);
        }
        result
    }

    fn settle(
        &self,
        query: &TickerQuery,
        outcome: Result<AnalysisResult, SearchError>,
    ) -> Result<(), SearchError> {
        match outcome {
            Ok(analysis) => {
                info!(
                    "✅ Analysis received for {}: {} periods, recommendation {}",
                    query.raw_code,
                    analysis.chart_data.dates.len(),
                    analysis.recommendation
                );
                self.state.send_modify(|state| {
                    state.analysis = Some(analysis);
                    state.error = None;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!("❌ Analysis failed for {}: {}", query.raw_code, e);
                let message = e.user_message();
                self.state.send_modify(|state| {
                    state.error = Some(message);
                    state.analysis = None;
                    state.loading = false;
                });
                Err(e)
            }
        }
    }
}

fn validate(query: &TickerQuery, timeframe: TimeFrame) -> Result<MarketCode, SearchError> {
    if query.is_empty() {
        return Err(SearchError::EmptyInput);
    }
    let market = classify_market(&query.raw_code);
    validate_timeframe(market, timeframe)?;
    Ok(market)
}
