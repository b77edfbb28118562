// Shared fixtures for unit tests.
use crate::client::AnalysisClient;
use crate::model::{
    AnalysisResult, BollingerBands, ChartData, Macd, MarketCode, MarketStatus, SearchError,
    StockSearchResult, TechnicalIndicators, TickerQuery, TimeFrame,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn sample_analysis(ticker: &str, change_percent: f64) -> AnalysisResult {
    AnalysisResult {
        ticker: ticker.to_string(),
        market: MarketCode::Us,
        current_price: 189.5,
        change_percent,
        volume: 5_000.0,
        indicators: TechnicalIndicators {
            sma_50: 180.123,
            sma_200: 170.0,
            rsi: 61.457,
            macd: Macd {
                macd: 1.234,
                signal: 0.8,
                histogram: 0.434,
            },
            bollinger_bands: BollingerBands {
                upper: vec![191.0, 192.0, 193.0],
                middle: vec![185.0, 186.0, 187.0],
                lower: vec![179.0, 180.0, 181.0],
            },
        },
        recommendation: "매수".to_string(),
        analysis_summary: "RSI neutral.\nMACD above signal.".to_string(),
        timestamp: "2024-05-01T09:30:00".to_string(),
        chart_data: ChartData {
            dates: vec!["2024-04-29".into(), "2024-04-30".into(), "2024-05-01".into()],
            prices: vec![185.0, 187.0, 189.5],
            volumes: vec![4_000.0, 4_500.0, 5_000.0],
            rsi: vec![55.0, 58.0, 61.457],
            timeframe: Some(TimeFrame::Daily),
        },
    }
}

/// Scripted `AnalysisClient` that records every analyze call.
#[derive(Default)]
pub struct FakeClient {
    pub calls: Mutex<Vec<(String, MarketCode, TimeFrame)>>,
    pub responses: Mutex<VecDeque<Result<AnalysisResult, SearchError>>>,
    /// When set, analyze waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl FakeClient {
    pub fn with_responses(responses: Vec<Result<AnalysisResult, SearchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, MarketCode, TimeFrame)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AnalysisClient for FakeClient {
    async fn analyze(
        &self,
        query: &TickerQuery,
        market: MarketCode,
        timeframe: TimeFrame,
    ) -> Result<AnalysisResult, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.raw_code.clone(), market, timeframe));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SearchError::NetworkFailure("no scripted response".into())))
    }

    async fn fetch_indicators(
        &self,
        query: &TickerQuery,
        _market: MarketCode,
    ) -> Result<TechnicalIndicators, SearchError> {
        let mut indicators = sample_analysis(&query.raw_code, 0.0).indicators;
        indicators.rsi = 42.0;
        Ok(indicators)
    }

    async fn search_stocks(
        &self,
        text: &str,
        market: MarketCode,
    ) -> Result<Vec<StockSearchResult>, SearchError> {
        Ok(vec![StockSearchResult {
            ticker: Some(text.to_uppercase()),
            name: None,
            market: market.to_string(),
        }])
    }

    async fn market_status(&self, market: MarketCode) -> Result<MarketStatus, SearchError> {
        Ok(MarketStatus {
            market: market.to_string(),
            status: "open".to_string(),
            timestamp: None,
        })
    }
}
