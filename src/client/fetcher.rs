use crate::client::traits::AnalysisClient;
use crate::config::AppConfig;
use crate::model::{
    AnalysisRequest, AnalysisResult, MarketCode, MarketStatus, SearchError, StockSearchResult,
    TechnicalIndicators, TickerQuery, TimeFrame,
};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs.map(Duration::from_secs),
            &config.user_agent,
        )
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Failure body shape of the analysis service.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extracts a non-empty string `detail` from a failure body, if there is one.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .detail
        .as_ref()
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Turns a response into `T`, mapping non-2xx statuses and undecodable bodies onto `SearchError`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SearchError::NetworkFailure(e.to_string()))?;

    if !status.is_success() {
        let detail = extract_detail(&body);
        warn!("❌ Analysis service responded [{}]: {}", status, body);
        return Err(SearchError::ServerError {
            status: status.as_u16(),
            detail,
        });
    }

    debug!("Analysis service responded [{}] with {} bytes", status, body.len());
    serde_json::from_str(&body).map_err(|e| SearchError::ParseFailure(e.to_string()))
}

#[async_trait::async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(
        &self,
        query: &TickerQuery,
        market: MarketCode,
        timeframe: TimeFrame,
    ) -> Result<AnalysisResult, SearchError> {
        let url = self.build_url("/api/analysis/analyze");
        let request = AnalysisRequest {
            ticker: query.raw_code.clone(),
            market,
        };
        info!("📤 POST {} ticker={} market={} timeframe={}", url, request.ticker, market, timeframe);

        let response = self
            .client
            .post(&url)
            .query(&[("timeframe", timeframe.as_str())])
            .json(&request)
            .send()
            .await?;

        read_json(response).await
    }

    async fn fetch_indicators(
        &self,
        query: &TickerQuery,
        market: MarketCode,
    ) -> Result<TechnicalIndicators, SearchError> {
        let mut url = reqwest::Url::parse(&self.build_url("/api/analysis/indicators"))
            .map_err(|e| SearchError::NetworkFailure(e.to_string()))?;
        // The ticker is one percent-encoded segment, never a relative reference.
        url.path_segments_mut()
            .map_err(|_| SearchError::NetworkFailure(format!("{} cannot be a base URL", self.base_url)))?
            .push(&query.raw_code);
        info!("📤 GET {} market={}", url, market);

        let response = self
            .client
            .get(url)
            .query(&[("market", market.as_str())])
            .send()
            .await?;

        read_json(response).await
    }

    async fn search_stocks(
        &self,
        text: &str,
        market: MarketCode,
    ) -> Result<Vec<StockSearchResult>, SearchError> {
        let url = self.build_url("/api/market/search");
        info!("📤 GET {} query={} market={}", url, text, market);

        let response = self
            .client
            .get(&url)
            .query(&[("query", text), ("market", market.as_str())])
            .send()
            .await?;

        read_json(response).await
    }

    async fn market_status(&self, market: MarketCode) -> Result<MarketStatus, SearchError> {
        let url = self.build_url("/api/market/market-status");
        info!("📤 GET {} market={}", url, market);

        let response = self
            .client
            .get(&url)
            .query(&[("market", market.as_str())])
            .send()
            .await?;

        read_json(response).await
    }
}
