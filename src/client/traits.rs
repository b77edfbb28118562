use crate::model::{
    AnalysisResult, MarketCode, MarketStatus, SearchError, StockSearchResult, TechnicalIndicators,
    TickerQuery, TimeFrame,
};

/// Remote analysis service seam. The orchestrator only talks to this trait.
#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(
        &self,
        query: &TickerQuery,
        market: MarketCode,
        timeframe: TimeFrame,
    ) -> Result<AnalysisResult, SearchError>;

    async fn fetch_indicators(
        &self,
        query: &TickerQuery,
        market: MarketCode,
    ) -> Result<TechnicalIndicators, SearchError>;

    async fn search_stocks(
        &self,
        text: &str,
        market: MarketCode,
    ) -> Result<Vec<StockSearchResult>, SearchError>;

    async fn market_status(&self, market: MarketCode) -> Result<MarketStatus, SearchError>;
}
