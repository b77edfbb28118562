// Core structs: TickerQuery, AnalysisResult, SearchError
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::{normalize_ticker, parse_datetime};

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during analysis.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerQuery {
    pub raw_code: String,
}

impl TickerQuery {
    /// Builds a query from user input, trimmed and upper-cased.
    pub fn new(input: &str) -> Self {
        Self {
            raw_code: normalize_ticker(input),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw_code.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketCode {
    #[serde(rename = "KR")]
    Kr,
    #[serde(rename = "US")]
    Us,
}

impl MarketCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCode::Kr => "KR",
            MarketCode::Us => "US",
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            MarketCode::Kr => "₩",
            MarketCode::Us => "$",
        }
    }
}

impl fmt::Display for MarketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KR" => Ok(MarketCode::Kr),
            "US" => Ok(MarketCode::Us),
            other => Err(ValidationError::UnknownMarket(other.to_string())),
        }
    }
}

/// Requested granularity of the price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "10m")]
    Minute10,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "60m")]
    Minute60,
    #[serde(rename = "120m")]
    Minute120,
    #[serde(rename = "240m")]
    Minute240,
    #[default]
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 12] = [
        TimeFrame::Minute1,
        TimeFrame::Minute3,
        TimeFrame::Minute5,
        TimeFrame::Minute10,
        TimeFrame::Minute15,
        TimeFrame::Minute30,
        TimeFrame::Minute60,
        TimeFrame::Minute120,
        TimeFrame::Minute240,
        TimeFrame::Daily,
        TimeFrame::Weekly,
        TimeFrame::Monthly,
    ];

    pub const LONG_HORIZON: [TimeFrame; 3] =
        [TimeFrame::Daily, TimeFrame::Weekly, TimeFrame::Monthly];

    /// Wire value sent as the `timeframe` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute3 => "3m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute10 => "10m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Minute60 => "60m",
            TimeFrame::Minute120 => "120m",
            TimeFrame::Minute240 => "240m",
            TimeFrame::Daily => "daily",
            TimeFrame::Weekly => "weekly",
            TimeFrame::Monthly => "monthly",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1 min",
            TimeFrame::Minute3 => "3 min",
            TimeFrame::Minute5 => "5 min",
            TimeFrame::Minute10 => "10 min",
            TimeFrame::Minute15 => "15 min",
            TimeFrame::Minute30 => "30 min",
            TimeFrame::Minute60 => "1 hour",
            TimeFrame::Minute120 => "2 hours",
            TimeFrame::Minute240 => "4 hours",
            TimeFrame::Daily => "Daily",
            TimeFrame::Weekly => "Weekly",
            TimeFrame::Monthly => "Monthly",
        }
    }

    /// Minute-suffixed granularities.
    pub fn is_intraday(&self) -> bool {
        self.as_str().ends_with('m')
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TimeFrame::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == wanted)
            .ok_or(ValidationError::UnknownTimeframe(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    #[serde(default)]
    pub upper: Vec<f64>,
    #[serde(default)]
    pub middle: Vec<f64>,
    #[serde(default)]
    pub lower: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub sma_50: f64,
    pub sma_200: f64,
    pub rsi: f64,
    pub macd: Macd,
    #[serde(default)]
    pub bollinger_bands: BollingerBands,
}

/// Parallel per-period series, one entry per date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub volumes: Vec<f64>,
    #[serde(default)]
    pub rsi: Vec<f64>,
    /// Only feeds the chart title; labels this client does not know read as absent.
    #[serde(default, deserialize_with = "lenient_timeframe")]
    pub timeframe: Option<TimeFrame>,
}

fn lenient_timeframe<'de, D>(deserializer: D) -> Result<Option<TimeFrame>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_str().and_then(|s| s.parse().ok())))
}

impl ChartData {
    /// True when every non-empty series has the same length as `dates`.
    /// An absent RSI series is tolerated.
    pub fn is_consistent(&self) -> bool {
        let n = self.dates.len();
        self.prices.len() == n
            && self.volumes.len() == n
            && (self.rsi.is_empty() || self.rsi.len() == n)
    }

    /// Number of periods every required series can cover.
    pub fn usable_len(&self) -> usize {
        self.dates
            .len()
            .min(self.prices.len())
            .min(self.volumes.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub market: MarketCode,
    pub current_price: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub volume: f64,
    pub indicators: TechnicalIndicators,
    pub recommendation: String,
    pub analysis_summary: String,
    pub timestamp: String,
    pub chart_data: ChartData,
}

impl AnalysisResult {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_datetime(&self.timestamp)
    }

    pub fn recommendation_kind(&self) -> Recommendation {
        Recommendation::classify(&self.recommendation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Maps the service's free-text label onto a tone. Unknown labels are `Hold`.
    pub fn classify(label: &str) -> Self {
        match label.trim() {
            "매수" => Recommendation::Buy,
            "매도" => Recommendation::Sell,
            other if other.eq_ignore_ascii_case("buy") => Recommendation::Buy,
            other if other.eq_ignore_ascii_case("sell") => Recommendation::Sell,
            _ => Recommendation::Hold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub market: MarketCode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockSearchResult {
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub market: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketStatus {
    pub market: String,
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Korean stocks do not support minute-level data. Choose daily, weekly or monthly.")]
    UnsupportedTimeframe { market: MarketCode, timeframe: TimeFrame },
    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),
    #[error("unknown market: {0}")]
    UnknownMarket(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Please enter a ticker symbol.")]
    EmptyInput,
    #[error(transparent)]
    UnsupportedTimeframe(ValidationError),
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("server error [{status}]: {}", .detail.as_deref().unwrap_or("no detail"))]
    ServerError { status: u16, detail: Option<String> },
    #[error("could not parse response: {0}")]
    ParseFailure(String),
    #[error("a search is already in progress")]
    Busy,
}

impl SearchError {
    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyInput | SearchError::UnsupportedTimeframe(_) | SearchError::Busy => {
                self.to_string()
            }
            SearchError::ServerError {
                detail: Some(detail),
                ..
            } => detail.clone(),
            SearchError::ServerError { detail: None, .. }
            | SearchError::NetworkFailure(_)
            | SearchError::ParseFailure(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<ValidationError> for SearchError {
    fn from(err: ValidationError) -> Self {
        SearchError::UnsupportedTimeframe(err)
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::ParseFailure(err.to_string())
        } else {
            SearchError::NetworkFailure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_parses_wire_values() {
        for tf in TimeFrame::ALL {
            assert_eq!(tf.as_str().parse::<TimeFrame>(), Ok(tf));
        }
        assert_eq!(" Weekly ".parse::<TimeFrame>(), Ok(TimeFrame::Weekly));
        assert!(matches!(
            "2h".parse::<TimeFrame>(),
            Err(ValidationError::UnknownTimeframe(_))
        ));
    }

    #[test]
    fn intraday_is_minute_suffixed() {
        let intraday: Vec<_> = TimeFrame::ALL.iter().filter(|t| t.is_intraday()).collect();
        assert_eq!(intraday.len(), 9);
        assert!(!TimeFrame::Monthly.is_intraday());
        assert_eq!(TimeFrame::default(), TimeFrame::Daily);
    }

    #[test]
    fn ticker_query_normalizes_input() {
        assert_eq!(TickerQuery::new("  aapl ").raw_code, "AAPL");
        assert!(TickerQuery::new("   ").is_empty());
    }

    #[test]
    fn deserializes_service_payload() {
        let body = r#"{
            "ticker": "005930",
            "market": "KR",
            "current_price": 71200.0,
            "change_percent": -1.2,
            "volume": 1234567,
            "indicators": {
                "sma_50": 70000.5,
                "sma_200": 68000.0,
                "rsi": 44.1,
                "macd": {"macd": -12.0, "signal": -8.5, "histogram": -3.5},
                "bollinger_bands": {"upper": [1.0], "middle": [0.5], "lower": [0.0]}
            },
            "recommendation": "매도",
            "analysis_summary": "line one\nline two",
            "timestamp": "2024-05-01T09:30:00.123456",
            "chart_data": {
                "dates": ["2024-04-30", "2024-05-01"],
                "prices": [72000.0, 71200.0],
                "volumes": [1000, 2000]
            }
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.market, MarketCode::Kr);
        assert_eq!(result.recommendation_kind(), Recommendation::Sell);
        assert!(result.chart_data.rsi.is_empty());
        assert_eq!(result.chart_data.timeframe, None);
        assert!(result.chart_data.is_consistent());
        assert!(result.recorded_at().is_some());
    }

    #[test]
    fn unknown_chart_timeframe_reads_as_absent() {
        let body = r#"{"dates": ["2024-05-01"], "prices": [1.0], "volumes": [2.0], "timeframe": "hourly"}"#;
        let chart: ChartData = serde_json::from_str(body).unwrap();
        assert_eq!(chart.timeframe, None);
        assert_eq!(chart.prices, vec![1.0]);

        let chart: ChartData =
            serde_json::from_str(r#"{"dates": [], "prices": [], "volumes": [], "timeframe": 7}"#).unwrap();
        assert_eq!(chart.timeframe, None);

        let chart: ChartData =
            serde_json::from_str(r#"{"dates": [], "prices": [], "volumes": [], "timeframe": "weekly"}"#).unwrap();
        assert_eq!(chart.timeframe, Some(TimeFrame::Weekly));
    }

    #[test]
    fn chart_inconsistency_is_detected() {
        let chart = ChartData {
            dates: vec!["a".into(), "b".into()],
            prices: vec![1.0],
            volumes: vec![1.0, 2.0],
            rsi: vec![],
            timeframe: Some(TimeFrame::Daily),
        };
        assert!(!chart.is_consistent());
        assert_eq!(chart.usable_len(), 1);
    }

    #[test]
    fn user_message_prefers_server_detail() {
        let err = SearchError::ServerError {
            status: 500,
            detail: Some("bad ticker".into()),
        };
        assert_eq!(err.user_message(), "bad ticker");

        let err = SearchError::ServerError {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(
            SearchError::ParseFailure("eof".into()).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            SearchError::EmptyInput.user_message(),
            "Please enter a ticker symbol."
        );
    }

    #[test]
    fn recommendation_labels() {
        assert_eq!(Recommendation::classify("매수"), Recommendation::Buy);
        assert_eq!(Recommendation::classify("SELL"), Recommendation::Sell);
        assert_eq!(Recommendation::classify("관망"), Recommendation::Hold);
    }
}
