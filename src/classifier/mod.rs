// Classifier module: maps tickers to markets and guards timeframes per market.

pub mod market;
pub mod timeframe;

pub use market::classify_market;
pub use timeframe::{supported_timeframes, validate_timeframe};
