use crate::model::{MarketCode, TimeFrame, ValidationError};

/// Rejects minute-level timeframes for the Korean market before any request is made.
pub fn validate_timeframe(market: MarketCode, timeframe: TimeFrame) -> Result<(), ValidationError> {
    if market == MarketCode::Kr && timeframe.is_intraday() {
        return Err(ValidationError::UnsupportedTimeframe { market, timeframe });
    }
    Ok(())
}

/// Timeframes the chart panel may offer as toggles for the given market.
pub fn supported_timeframes(market: MarketCode) -> &'static [TimeFrame] {
    match market {
        MarketCode::Kr => &TimeFrame::LONG_HORIZON,
        MarketCode::Us => &TimeFrame::ALL,
    }
}
