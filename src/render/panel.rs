// Result panel: price, change, indicators, recommendation and summary as text.
use crate::model::{AnalysisResult, MarketCode, Recommendation};
use crate::utils::group_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    /// Zero counts as non-negative.
    pub fn of(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            ChangeDirection::Up => "▲",
            ChangeDirection::Down => "▼",
        }
    }
}

pub fn format_price(market: MarketCode, price: f64) -> String {
    format!("{}{}", market.currency_symbol(), group_thousands(price, 2))
}

pub fn format_change(change_percent: f64) -> String {
    // -0.0 prints as non-negative
    let change_percent = if change_percent == 0.0 { 0.0 } else { change_percent };
    let direction = ChangeDirection::of(change_percent);
    let sign = match direction {
        ChangeDirection::Up => "+",
        ChangeDirection::Down => "",
    };
    format!("{} {}{:.2}%", direction.marker(), sign, change_percent)
}

fn recommendation_marker(kind: Recommendation) -> &'static str {
    match kind {
        Recommendation::Buy => "🟢",
        Recommendation::Sell => "🔴",
        Recommendation::Hold => "🟡",
    }
}

pub fn render_result(analysis: &AnalysisResult) -> String {
    let indicators = &analysis.indicators;
    let mut out = String::new();

    out.push_str(&format!("📈 {} ({})\n", analysis.ticker, analysis.market));
    out.push_str(&format!(
        "💰 Price: {}   Change: {}   Volume: {}\n",
        format_price(analysis.market, analysis.current_price),
        format_change(analysis.change_percent),
        group_thousands(analysis.volume, 0)
    ));
    out.push_str(&format!(
        "📊 SMA 50: {:.2} | SMA 200: {:.2} | RSI: {:.2} | MACD: {:.2} (signal {:.2}, hist {:.2})\n",
        indicators.sma_50,
        indicators.sma_200,
        indicators.rsi,
        indicators.macd.macd,
        indicators.macd.signal,
        indicators.macd.histogram
    ));

    let bands = &indicators.bollinger_bands;
    if let (Some(upper), Some(middle), Some(lower)) =
        (bands.upper.last(), bands.middle.last(), bands.lower.last())
    {
        out.push_str(&format!(
            "📐 Bollinger: upper {:.2} | middle {:.2} | lower {:.2}\n",
            upper, middle, lower
        ));
    }

    out.push_str(&format!(
        "{} Recommendation: {}\n",
        recommendation_marker(analysis.recommendation_kind()),
        analysis.recommendation
    ));
    out.push_str("📝 Summary:\n");
    for line in analysis.analysis_summary.lines() {
        out.push_str(&format!("   {}\n", line));
    }

    match analysis.recorded_at() {
        Some(at) => out.push_str(&format!("🕒 {}", at.format("%Y-%m-%d %H:%M:%S UTC"))),
        None => out.push_str(&format!("🕒 {}", analysis.timestamp)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_analysis;

    #[test]
    fn change_direction_boundary() {
        assert_eq!(ChangeDirection::of(2.5), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(-1.2), ChangeDirection::Down);
        assert_eq!(ChangeDirection::of(0.0), ChangeDirection::Up);
    }

    #[test]
    fn change_is_signed_with_marker() {
        assert_eq!(format_change(2.5), "▲ +2.50%");
        assert_eq!(format_change(-1.2), "▼ -1.20%");
        assert_eq!(format_change(0.0), "▲ +0.00%");
        assert_eq!(format_change(-0.0), "▲ +0.00%");
    }

    #[test]
    fn price_uses_market_currency() {
        assert_eq!(format_price(MarketCode::Kr, 71200.0), "₩71,200");
        assert_eq!(format_price(MarketCode::Us, 1234.5), "$1,234.5");
    }

    #[test]
    fn result_panel_lists_everything() {
        let out = render_result(&sample_analysis("AAPL", -1.2));

        assert!(out.starts_with("📈 AAPL (US)"));
        assert!(out.contains("$189.5"));
        assert!(out.contains("▼ -1.20%"));
        assert!(out.contains("SMA 50: 180.12"));
        assert!(out.contains("RSI: 61.46"));
        assert!(out.contains("MACD: 1.23"));
        assert!(out.contains("upper 193.00"));
        assert!(out.contains("🟢 Recommendation: 매수"));
        assert!(out.contains("   MACD above signal."));
        assert!(out.contains("2024-05-01 09:30:00 UTC"));
    }
}
