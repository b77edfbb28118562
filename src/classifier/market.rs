use crate::model::MarketCode;

/// Length of a KRX listing code.
const KR_CODE_LEN: usize = 6;
/// Longest ticker assumed to be a US symbol without further inspection.
const US_SHORT_MAX_LEN: usize = 4;

/// Infers the listing market from a raw ticker. Rules apply in order, first match wins:
/// six ASCII digits is KR, four characters or fewer is US, otherwise any digit means KR.
///
/// Total over all strings; empty input is rejected upstream.
pub fn classify_market(code: &str) -> MarketCode {
    if code.len() == KR_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        return MarketCode::Kr;
    }
    if code.chars().count() <= US_SHORT_MAX_LEN {
        return MarketCode::Us;
    }
    if code.chars().any(|c| c.is_ascii_digit()) {
        MarketCode::Kr
    } else {
        MarketCode::Us
    }
}
