// Utility functions
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an RFC 3339 timestamp, falling back to a naive ISO 8601 one read as UTC.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    DateTime::parse_from_rfc3339(date_str)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Trims and upper-cases a ticker as typed by the user.
pub fn normalize_ticker(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Formats a number with `,` thousands separators and at most `decimals` fraction digits.
/// Trailing zeros in the fraction are dropped.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let with_offset = parse_datetime("2024-05-01T09:30:00+09:00").unwrap();
        assert_eq!(with_offset.hour(), 0);

        let naive = parse_datetime("2024-05-01T09:30:00.654321").unwrap();
        assert_eq!(naive.day(), 1);
        assert_eq!(naive.hour(), 9);

        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(71200.0, 2), "71,200");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(189.5, 2), "189.5");
        assert_eq!(group_thousands(-1000.0, 0), "-1,000");
        assert_eq!(group_thousands(-0.001, 2), "0");
        assert_eq!(group_thousands(999.0, 2), "999");
    }
}
