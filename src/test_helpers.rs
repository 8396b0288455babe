use chrono::NaiveDate;

use crate::models::TradeRecord;

/// Parse a `YYYY-MM-DD` literal into a date.
pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// Build a record from a date literal, hour, result, and optional strategy.
pub fn rec(date: &str, hour: u32, result: f64, strategy: Option<&str>) -> TradeRecord {
    TradeRecord {
        date: day(date),
        hour,
        result,
        strategy: strategy.map(str::to_string),
    }
}

/// Build records from (date, hour, result, strategy) tuples; empty strategy
/// strings become untagged records.
pub fn make_records(data: &[(&str, u32, f64, &str)]) -> Vec<TradeRecord> {
    data.iter()
        .map(|&(date, hour, result, strategy)| {
            let strategy = if strategy.is_empty() {
                None
            } else {
                Some(strategy)
            };
            rec(date, hour, result, strategy)
        })
        .collect()
}
