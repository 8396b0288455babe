use chrono::NaiveDate;

use robo_analytics::models::{RawTradeRecord, TradeRecord};

/// Parse a `YYYY-MM-DD` literal into a date.
pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// Build a parsed record from a date literal, hour, result, and strategy.
pub fn rec(date: &str, hour: u32, result: f64, strategy: Option<&str>) -> TradeRecord {
    TradeRecord {
        date: day(date),
        hour,
        result,
        strategy: strategy.map(str::to_string),
    }
}

/// Build a wire record as the store would deliver it.
pub fn raw(date: &str, time: &str, result: f64, strategy: Option<&str>) -> RawTradeRecord {
    RawTradeRecord {
        date: date.to_string(),
        time: time.to_string(),
        result,
        strategy: strategy.map(str::to_string),
    }
}
