use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label under which records without a strategy tag appear in ungrouped views.
pub const UNASSIGNED_LABEL: &str = "unassigned";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed date '{value}': {source}")]
    BadDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error("malformed time '{value}'")]
    BadTime { value: String },
}

/// A trade record as it arrives from the backing store, all strings untrusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTradeRecord {
    pub date: String,
    pub time: String,
    pub result: f64,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// One logged trade outcome. `result` is signed; zero is neither win nor loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub hour: u32,
    pub result: f64,
    pub strategy: Option<String>,
}

impl TradeRecord {
    /// Parse a wire record, rejecting malformed date/time strings outright.
    /// Silent coercion here would corrupt streak and monthly calculations
    /// downstream, so the whole batch fails instead.
    pub fn parse(raw: &RawTradeRecord) -> Result<Self, RecordError> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT).map_err(|source| {
            RecordError::BadDate {
                value: raw.date.clone(),
                source,
            }
        })?;

        let time_str = raw.time.trim();
        let time = TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time_str, fmt).ok())
            .ok_or_else(|| RecordError::BadTime {
                value: raw.time.clone(),
            })?;

        Ok(Self {
            date,
            hour: time.hour(),
            result: raw.result,
            strategy: raw.strategy.clone(),
        })
    }

    /// Normalized strategy identifier: trimmed and lower-cased.
    /// None when the record carries no usable strategy tag.
    pub fn strategy_key(&self) -> Option<String> {
        self.strategy
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Display label; untagged records fall under the shared sentinel.
    pub fn strategy_label(&self) -> &str {
        self.strategy
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNASSIGNED_LABEL)
    }

    /// Calendar weekday of the record's date, 0=Sunday..6=Saturday.
    pub fn weekday(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    /// 0-indexed month of the record's date.
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }
}
