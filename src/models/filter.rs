use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Date-range presets for narrowing the record set. All comparisons are
/// plain calendar dates truncated to start of day; "last N days" windows
/// are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-30-days")]
    Last30Days,
    CurrentMonth,
    CurrentYear,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Resolve the preset into inclusive bounds relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            DateRange::All => (None, None),
            DateRange::Today => (Some(today), Some(today)),
            DateRange::Last7Days => (today.checked_sub_days(Days::new(7)), Some(today)),
            DateRange::Last30Days => (today.checked_sub_days(Days::new(30)), Some(today)),
            DateRange::CurrentMonth => (today.with_day(1), None),
            DateRange::CurrentYear => (NaiveDate::from_ymd_opt(today.year(), 1, 1), None),
            DateRange::Custom { start, end } => (*start, *end),
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.bounds(today);
        if let Some(s) = start {
            if date < s {
                return false;
            }
        }
        if let Some(e) = end {
            if date > e {
                return false;
            }
        }
        true
    }
}

/// Immutable description of one filter combination. Every pipeline call
/// receives the spec explicitly; there is no ambient filter state.
///
/// Axes combine conjunctively; an empty selector skips its axis, and a
/// multi-select axis matches any of its values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_range: DateRange,
    pub strategies: HashSet<String>,
    pub hours: HashSet<u32>,
    pub weekdays: HashSet<u32>,
    pub months: HashSet<u32>,
}

impl FilterSpec {
    pub fn for_date_range(date_range: DateRange) -> Self {
        Self {
            date_range,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn all_passes_everything() {
        assert!(DateRange::All.contains(d(1999, 1, 1), d(2024, 6, 15)));
    }

    #[test]
    fn today_matches_only_today() {
        let today = d(2024, 6, 15);
        assert!(DateRange::Today.contains(today, today));
        assert!(!DateRange::Today.contains(d(2024, 6, 14), today));
    }

    #[test]
    fn last_7_days_is_inclusive_on_both_ends() {
        let today = d(2024, 6, 15);
        let range = DateRange::Last7Days;
        assert!(range.contains(d(2024, 6, 8), today));
        assert!(range.contains(today, today));
        assert!(!range.contains(d(2024, 6, 7), today));
    }

    #[test]
    fn current_month_starts_at_day_one() {
        let today = d(2024, 6, 15);
        assert!(DateRange::CurrentMonth.contains(d(2024, 6, 1), today));
        assert!(!DateRange::CurrentMonth.contains(d(2024, 5, 31), today));
    }

    #[test]
    fn current_year_starts_at_january_first() {
        let today = d(2024, 6, 15);
        assert!(DateRange::CurrentYear.contains(d(2024, 1, 1), today));
        assert!(!DateRange::CurrentYear.contains(d(2023, 12, 31), today));
    }

    #[test]
    fn custom_bounds_are_independent() {
        let today = d(2024, 6, 15);
        let open_ended = DateRange::Custom {
            start: Some(d(2024, 3, 1)),
            end: None,
        };
        assert!(open_ended.contains(d(2030, 1, 1), today));
        assert!(!open_ended.contains(d(2024, 2, 29), today));

        let capped = DateRange::Custom {
            start: None,
            end: Some(d(2024, 3, 1)),
        };
        assert!(capped.contains(d(2000, 1, 1), today));
        assert!(!capped.contains(d(2024, 3, 2), today));
    }
}
