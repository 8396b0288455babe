use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

use crate::models::{FilterSpec, TradeRecord};

/// Recognized production strategy identifiers, matched case-insensitively.
///
/// The backing store mixes experimental and production strategies; only
/// names on this list reach analytics. An empty list deactivates the
/// filter entirely.
#[derive(Debug, Clone, Default)]
pub struct StrategyAllowlist {
    names: HashSet<String>,
}

impl StrategyAllowlist {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn is_active(&self) -> bool {
        !self.names.is_empty()
    }

    /// Whether a record survives the allowlist pass. When the list is
    /// active, untagged records are dropped along with unrecognized names.
    pub fn allows(&self, record: &TradeRecord) -> bool {
        if !self.is_active() {
            return true;
        }
        match record.strategy_key() {
            Some(key) => self.names.contains(&key),
            None => false,
        }
    }

    pub fn filter(&self, records: &[TradeRecord]) -> Vec<TradeRecord> {
        records.iter().filter(|r| self.allows(r)).cloned().collect()
    }
}

/// Applies an allowlist pass followed by the temporal filter axes:
/// date range, strategy membership, hour, weekday, month.
pub struct FilterEngine {
    allowlist: StrategyAllowlist,
}

impl FilterEngine {
    pub fn new(allowlist: StrategyAllowlist) -> Self {
        Self { allowlist }
    }

    pub fn allowlist(&self) -> &StrategyAllowlist {
        &self.allowlist
    }

    /// Filter against the current local calendar date.
    pub fn apply(&self, records: &[TradeRecord], spec: &FilterSpec) -> Vec<TradeRecord> {
        self.apply_at(records, spec, Local::now().date_naive())
    }

    /// Filter with an explicit `today`, so date presets are deterministic.
    pub fn apply_at(
        &self,
        records: &[TradeRecord],
        spec: &FilterSpec,
        today: NaiveDate,
    ) -> Vec<TradeRecord> {
        // Selected names arrive from the presentation layer unnormalized.
        let strategies: HashSet<String> = spec
            .strategies
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let filtered: Vec<TradeRecord> = records
            .iter()
            .filter(|r| self.allowlist.allows(r))
            .filter(|r| spec.date_range.contains(r.date, today))
            .filter(|r| {
                strategies.is_empty()
                    || r.strategy_key()
                        .map(|key| strategies.contains(&key))
                        .unwrap_or(false)
            })
            .filter(|r| spec.hours.is_empty() || spec.hours.contains(&r.hour))
            .filter(|r| spec.weekdays.is_empty() || spec.weekdays.contains(&r.weekday()))
            .filter(|r| spec.months.is_empty() || spec.months.contains(&r.month0()))
            .cloned()
            .collect();

        debug!(
            "Filter pass: {} of {} records kept",
            filtered.len(),
            records.len()
        );

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use crate::test_helpers::{day, rec};

    fn engine(names: &[&str]) -> FilterEngine {
        FilterEngine::new(StrategyAllowlist::from_names(names.iter().copied()))
    }

    #[test]
    fn inactive_allowlist_passes_untagged_records() {
        let records = vec![rec("2024-01-01", 10, 5.0, None)];
        let out = engine(&[]).apply_at(&records, &FilterSpec::default(), day("2024-01-02"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn active_allowlist_drops_untagged_and_unknown() {
        let records = vec![
            rec("2024-01-01", 10, 5.0, Some("zeus")),
            rec("2024-01-01", 11, 5.0, Some("experimental-x")),
            rec("2024-01-01", 12, 5.0, None),
        ];
        let out = engine(&["zeus"]).apply_at(&records, &FilterSpec::default(), day("2024-01-02"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].strategy.as_deref(), Some("zeus"));
    }

    #[test]
    fn allowlist_match_is_case_insensitive() {
        let records = vec![rec("2024-01-01", 10, 5.0, Some("  ZEUS "))];
        let out =
            engine(&["Zeus"]).apply_at(&records, &FilterSpec::default(), day("2024-01-02"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn axes_are_conjunctive() {
        let records = vec![
            rec("2024-01-01", 10, 5.0, Some("zeus")), // Monday, Jan
            rec("2024-01-01", 15, 5.0, Some("zeus")), // wrong hour
            rec("2024-02-05", 10, 5.0, Some("zeus")), // wrong month
        ];
        let spec = FilterSpec {
            hours: [10].into_iter().collect(),
            months: [0].into_iter().collect(),
            ..FilterSpec::default()
        };
        let out = engine(&[]).apply_at(&records, &spec, day("2024-03-01"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].hour, 10);
    }

    #[test]
    fn multi_select_axis_is_disjunctive() {
        let records = vec![
            rec("2024-01-01", 9, 1.0, None),
            rec("2024-01-01", 14, 1.0, None),
            rec("2024-01-01", 20, 1.0, None),
        ];
        let spec = FilterSpec {
            hours: [9, 20].into_iter().collect(),
            ..FilterSpec::default()
        };
        let out = engine(&[]).apply_at(&records, &spec, day("2024-01-02"));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn weekday_axis_uses_sunday_zero() {
        // 2024-01-07 Sunday, 2024-01-08 Monday
        let records = vec![
            rec("2024-01-07", 10, 1.0, None),
            rec("2024-01-08", 10, 1.0, None),
        ];
        let spec = FilterSpec {
            weekdays: [0].into_iter().collect(),
            ..FilterSpec::default()
        };
        let out = engine(&[]).apply_at(&records, &spec, day("2024-01-09"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, day("2024-01-07"));
    }

    #[test]
    fn strategy_selection_normalizes_names() {
        let records = vec![
            rec("2024-01-01", 10, 1.0, Some("zeus")),
            rec("2024-01-01", 10, 1.0, Some("apollo")),
        ];
        let spec = FilterSpec {
            strategies: ["  Zeus  ".to_string()].into_iter().collect(),
            ..FilterSpec::default()
        };
        let out = engine(&[]).apply_at(&records, &spec, day("2024-01-02"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].strategy.as_deref(), Some("zeus"));
    }

    #[test]
    fn date_range_applies_before_other_axes() {
        let records = vec![
            rec("2024-06-15", 10, 1.0, None),
            rec("2024-06-01", 10, 1.0, None),
        ];
        let spec = FilterSpec::for_date_range(DateRange::Last7Days);
        let out = engine(&[]).apply_at(&records, &spec, day("2024-06-15"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, day("2024-06-15"));
    }
}
