use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::aggregate::BucketAggregate;
use crate::models::{FilterSpec, TradeRecord};

const HIGH_CONFIDENCE_SAMPLE: usize = 500;
const MEDIUM_CONFIDENCE_SAMPLE: usize = 100;

/// Coarse reliability tier for an optimizer run, from sample size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn from_sample(n: usize) -> Self {
        if n > HIGH_CONFIDENCE_SAMPLE {
            Confidence::High
        } else if n > MEDIUM_CONFIDENCE_SAMPLE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        write!(f, "{}", s)
    }
}

/// One recommended bucket value (an hour, weekday, or month) with the
/// history that earned it a place in the recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedBucket {
    pub value: u32,
    pub sum_result: f64,
    pub win_rate: f64,
    pub operation_count: usize,
}

/// The historically best hours/weekdays/months for one strategy.
///
/// `estimated_result` sums three overlapping views of the same trades, so
/// it reads as a potential-upside indicator, not a forecast.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedConfig {
    pub strategy: String,
    pub best_hours: Vec<OptimizedBucket>,
    pub best_weekdays: Vec<OptimizedBucket>,
    pub best_months: Vec<OptimizedBucket>,
    pub confidence: Confidence,
    pub estimated_result: f64,
}

impl OptimizedConfig {
    /// Whether any axis produced a recommendation at all.
    pub fn has_recommendation(&self) -> bool {
        !self.best_hours.is_empty()
            || !self.best_weekdays.is_empty()
            || !self.best_months.is_empty()
    }

    /// Re-express the recommendation as selector values for the filter
    /// engine, scoped to this one strategy.
    pub fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec {
            strategies: [self.strategy.clone()].into_iter().collect(),
            hours: self.best_hours.iter().map(|b| b.value).collect(),
            weekdays: self.best_weekdays.iter().map(|b| b.value).collect(),
            months: self.best_months.iter().map(|b| b.value).collect(),
            ..FilterSpec::default()
        }
    }

    fn with_estimate(mut self) -> Self {
        // Three overlapping partitions of the same records, summed on purpose.
        self.estimated_result = self
            .best_hours
            .iter()
            .chain(&self.best_weekdays)
            .chain(&self.best_months)
            .map(|b| b.sum_result)
            .sum();
        self
    }
}

/// Search one strategy's full history for the hour/weekday/month subsets
/// that produced a net-positive outcome.
///
/// The input must be allowlist-filtered but never temporally filtered: the
/// optimizer looks at all history regardless of the dashboard's current
/// filter selection.
pub fn optimize_strategy(records: &[TradeRecord], strategy_id: &str) -> OptimizedConfig {
    let key = strategy_id.trim().to_lowercase();

    let mut hours: [BucketAggregate; 24] = std::array::from_fn(|_| BucketAggregate::default());
    let mut weekdays: [BucketAggregate; 7] = std::array::from_fn(|_| BucketAggregate::default());
    let mut months: [BucketAggregate; 12] = std::array::from_fn(|_| BucketAggregate::default());
    let mut sample = 0usize;

    for r in records {
        if r.strategy_key().as_deref() != Some(key.as_str()) {
            continue;
        }
        sample += 1;
        hours[r.hour as usize].add(r.result);
        weekdays[r.weekday() as usize].add(r.result);
        months[r.month0() as usize].add(r.result);
    }

    OptimizedConfig {
        strategy: key,
        best_hours: retain_profitable(&hours),
        best_weekdays: retain_profitable(&weekdays),
        best_months: retain_profitable(&months),
        confidence: Confidence::from_sample(sample),
        estimated_result: 0.0,
    }
    .with_estimate()
}

/// Keep only buckets with a net-positive historical outcome, ranked by it.
fn retain_profitable(buckets: &[BucketAggregate]) -> Vec<OptimizedBucket> {
    let mut out: Vec<OptimizedBucket> = buckets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.sum_result > 0.0)
        .map(|(value, b)| OptimizedBucket {
            value: value as u32,
            sum_result: b.sum_result,
            win_rate: b.win_rate(),
            operation_count: b.count,
        })
        .collect();
    out.sort_by(|a, b| b.sum_result.partial_cmp(&a.sum_result).unwrap());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_records, rec};

    #[test]
    fn only_profitable_buckets_survive() {
        let records = make_records(&[
            ("2024-01-01", 9, 10.0, "zeus"),
            ("2024-01-01", 14, -10.0, "zeus"),
            ("2024-01-02", 16, 5.0, "zeus"),
            ("2024-01-02", 16, -5.0, "zeus"), // nets to zero, excluded
        ]);
        let config = optimize_strategy(&records, "zeus");
        let hours: Vec<u32> = config.best_hours.iter().map(|b| b.value).collect();
        assert_eq!(hours, vec![9]);
        for b in config
            .best_hours
            .iter()
            .chain(&config.best_weekdays)
            .chain(&config.best_months)
        {
            assert!(b.sum_result > 0.0);
        }
    }

    #[test]
    fn buckets_ranked_descending_by_sum() {
        let records = make_records(&[
            ("2024-01-01", 9, 10.0, "zeus"),
            ("2024-01-01", 14, 40.0, "zeus"),
            ("2024-01-01", 20, 25.0, "zeus"),
        ]);
        let config = optimize_strategy(&records, "zeus");
        let hours: Vec<u32> = config.best_hours.iter().map(|b| b.value).collect();
        assert_eq!(hours, vec![14, 20, 9]);
    }

    #[test]
    fn estimate_sums_all_three_families() {
        // One record: +10 lands in one hour, one weekday, one month bucket
        let records = make_records(&[("2024-01-01", 9, 10.0, "zeus")]);
        let config = optimize_strategy(&records, "zeus");
        assert!((config.estimated_result - 30.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_tiers_from_sample_size() {
        let mut records = Vec::new();
        for i in 0..600 {
            records.push(rec("2024-01-01", (i % 24) as u32, 1.0, Some("zeus")));
        }
        assert_eq!(
            optimize_strategy(&records, "zeus").confidence,
            Confidence::High
        );
        assert_eq!(
            optimize_strategy(&records[..200], "zeus").confidence,
            Confidence::Medium
        );
        assert_eq!(
            optimize_strategy(&records[..100], "zeus").confidence,
            Confidence::Low
        );
    }

    #[test]
    fn other_strategies_are_ignored() {
        let records = make_records(&[
            ("2024-01-01", 9, 10.0, "zeus"),
            ("2024-01-01", 9, -500.0, "apollo"),
        ]);
        let config = optimize_strategy(&records, "zeus");
        assert_eq!(config.best_hours.len(), 1);
        assert!((config.best_hours[0].sum_result - 10.0).abs() < 1e-9);
    }

    #[test]
    fn strategy_match_is_case_insensitive() {
        let records = make_records(&[("2024-01-01", 9, 10.0, "Zeus")]);
        let config = optimize_strategy(&records, "  ZEUS ");
        assert_eq!(config.strategy, "zeus");
        assert!(config.has_recommendation());
    }

    #[test]
    fn unknown_strategy_yields_empty_config() {
        let records = make_records(&[("2024-01-01", 9, 10.0, "zeus")]);
        let config = optimize_strategy(&records, "hermes");
        assert!(!config.has_recommendation());
        assert_eq!(config.estimated_result, 0.0);
        assert_eq!(config.confidence, Confidence::Low);
    }

    #[test]
    fn filter_spec_round_trip_carries_selected_values() {
        let records = make_records(&[
            ("2024-01-01", 9, 10.0, "zeus"),  // Monday, January
            ("2024-01-02", 14, -3.0, "zeus"), // Tuesday loss
        ]);
        let spec = optimize_strategy(&records, "zeus").to_filter_spec();
        assert!(spec.strategies.contains("zeus"));
        assert!(spec.hours.contains(&9));
        assert!(!spec.hours.contains(&14));
        assert!(spec.weekdays.contains(&1));
        assert!(spec.months.contains(&0));
    }
}
