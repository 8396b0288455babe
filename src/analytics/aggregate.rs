use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::TradeRecord;

/// Per-date result sums, chronologically ordered. Day-level sign (not the
/// individual trades) decides whether a date counts as positive or negative.
pub fn daily_sums(records: &[TradeRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *daily.entry(r.date).or_insert(0.0) += r.result;
    }
    daily
}

/// Accumulator shared by the month/year/hour/weekday bucket families.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketAggregate {
    pub count: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub sum_result: f64,
}

impl BucketAggregate {
    pub fn add(&mut self, result: f64) {
        self.count += 1;
        if result > 0.0 {
            self.positive_count += 1;
        } else if result < 0.0 {
            self.negative_count += 1;
        }
        self.sum_result += result;
    }

    /// Share of positive entries, 0..1. Zero when the bucket is empty.
    pub fn win_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.positive_count as f64 / self.count as f64
    }

    pub fn average_result(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_result / self.count as f64
    }
}

/// Overall performance scalars for one filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarStats {
    pub total_operations: usize,
    pub total_result: f64,
    pub positive_days: usize,
    pub negative_days: usize,
    /// Day-level win rate in percent: positive / (positive + negative).
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub payoff: f64,
    pub best_result: f64,
    pub worst_result: f64,
    pub positive_months: usize,
    pub negative_months: usize,
    pub monthly_consistency: f64,
    pub average_monthly_result: f64,
    pub average_daily_result: f64,
    /// Population standard deviation of the daily sums.
    pub standard_deviation: f64,
    pub volatility: f64,
    pub positive_streak: usize,
    pub negative_streak: usize,
}

pub fn compute_stats(records: &[TradeRecord]) -> ScalarStats {
    if records.is_empty() {
        return ScalarStats::default();
    }

    let daily = daily_sums(records);

    let positive_days = daily.values().filter(|&&s| s > 0.0).count();
    let negative_days = daily.values().filter(|&&s| s < 0.0).count();
    let classified = positive_days + negative_days;
    let win_rate = if classified > 0 {
        positive_days as f64 / classified as f64 * 100.0
    } else {
        0.0
    };

    let wins: Vec<f64> = records
        .iter()
        .filter(|r| r.result > 0.0)
        .map(|r| r.result)
        .collect();
    let losses: Vec<f64> = records
        .iter()
        .filter(|r| r.result < 0.0)
        .map(|r| r.result)
        .collect();

    let average_win = if wins.is_empty() {
        0.0
    } else {
        wins.iter().sum::<f64>() / wins.len() as f64
    };
    let average_loss = if losses.is_empty() {
        0.0
    } else {
        (losses.iter().sum::<f64>() / losses.len() as f64).abs()
    };
    let payoff = if average_loss > 0.0 {
        average_win / average_loss
    } else {
        0.0
    };

    let best_result = records
        .iter()
        .map(|r| r.result)
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_result = records
        .iter()
        .map(|r| r.result)
        .fold(f64::INFINITY, f64::min);

    // Monthly sums keyed by (year, month)
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, sum) in &daily {
        *monthly.entry((date.year(), date.month())).or_insert(0.0) += sum;
    }
    let positive_months = monthly.values().filter(|&&s| s > 0.0).count();
    let negative_months = monthly.values().filter(|&&s| s < 0.0).count();
    let monthly_consistency = if monthly.is_empty() {
        0.0
    } else {
        positive_months as f64 / monthly.len() as f64 * 100.0
    };
    let average_monthly_result = if monthly.is_empty() {
        0.0
    } else {
        monthly.values().sum::<f64>() / monthly.len() as f64
    };

    let day_count = daily.len() as f64;
    let average_daily_result = daily.values().sum::<f64>() / day_count;
    let variance = daily
        .values()
        .map(|s| (s - average_daily_result).powi(2))
        .sum::<f64>()
        / day_count;
    let standard_deviation = variance.sqrt();
    let volatility = if average_daily_result == 0.0 {
        0.0
    } else {
        standard_deviation / average_daily_result.abs() * 100.0
    };

    let (positive_streak, negative_streak) = streaks(&daily);

    ScalarStats {
        total_operations: records.len(),
        total_result: records.iter().map(|r| r.result).sum(),
        positive_days,
        negative_days,
        win_rate,
        average_win,
        average_loss,
        payoff,
        best_result,
        worst_result,
        positive_months,
        negative_months,
        monthly_consistency,
        average_monthly_result,
        average_daily_result,
        standard_deviation,
        volatility,
        positive_streak,
        negative_streak,
    }
}

/// Longest same-sign runs over chronologically ordered daily sums.
/// A zero-sum day resets both running counters without extending either.
fn streaks(daily: &BTreeMap<NaiveDate, f64>) -> (usize, usize) {
    let mut best_positive = 0usize;
    let mut best_negative = 0usize;
    let mut run_positive = 0usize;
    let mut run_negative = 0usize;

    for &sum in daily.values() {
        if sum > 0.0 {
            run_positive += 1;
            run_negative = 0;
        } else if sum < 0.0 {
            run_negative += 1;
            run_positive = 0;
        } else {
            run_positive = 0;
            run_negative = 0;
        }
        best_positive = best_positive.max(run_positive);
        best_negative = best_negative.max(run_negative);
    }

    (best_positive, best_negative)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub cumulative: f64,
}

/// Chart-ready series for one filtered record set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesBundle {
    pub performance_curve: Vec<CurvePoint>,
    pub monthly: BTreeMap<String, BucketAggregate>,
    pub yearly: BTreeMap<String, BucketAggregate>,
    pub hourly: BTreeMap<u32, BucketAggregate>,
}

pub fn compute_series(records: &[TradeRecord]) -> SeriesBundle {
    let daily = daily_sums(records);

    let mut cumulative = 0.0;
    let performance_curve = daily
        .iter()
        .map(|(&date, &sum)| {
            cumulative += sum;
            CurvePoint { date, cumulative }
        })
        .collect();

    // Month and year buckets roll up daily aggregates, so their counts are
    // trading days and their win rates match the day-level overall rate.
    let mut monthly: BTreeMap<String, BucketAggregate> = BTreeMap::new();
    let mut yearly: BTreeMap<String, BucketAggregate> = BTreeMap::new();
    for (date, &sum) in &daily {
        monthly
            .entry(format!("{:04}-{:02}", date.year(), date.month()))
            .or_default()
            .add(sum);
        yearly
            .entry(format!("{:04}", date.year()))
            .or_default()
            .add(sum);
    }

    let mut hourly: BTreeMap<u32, BucketAggregate> = BTreeMap::new();
    for r in records {
        hourly.entry(r.hour).or_default().add(r.result);
    }

    SeriesBundle {
        performance_curve,
        monthly,
        yearly,
        hourly,
    }
}
