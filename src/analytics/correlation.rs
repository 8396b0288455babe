use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::analytics::strategy::StrategyAggregate;
use crate::models::TradeRecord;

const HIGH_THRESHOLD: f64 = 60.0;
const MODERATE_THRESHOLD: f64 = 40.0;

/// Qualitative reading of a diversification score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complementarity {
    High,
    Moderate,
    Low,
}

impl Complementarity {
    fn from_score(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            Complementarity::High
        } else if score > MODERATE_THRESHOLD {
            Complementarity::Moderate
        } else {
            Complementarity::Low
        }
    }
}

impl fmt::Display for Complementarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complementarity::High => "high complementarity",
            Complementarity::Moderate => "moderate complementarity",
            Complementarity::Low => "low complementarity",
        };
        write!(f, "{}", s)
    }
}

/// How often two strategies' daily outcomes moved in opposite directions,
/// over the days both were trading. A proxy for diversification value.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationPair {
    pub strategy_a: String,
    pub strategy_b: String,
    pub shared_days: usize,
    pub opposite_days: usize,
    pub diversification_score: f64,
    pub complementarity: Complementarity,
}

/// Score every unordered strategy pair with at least one overlapping
/// trading day, ranked descending by score.
pub fn compute_correlations(
    aggregates: &[StrategyAggregate],
    records: &[TradeRecord],
) -> Vec<CorrelationPair> {
    let mut daily_by_strategy: HashMap<String, BTreeMap<NaiveDate, f64>> = HashMap::new();
    for r in records {
        if let Some(key) = r.strategy_key() {
            *daily_by_strategy
                .entry(key)
                .or_default()
                .entry(r.date)
                .or_insert(0.0) += r.result;
        }
    }

    let mut pairs = Vec::new();
    for (i, a) in aggregates.iter().enumerate() {
        for b in &aggregates[i + 1..] {
            let (daily_a, daily_b) = match (
                daily_by_strategy.get(&a.strategy),
                daily_by_strategy.get(&b.strategy),
            ) {
                (Some(da), Some(db)) => (da, db),
                _ => continue,
            };

            let mut shared_days = 0usize;
            let mut opposite_days = 0usize;
            for (date, &sum_a) in daily_a {
                if let Some(&sum_b) = daily_b.get(date) {
                    shared_days += 1;
                    // Zero sums carry no sign and never count as opposite
                    if (sum_a > 0.0 && sum_b < 0.0) || (sum_a < 0.0 && sum_b > 0.0) {
                        opposite_days += 1;
                    }
                }
            }

            if shared_days == 0 {
                continue;
            }

            let score = opposite_days as f64 / shared_days as f64 * 100.0;
            pairs.push(CorrelationPair {
                strategy_a: a.strategy.clone(),
                strategy_b: b.strategy.clone(),
                shared_days,
                opposite_days,
                diversification_score: score,
                complementarity: Complementarity::from_score(score),
            });
        }
    }

    pairs.sort_by(|a, b| {
        b.diversification_score
            .partial_cmp(&a.diversification_score)
            .unwrap()
    });
    pairs
}
