use serde::Serialize;
use std::collections::HashMap;

use crate::analytics::aggregate::{compute_stats, ScalarStats};
use crate::models::TradeRecord;

/// Performance scalars for a single strategy, derived only from its own
/// records. Untagged records never reach a strategy aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: String,
    pub operations: usize,
    pub total_result: f64,
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub payoff: f64,
    pub max_drawdown: f64,
}

impl StrategyAggregate {
    fn from_records(strategy: String, records: &[TradeRecord]) -> Self {
        let stats: ScalarStats = compute_stats(records);
        Self {
            strategy,
            operations: stats.total_operations,
            total_result: stats.total_result,
            win_rate: stats.win_rate,
            average_win: stats.average_win,
            average_loss: stats.average_loss,
            payoff: stats.payoff,
            max_drawdown: max_drawdown(records.iter().map(|r| r.result)),
        }
    }
}

/// Peak-to-trough decline of the running result total, walked in the
/// records' given order. The peak starts at zero.
pub fn max_drawdown(results: impl Iterator<Item = f64>) -> f64 {
    let mut running = 0.0f64;
    let mut peak = 0.0f64;
    let mut worst = 0.0f64;
    for result in results {
        running += result;
        if running > peak {
            peak = running;
        }
        let drawdown = peak - running;
        if drawdown > worst {
            worst = drawdown;
        }
    }
    worst
}

/// Group records by normalized strategy and rank descending by total result.
pub fn compute_strategy_aggregates(records: &[TradeRecord]) -> Vec<StrategyAggregate> {
    let mut groups: HashMap<String, Vec<TradeRecord>> = HashMap::new();
    for r in records {
        if let Some(key) = r.strategy_key() {
            groups.entry(key).or_default().push(r.clone());
        }
    }

    let mut aggregates: Vec<StrategyAggregate> = groups
        .into_iter()
        .map(|(strategy, records)| StrategyAggregate::from_records(strategy, &records))
        .collect();

    aggregates.sort_by(|a, b| b.total_result.partial_cmp(&a.total_result).unwrap());
    aggregates
}
