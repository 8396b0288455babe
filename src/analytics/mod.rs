pub mod aggregate;
pub mod correlation;
pub mod optimizer;
pub mod strategy;

pub use aggregate::{
    compute_series, compute_stats, daily_sums, BucketAggregate, CurvePoint, ScalarStats,
    SeriesBundle,
};
pub use correlation::{compute_correlations, Complementarity, CorrelationPair};
pub use optimizer::{optimize_strategy, Confidence, OptimizedBucket, OptimizedConfig};
pub use strategy::{compute_strategy_aggregates, max_drawdown, StrategyAggregate};
