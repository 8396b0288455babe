use anyhow::Result;
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use robo_analytics::analytics::{
    compute_correlations, compute_series, compute_stats, compute_strategy_aggregates,
    optimize_strategy,
};
use robo_analytics::config::Config;
use robo_analytics::filter::{FilterEngine, StrategyAllowlist};
use robo_analytics::models::FilterSpec;
use robo_analytics::report;
use robo_analytics::store::{fetch_all_trade_records, RemoteStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let mut store = RemoteStore::new(&cfg);
    let records = fetch_all_trade_records(&mut store, &cfg.user_id, cfg.page_size).await?;

    let allowlist = StrategyAllowlist::from_names(&cfg.strategy_allowlist);
    let engine = FilterEngine::new(allowlist);

    let filtered = engine.apply(&records, &FilterSpec::default());

    let mut universe: BTreeMap<&str, usize> = BTreeMap::new();
    for r in &filtered {
        *universe.entry(r.strategy_label()).or_default() += 1;
    }
    info!("Strategy universe:");
    for (label, count) in &universe {
        info!("  {}: {} operations", label, count);
    }

    let stats = compute_stats(&filtered);
    let series = compute_series(&filtered);
    let strategies = compute_strategy_aggregates(&filtered);

    // The optimizer and correlation views look at full history, ignoring
    // whatever temporal filters the dashboard currently has selected.
    let history = engine.allowlist().filter(&records);
    let optimized: Vec<_> = strategies
        .iter()
        .map(|s| optimize_strategy(&history, &s.strategy))
        .collect();
    let correlations = compute_correlations(&strategies, &history);

    report::print_summary(&stats, &series, &strategies, &optimized, &correlations);

    Ok(())
}
