use crate::analytics::{
    CorrelationPair, OptimizedConfig, ScalarStats, SeriesBundle, StrategyAggregate,
};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn print_summary(
    stats: &ScalarStats,
    series: &SeriesBundle,
    strategies: &[StrategyAggregate],
    optimized: &[OptimizedConfig],
    correlations: &[CorrelationPair],
) {
    println!("\n{}", "=".repeat(70));
    println!("  PERFORMANCE REPORT");
    println!("{}", "=".repeat(70));
    println!();
    println!("  OVERALL");
    println!("  ───────────────────────────────────");
    println!("  Operations:  {}", stats.total_operations);
    println!("  Result:      ${:+.2}", stats.total_result);
    println!(
        "  Days:        {} up / {} down",
        stats.positive_days, stats.negative_days
    );
    println!("  Win Rate:    {:.1}%", stats.win_rate);
    println!("  Avg Win:     ${:+.2}", stats.average_win);
    println!("  Avg Loss:    ${:.2}", stats.average_loss);
    println!("  Payoff:      {:.2}", stats.payoff);
    println!("  Best:        ${:+.2}", stats.best_result);
    println!("  Worst:       ${:+.2}", stats.worst_result);
    println!(
        "  Streaks:     {} up / {} down",
        stats.positive_streak, stats.negative_streak
    );
    println!("  Volatility:  {:.1}%", stats.volatility);
    println!(
        "  Months:      {} up / {} down | consistency {:.1}% | avg ${:+.2}",
        stats.positive_months,
        stats.negative_months,
        stats.monthly_consistency,
        stats.average_monthly_result
    );

    if !series.monthly.is_empty() {
        println!();
        println!("  BY MONTH");
        println!("  ───────────────────────────────────");
        for (month, bucket) in &series.monthly {
            println!(
                "  {}: {:>3} days | WR {:>3.0}% | ${:+.2}",
                month,
                bucket.count,
                bucket.win_rate() * 100.0,
                bucket.sum_result
            );
        }
    }

    if !strategies.is_empty() {
        println!();
        println!("  BY STRATEGY");
        println!("  ───────────────────────────────────");
        for s in strategies {
            println!(
                "  {:>12}: {} ops | WR {:.0}% | Payoff {:.2} | MaxDD ${:.2} | ${:+.2}",
                s.strategy, s.operations, s.win_rate, s.payoff, s.max_drawdown, s.total_result
            );
        }
    }

    for config in optimized {
        if !config.has_recommendation() {
            continue;
        }
        println!();
        println!("  OPTIMIZER — {}", config.strategy);
        println!("  ───────────────────────────────────");
        if !config.best_hours.is_empty() {
            let hours: Vec<String> = config
                .best_hours
                .iter()
                .map(|b| format!("{:02}h (${:+.2})", b.value, b.sum_result))
                .collect();
            println!("  Hours:      {}", hours.join(", "));
        }
        if !config.best_weekdays.is_empty() {
            let days: Vec<String> = config
                .best_weekdays
                .iter()
                .map(|b| format!("{} (${:+.2})", WEEKDAY_NAMES[b.value as usize], b.sum_result))
                .collect();
            println!("  Weekdays:   {}", days.join(", "));
        }
        if !config.best_months.is_empty() {
            let months: Vec<String> = config
                .best_months
                .iter()
                .map(|b| format!("{} (${:+.2})", MONTH_NAMES[b.value as usize], b.sum_result))
                .collect();
            println!("  Months:     {}", months.join(", "));
        }
        println!("  Confidence: {}", config.confidence);
        // Overlapping sum across the three views, an upside indicator only
        println!("  Potential:  ${:+.2}", config.estimated_result);
    }

    if !correlations.is_empty() {
        println!();
        println!("  DIVERSIFICATION");
        println!("  ───────────────────────────────────");
        for pair in correlations {
            println!(
                "  {} + {}: {:.0}% ({} of {} shared days) — {}",
                pair.strategy_a,
                pair.strategy_b,
                pair.diversification_score,
                pair.opposite_days,
                pair.shared_days,
                pair.complementarity
            );
        }
    }

    println!("{}", "=".repeat(70));
}
