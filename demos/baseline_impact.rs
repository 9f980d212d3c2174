//! Baseline impact example.
//!
//! Runs the engine on the default parameter set and prints the full
//! before/after report, then shows what a longer term extension adds.

use trade_digitisation_engine::prelude::*;
use trade_digitisation_engine::report::format::format_currency;

fn main() {
    println!("╔══════════════════════════════════════════════════╗");
    println!("║  trade-digitisation-engine: Baseline Impact      ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // --- Scenario 1: Defaults ---
    println!("━━━ Scenario 1: Default parameters ━━━\n");

    let params = InputParameters::default();
    let metrics = compute_metrics(&params);
    println!("{}", ImpactReport::new(&params, &metrics));

    // --- Scenario 2: Longer terms ---
    println!("━━━ Scenario 2: 60-day term extension ━━━\n");

    let extended = params
        .with_value("termExtension", 60.0)
        .unwrap_or_else(|_| params.clone());
    let extended_metrics = compute_metrics(&extended);

    let symbol = &params.currency_symbol;
    println!(
        "  Net working capital:  {} → {}",
        format_currency(metrics.working_capital.net_working_capital, symbol),
        format_currency(extended_metrics.working_capital.net_working_capital, symbol),
    );
    println!(
        "  Total P&L benefit:    {} → {}",
        format_currency(metrics.total_pl_benefit, symbol),
        format_currency(extended_metrics.total_pl_benefit, symbol),
    );
    println!(
        "  Leverage:             {:.2}x → {:.2}x",
        metrics.ratios.leverage.adjusted, extended_metrics.ratios.leverage.adjusted,
    );
}
