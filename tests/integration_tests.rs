use approx::assert_relative_eq;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use trade_digitisation_engine::core::params::InputParameters;
use trade_digitisation_engine::engine::calculation::CalculationEngine;
use trade_digitisation_engine::prelude::*;
use trade_digitisation_engine::report::format::round_decimal;
use trade_digitisation_engine::simulation::sensitivity::sensitivity_sweep;

/// Full pipeline: stored snapshot → session → edit → metrics → report.
#[test]
fn full_pipeline_through_file_store() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = SimulatorSession::open(
        JsonFileStore::new(dir.path()),
        DEFAULT_SNAPSHOT_KEY,
        InputParameters::default(),
    );
    assert_eq!(session.params(), &InputParameters::default());
    assert!(session.last_saved().is_none());

    let metrics = session.set("termExtension", 45.0).unwrap();
    assert_eq!(metrics.early_payment.days_accelerated, 98.0);
    assert!(session.last_saved().is_some());

    let metrics = session.set_text("apHeadcount", "20").unwrap();
    assert_eq!(metrics.efficiency.ap_fte_saved, 8.0);
    assert_eq!(metrics.efficiency.ap_savings, 400_000.0);

    // A fresh session over the same directory restores both edits.
    let reopened = SimulatorSession::open(
        JsonFileStore::new(dir.path()),
        DEFAULT_SNAPSHOT_KEY,
        InputParameters::default(),
    );
    assert_eq!(reopened.params().term_extension, 45.0);
    assert_eq!(reopened.params().ap_headcount, 20.0);
    assert_eq!(reopened.metrics(), metrics);

    let params = reopened.params().clone();
    let report = ImpactReport::new(&params, &metrics).to_string();
    assert!(report.contains("Days accelerated:           98"));
    assert!(report.contains("AP annual savings:          $400K"));
}

#[test]
fn baseline_scenario() {
    let p = InputParameters::default();
    assert_eq!(p.annual_volume_mm, 200.0);
    assert_eq!(p.digitisation_pct, 100.0);

    let m = compute_metrics(&p);
    assert_eq!(m.volume.digitised_volume, 200_000_000.0);
    assert_eq!(m.early_payment.days_accelerated, 83.0);
    assert_eq!(m.early_payment.participating_spend, 130_000_000.0);
    assert_relative_eq!(m.early_payment.discount_value, 4_550_000.0, max_relative = 1e-12);
}

#[test]
fn headcount_savings_scenario() {
    let p = InputParameters {
        ap_headcount: 15.0,
        ap_efficiency_pct: 40.0,
        ap_cost_per_fte: 50_000.0,
        ..Default::default()
    };
    let m = compute_metrics(&p);
    assert_eq!(m.efficiency.ap_fte_saved, 6.0);
    assert_eq!(m.efficiency.ap_savings, 300_000.0);
}

#[test]
fn zero_uptake_scenario() {
    let p = InputParameters::default()
        .with_value("supplierUptakePct", 0.0)
        .unwrap();
    let e = compute_metrics(&p).early_payment;
    assert_eq!(e.participating_spend, 0.0);
    assert_eq!(e.discount_value, 0.0);
    assert_eq!(e.bank_funding_cost, 0.0);
    assert_eq!(e.internal_funding_cost, 0.0);
    assert_eq!(e.net_discount_benefit, 0.0);
    assert_eq!(compute_metrics(&p).working_capital.wc_used_for_early_pay, 0.0);
}

#[test]
fn late_payment_makes_funding_costs_negative() {
    let p = InputParameters {
        current_payment_terms: 30.0,
        term_extension: 0.0,
        days_to_payment: 45.0,
        ..Default::default()
    };
    let e = compute_metrics(&p).early_payment;
    assert_eq!(e.days_accelerated, -15.0);
    assert!(e.bank_funding_cost < 0.0);
    assert!(e.internal_funding_cost < 0.0);
    assert!(e.net_discount_benefit > e.discount_value);
}

#[test]
fn compute_is_bit_for_bit_deterministic() {
    let p = InputParameters {
        scf_rate: 7.123456789,
        annual_volume_mm: 1234.5678,
        ..Default::default()
    };
    let a = CalculationEngine::compute(&p);
    let b = CalculationEngine::compute(&p);
    assert_eq!(a.total_pl_benefit.to_bits(), b.total_pl_benefit.to_bits());
    assert_eq!(a, b);
}

#[test]
fn empty_record_decodes_to_defaults() {
    let defaults = InputParameters::default().with_currency_symbol("£");
    let decoded = decode_snapshot(&SnapshotRecord::new(), &defaults);
    assert_eq!(decoded, defaults);
}

#[test]
fn snapshot_round_trip_preserves_edits() {
    let defaults = InputParameters::default();
    let edited = defaults
        .with_value("scfRate", 5.25)
        .unwrap()
        .with_value("netDebt", -12_500_000.0)
        .unwrap()
        .with_currency_symbol("€");

    let record = encode_snapshot(&edited);
    assert_eq!(record.get("scfRate"), Some(&json!(5.25)));
    assert_eq!(record.get("currencySymbol"), Some(&json!("€")));
    assert_eq!(decode_snapshot(&record, &defaults), edited);
}

#[test]
fn corrupt_stored_snapshot_opens_with_defaults() {
    let store = MemoryStore::new().with_entry(DEFAULT_SNAPSHOT_KEY, "{ not json");
    let session = SimulatorSession::open(store, DEFAULT_SNAPSHOT_KEY, InputParameters::default());
    assert_eq!(session.params(), &InputParameters::default());
}

#[test]
fn partially_typed_snapshot_keeps_good_fields() {
    let text = json!({
        "termExtension": 60,
        "scfRate": "cheap",
        "apHeadcount": null,
        "unknownField": 1
    })
    .to_string();
    let store = MemoryStore::new().with_entry("custom", text);
    let session = SimulatorSession::open(store, "custom", InputParameters::default());

    let defaults = InputParameters::default();
    assert_eq!(session.params().term_extension, 60.0);
    assert_eq!(session.params().scf_rate, defaults.scf_rate);
    assert_eq!(session.params().ap_headcount, defaults.ap_headcount);
}

#[test]
fn zero_turnover_zeroes_turnover_ratios() {
    let p = InputParameters {
        turnover: 0.0,
        ..Default::default()
    };
    let r = compute_metrics(&p).ratios;
    assert_eq!(r.ebitda_margin, Restated::new(0.0, 0.0));
    assert_eq!(r.operating_margin, Restated::new(0.0, 0.0));
    assert_eq!(r.fcf_sales, Restated::new(0.0, 0.0));
}

#[test]
fn adjusted_leverage_zero_when_adjusted_ebitda_is_zero() {
    // No uplift of any kind, so adjusted EBITDA stays at the historic 0.
    let p = InputParameters {
        ebitda: 0.0,
        supplier_uptake_pct: 0.0,
        ap_headcount: 0.0,
        customs_filings: 0.0,
        shipments_with_fees: 0.0,
        trade_compliance_headcount: 0.0,
        ..Default::default()
    };
    let m = compute_metrics(&p);
    assert_eq!(m.restatement.ebitda.adjusted, 0.0);
    assert_eq!(m.ratios.leverage, Restated::new(0.0, 0.0));
    assert_eq!(m.ratios.interest_cover.adjusted, 0.0);
}

#[test]
fn garbage_text_edits_coerce_to_zero() {
    let mut session = SimulatorSession::open(
        MemoryStore::new(),
        DEFAULT_SNAPSHOT_KEY,
        InputParameters::default(),
    );
    let m = session.set_text("supplierUptakePct", "sixty").unwrap();
    assert_eq!(session.params().supplier_uptake_pct, 0.0);
    assert_eq!(m.early_payment.net_discount_benefit, 0.0);
    assert!(session.set("noSuchField", 1.0).is_err());
}

#[test]
fn metrics_serialize_to_json() {
    let m = compute_metrics(&InputParameters::default());
    let value: Value = serde_json::to_value(m).unwrap();
    assert_eq!(value["volume"]["digitisedVolume"], json!(200_000_000.0));
    assert_eq!(value["earlyPayment"]["daysAccelerated"], json!(83.0));
    assert!(value["ratios"]["leverage"]["adjusted"].is_number());
}

#[test]
fn display_rounding_matches_headline_figures() {
    let m = compute_metrics(&InputParameters::default());
    assert_eq!(round_decimal(m.working_capital.wc_annual_value, 2), Some(dec!(276821.92)));
    assert_eq!(round_decimal(m.efficiency.total_operational_savings, 0), Some(dec!(1348000)));
}

#[test]
fn sweep_over_discount_rate_is_linear_in_discount_value() {
    let points = sensitivity_sweep(
        &InputParameters::default(),
        "earlyPaymentDiscount",
        0.0,
        10.0,
        5,
    )
    .unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0].metrics.early_payment.discount_value, 0.0);
    assert_relative_eq!(
        points[5].metrics.early_payment.discount_value,
        13_000_000.0,
        max_relative = 1e-12
    );
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    let err = store.save("../escape", "{}").unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidKey(_)));
}

#[test]
fn huge_volume_is_treated_as_zero_and_reports_cleanly() {
    let p = InputParameters {
        annual_volume_mm: 1e303,
        ..Default::default()
    };
    let m = compute_metrics(&p);
    assert!(m.total_pl_benefit.is_finite());
    assert!(m.working_capital.net_working_capital.is_finite());
    assert!(m.ratios.leverage.adjusted.is_finite());
    assert_eq!(m.volume.digitised_volume, 0.0);
    assert_eq!(p.range_warnings()[0].key, "annualVolumeMM");

    let report = ImpactReport::new(&p, &m).to_string();
    assert!(report.contains("Digitised volume:          $0"));
    assert!(!report.contains("n/a"));
}

#[test]
fn typed_text_keeps_its_leading_number() {
    let mut session = SimulatorSession::open(
        MemoryStore::new(),
        DEFAULT_SNAPSHOT_KEY,
        InputParameters::default(),
    );
    session.set_text("supplierUptakePct", "45%").unwrap();
    session.set_text("customsFilings", "1,200").unwrap();
    assert_eq!(session.params().supplier_uptake_pct, 45.0);
    assert_eq!(session.params().customs_filings, 1.0);
}
