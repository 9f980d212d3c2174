use crate::core::params::InputParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot key of the display-only currency symbol.
pub const CURRENCY_SYMBOL_KEY: &str = "currencySymbol";

/// Input section a numeric field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    Volume,
    EarlyPayment,
    ApEfficiency,
    CustomsTrade,
    HistoricFinancials,
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldGroup::Volume => "Company & trade volume",
            FieldGroup::EarlyPayment => "Early payment discounts & working capital",
            FieldGroup::ApEfficiency => "AP headcount efficiency",
            FieldGroup::CustomsTrade => "Customs & trade compliance",
            FieldGroup::HistoricFinancials => "Historic financials",
        };
        f.write_str(label)
    }
}

/// Descriptor of one numeric input field.
///
/// The table of descriptors is the single place that ties a Rust field to
/// its snapshot key and presentation range. The codec, single-field edits,
/// range checks and sensitivity sweeps all go through it.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// camelCase key used in snapshots and JSON parameter files.
    pub key: &'static str,
    pub group: FieldGroup,
    /// Inclusive `(min, max)` range offered by the presentation layer.
    /// `None` for unbounded historic financials.
    pub range: Option<(f64, f64)>,
    pub get: fn(&InputParameters) -> f64,
    pub set: fn(&mut InputParameters, f64),
}

impl FieldSpec {
    /// True when `value` lies inside the presentation range (or there is none).
    pub fn in_range(&self, value: f64) -> bool {
        match self.range {
            Some((min, max)) => value >= min && value <= max,
            None => true,
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("group", &self.group)
            .field("range", &self.range)
            .finish()
    }
}

macro_rules! numeric_field {
    ($key:literal, $field:ident, $group:ident, $range:expr) => {
        FieldSpec {
            key: $key,
            group: FieldGroup::$group,
            range: $range,
            get: |p| p.$field,
            set: |p, v| p.$field = v,
        }
    };
}

/// Every numeric field of [`InputParameters`], in presentation order.
pub static NUMERIC_FIELDS: &[FieldSpec] = &[
    numeric_field!("annualVolumeMM", annual_volume_mm, Volume, Some((0.0, 1_000_000.0))),
    numeric_field!("digitisationPct", digitisation_pct, Volume, Some((0.0, 100.0))),
    numeric_field!("currentPaymentTerms", current_payment_terms, EarlyPayment, Some((0.0, 120.0))),
    numeric_field!("termExtension", term_extension, EarlyPayment, Some((0.0, 90.0))),
    numeric_field!("supplierUptakePct", supplier_uptake_pct, EarlyPayment, Some((0.0, 100.0))),
    numeric_field!("earlyPaymentDiscount", early_payment_discount, EarlyPayment, Some((0.0, 10.0))),
    numeric_field!("daysToPayment", days_to_payment, EarlyPayment, Some((0.0, 30.0))),
    numeric_field!("bankFundedPct", bank_funded_pct, EarlyPayment, Some((0.0, 100.0))),
    numeric_field!("scfRate", scf_rate, EarlyPayment, Some((0.0, 15.0))),
    numeric_field!("internalCostOfFunds", internal_cost_of_funds, EarlyPayment, Some((0.0, 15.0))),
    numeric_field!("wcInterestRate", wc_interest_rate, EarlyPayment, Some((0.0, 15.0))),
    numeric_field!("apHeadcount", ap_headcount, ApEfficiency, Some((0.0, 50.0))),
    numeric_field!("apCostPerFte", ap_cost_per_fte, ApEfficiency, Some((30_000.0, 150_000.0))),
    numeric_field!("apEfficiencyPct", ap_efficiency_pct, ApEfficiency, Some((0.0, 100.0))),
    numeric_field!("customsFilings", customs_filings, CustomsTrade, Some((0.0, 5_000.0))),
    numeric_field!("brokerFeePerFiling", broker_fee_per_filing, CustomsTrade, Some((0.0, 200.0))),
    numeric_field!("selfFilingPct", self_filing_pct, CustomsTrade, Some((0.0, 100.0))),
    numeric_field!("shipmentsWithFees", shipments_with_fees, CustomsTrade, Some((0.0, 10_000.0))),
    numeric_field!("forwarderFeePerShipment", forwarder_fee_per_shipment, CustomsTrade, Some((0.0, 100.0))),
    numeric_field!("docFeesEliminatedPct", doc_fees_eliminated_pct, CustomsTrade, Some((0.0, 100.0))),
    numeric_field!("tradeComplianceHeadcount", trade_compliance_headcount, CustomsTrade, Some((0.0, 30.0))),
    numeric_field!("tradeCostPerFte", trade_cost_per_fte, CustomsTrade, Some((30_000.0, 150_000.0))),
    numeric_field!("tradeEfficiencyPct", trade_efficiency_pct, CustomsTrade, Some((0.0, 100.0))),
    numeric_field!("turnover", turnover, HistoricFinancials, None),
    numeric_field!("costOfSales", cost_of_sales, HistoricFinancials, None),
    numeric_field!("operatingProfit", operating_profit, HistoricFinancials, None),
    numeric_field!("netInterest", net_interest, HistoricFinancials, None),
    numeric_field!("ebitda", ebitda, HistoricFinancials, None),
    numeric_field!("tradePayables", trade_payables, HistoricFinancials, None),
    numeric_field!("netDebt", net_debt, HistoricFinancials, None),
    numeric_field!("equity", equity, HistoricFinancials, None),
    numeric_field!("freeCashFlow", free_cash_flow, HistoricFinancials, None),
];

/// Look up a numeric field by its snapshot key.
pub fn field(key: &str) -> Option<&'static FieldSpec> {
    NUMERIC_FIELDS.iter().find(|f| f.key == key)
}

/// Numeric fields belonging to one input section.
pub fn fields_in_group(group: FieldGroup) -> impl Iterator<Item = &'static FieldSpec> {
    NUMERIC_FIELDS.iter().filter(move |f| f.group == group)
}
