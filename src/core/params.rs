use crate::core::fields::{field, NUMERIC_FIELDS};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// `annualVolumeMM` is entered in millions.
pub const ANNUAL_VOLUME_UNIT: f64 = 1_000_000.0;

/// Customs filings and shipments are monthly counts; the engine annualises
/// them with this multiplier.
pub const FILING_PERIODS_PER_YEAR: f64 = 12.0;

/// Largest input magnitude the engine computes with. Anything beyond is
/// treated like a non-finite value, which keeps every product of the five
/// stages well inside the `f64` range.
pub const MAX_INPUT_MAGNITUDE: f64 = 1e15;

/// Errors arising from single-field edits.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown numeric field '{key}'")]
    UnknownField { key: String },
}

/// Every user-settable input of one calculation run.
///
/// Percentages are expressed on a 0–100 scale, rates are annualised
/// percentages and day counts are whole days. Historic financials are
/// absolute currency units. `customs_filings` and `shipments_with_fees`
/// are **monthly** counts (see [`FILING_PERIODS_PER_YEAR`]).
///
/// The value is replaced wholesale on every edit; see
/// [`InputParameters::with_value`].
///
/// # Examples
///
/// ```
/// use trade_digitisation_engine::core::params::InputParameters;
///
/// let params = InputParameters::default().with_value("digitisationPct", 50.0).unwrap();
/// assert_eq!(params.annual_volume(), 200_000_000.0);
/// assert_eq!(params.digitisation_pct, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputParameters {
    // Volume
    #[serde(rename = "annualVolumeMM")]
    pub annual_volume_mm: f64,
    pub digitisation_pct: f64,

    // Early payment & working capital
    pub current_payment_terms: f64,
    pub term_extension: f64,
    pub supplier_uptake_pct: f64,
    pub early_payment_discount: f64,
    pub days_to_payment: f64,
    pub bank_funded_pct: f64,
    pub scf_rate: f64,
    pub internal_cost_of_funds: f64,
    pub wc_interest_rate: f64,

    // AP efficiency
    pub ap_headcount: f64,
    pub ap_cost_per_fte: f64,
    pub ap_efficiency_pct: f64,

    // Customs & trade compliance
    pub customs_filings: f64,
    pub broker_fee_per_filing: f64,
    pub self_filing_pct: f64,
    pub shipments_with_fees: f64,
    pub forwarder_fee_per_shipment: f64,
    pub doc_fees_eliminated_pct: f64,
    pub trade_compliance_headcount: f64,
    pub trade_cost_per_fte: f64,
    pub trade_efficiency_pct: f64,

    // Historic financials
    pub turnover: f64,
    pub cost_of_sales: f64,
    pub operating_profit: f64,
    pub net_interest: f64,
    pub ebitda: f64,
    pub trade_payables: f64,
    pub net_debt: f64,
    pub equity: f64,
    pub free_cash_flow: f64,

    /// Display only; never enters the arithmetic.
    pub currency_symbol: String,
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            annual_volume_mm: 200.0,
            digitisation_pct: 100.0,

            current_payment_terms: 60.0,
            term_extension: 30.0,
            supplier_uptake_pct: 65.0,
            early_payment_discount: 3.5,
            days_to_payment: 7.0,
            bank_funded_pct: 60.0,
            scf_rate: 6.5,
            internal_cost_of_funds: 4.0,
            wc_interest_rate: 6.0,

            ap_headcount: 15.0,
            ap_cost_per_fte: 50_000.0,
            ap_efficiency_pct: 40.0,

            customs_filings: 1_000.0,
            broker_fee_per_filing: 55.0,
            self_filing_pct: 90.0,
            shipments_with_fees: 3_500.0,
            forwarder_fee_per_shipment: 20.0,
            doc_fees_eliminated_pct: 35.0,
            trade_compliance_headcount: 8.0,
            trade_cost_per_fte: 50_000.0,
            trade_efficiency_pct: 40.0,

            turnover: 1_000_000_000.0,
            cost_of_sales: 700_000_000.0,
            operating_profit: 40_000_000.0,
            net_interest: 50_000_000.0,
            ebitda: 120_000_000.0,
            trade_payables: 100_000_000.0,
            net_debt: 500_000_000.0,
            equity: 200_000_000.0,
            free_cash_flow: 30_000_000.0,

            currency_symbol: "$".to_string(),
        }
    }
}

/// A numeric field outside the range the presentation layer offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    pub key: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the expected range [{}, {}]",
            self.key, self.value, self.min, self.max
        )
    }
}

impl InputParameters {
    /// Annual trade volume in currency units.
    pub fn annual_volume(&self) -> f64 {
        self.annual_volume_mm * ANNUAL_VOLUME_UNIT
    }

    /// Copy with every NaN, infinite or out-of-scale numeric field replaced
    /// by 0. Out of scale means a magnitude above [`MAX_INPUT_MAGNITUDE`].
    pub fn sanitized(&self) -> Self {
        let mut clean = self.clone();
        for spec in NUMERIC_FIELDS {
            let value = (spec.get)(self);
            if !value.is_finite() {
                log::warn!("Non-finite value {} for '{}' treated as 0", value, spec.key);
                (spec.set)(&mut clean, 0.0);
            } else if value.abs() > MAX_INPUT_MAGNITUDE {
                log::warn!(
                    "Value {:e} for '{}' exceeds {:e} and is treated as 0",
                    value,
                    spec.key,
                    MAX_INPUT_MAGNITUDE
                );
                (spec.set)(&mut clean, 0.0);
            }
        }
        clean
    }

    /// Fields whose value lies outside the presentation range.
    ///
    /// Informational only: the engine computes with the value as given.
    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        NUMERIC_FIELDS
            .iter()
            .filter_map(|spec| {
                let (min, max) = spec.range?;
                let value = (spec.get)(self);
                if spec.in_range(value) {
                    None
                } else {
                    Some(RangeWarning {
                        key: spec.key,
                        value,
                        min,
                        max,
                    })
                }
            })
            .collect()
    }

    /// Read one numeric field by snapshot key.
    pub fn value(&self, key: &str) -> Result<f64, ParamError> {
        let spec = field(key).ok_or_else(|| ParamError::UnknownField {
            key: key.to_string(),
        })?;
        Ok((spec.get)(self))
    }

    /// New parameter set with one numeric field replaced.
    pub fn with_value(&self, key: &str, value: f64) -> Result<Self, ParamError> {
        let spec = field(key).ok_or_else(|| ParamError::UnknownField {
            key: key.to_string(),
        })?;
        let mut next = self.clone();
        (spec.set)(&mut next, value);
        Ok(next)
    }

    /// New parameter set with one field replaced from raw text.
    ///
    /// Text that does not parse to a finite number becomes 0.
    pub fn with_text(&self, key: &str, text: &str) -> Result<Self, ParamError> {
        self.with_value(key, parse_or_default(text, 0.0))
    }

    /// New parameter set with a different display currency symbol.
    pub fn with_currency_symbol(&self, symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: symbol.into(),
            ..self.clone()
        }
    }
}

/// Parse a user-entered number, falling back to `default` when the text does
/// not start with a finite number.
///
/// Like a browser number field, the longest numeric prefix is taken and any
/// trailing text (units, thousands separators) is ignored.
///
/// ```
/// use trade_digitisation_engine::core::params::parse_or_default;
///
/// assert_eq!(parse_or_default(" 3.5 ", 0.0), 3.5);
/// assert_eq!(parse_or_default("45%", 0.0), 45.0);
/// assert_eq!(parse_or_default("abc", 7.0), 7.0);
/// assert_eq!(parse_or_default("inf", 0.0), 0.0);
/// ```
pub fn parse_or_default(text: &str, default: f64) -> f64 {
    match leading_number(text) {
        Some(value) if value.is_finite() => value,
        _ => default,
    }
}

/// `[+-]digits[.digits][e[+-]digits]` at the start of `text`, after
/// leading whitespace.
fn leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
