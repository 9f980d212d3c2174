//! Display formatting for report values.
//!
//! Values are rounded in decimal, midpoint away from zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const NOT_AVAILABLE: &str = "n/a";

/// Round to `dp` decimal places, or `None` for NaN / infinite / out-of-range values.
pub fn round_decimal(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// Fixed-point rendering with exactly `dp` decimals.
pub fn format_number(value: f64, dp: u32) -> String {
    match round_decimal(value, dp) {
        Some(d) if d.is_zero() => format!("{:.*}", dp as usize, Decimal::ZERO),
        Some(d) => format!("{:.*}", dp as usize, d),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Compact currency: millions with two decimals, thousands with none,
/// otherwise whole units. The sign goes before the symbol.
///
/// ```
/// use trade_digitisation_engine::report::format::format_currency;
///
/// assert_eq!(format_currency(4_550_000.0, "$"), "$4.55M");
/// assert_eq!(format_currency(-300_000.0, "€"), "-€300K");
/// assert_eq!(format_currency(42.0, "£"), "£42");
/// ```
pub fn format_currency(value: f64, symbol: &str) -> String {
    let magnitude = value.abs();
    let (scaled, dp, suffix) = if magnitude >= 1_000_000.0 {
        (magnitude / 1_000_000.0, 2, "M")
    } else if magnitude >= 1_000.0 {
        (magnitude / 1_000.0, 0, "K")
    } else {
        (magnitude, 0, "")
    };
    // Also covers values too large for a Decimal.
    let Some(rounded) = round_decimal(scaled, dp) else {
        return NOT_AVAILABLE.to_string();
    };
    let sign = if value < 0.0 && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{}{suffix}", format_number(scaled, dp))
}

/// A ratio as a percentage with two decimals (`0.1234` → `12.34%`).
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{}%", format_number(ratio * 100.0, 2))
}

/// A multiple with two decimals (`4.1667` → `4.17x`).
pub fn format_multiple(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{}x", format_number(value, 2))
}
