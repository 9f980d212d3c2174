use crate::core::metrics::{KeyRatios, Restated, Restatement};

/// `numerator / denominator`, or 0 unless the denominator is strictly positive.
///
/// A NaN denominator fails the guard as well, and so does a quotient that
/// overflows (a tiny positive denominator).
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        let ratio = numerator / denominator;
        if ratio.is_finite() {
            return ratio;
        }
    }
    0.0
}

/// Apply [`guarded_ratio`] to the historic and adjusted sides independently.
pub fn restated_ratio(numerator: Restated, denominator: Restated) -> Restated {
    Restated::new(
        guarded_ratio(numerator.historic, denominator.historic),
        guarded_ratio(numerator.adjusted, denominator.adjusted),
    )
}

/// Compute the key ratios from restated statement lines.
///
/// Only the denominator is guarded: a negative numerator (e.g. negative
/// net debt) passes through, while a non-positive EBITDA, equity, turnover or
/// net interest yields 0 for that side.
pub fn key_ratios(statement: &Restatement) -> KeyRatios {
    KeyRatios {
        ebitda_margin: restated_ratio(statement.ebitda, statement.turnover),
        operating_margin: restated_ratio(statement.operating_profit, statement.turnover),
        leverage: restated_ratio(statement.net_debt, statement.ebitda),
        solvency: restated_ratio(statement.net_debt, statement.equity),
        fcf_sales: restated_ratio(statement.free_cash_flow, statement.turnover),
        interest_cover: restated_ratio(statement.ebitda, statement.net_interest),
    }
}
