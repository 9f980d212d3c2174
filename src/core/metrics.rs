use serde::{Deserialize, Serialize};

/// A historic statement line or ratio next to its restated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restated {
    pub historic: f64,
    pub adjusted: f64,
}

impl Restated {
    pub fn new(historic: f64, adjusted: f64) -> Self {
        Self { historic, adjusted }
    }

    /// A line the digitisation does not touch.
    pub fn unchanged(value: f64) -> Self {
        Self::new(value, value)
    }

    /// `adjusted - historic`.
    pub fn change(&self) -> f64 {
        self.adjusted - self.historic
    }
}

/// Stage A output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMetrics {
    pub annual_volume: f64,
    pub digitised_volume: f64,
}

/// Stage B output: discount captured on early payments, net of funding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyPaymentMetrics {
    /// May be negative when payment lands after the extended terms.
    pub days_accelerated: f64,
    pub participating_spend: f64,
    pub discount_value: f64,
    pub bank_funded_amount: f64,
    pub internal_funded_amount: f64,
    pub bank_funding_cost: f64,
    pub internal_funding_cost: f64,
    pub net_discount_benefit: f64,
}

/// Stage C output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCapitalMetrics {
    /// Cash retained by paying on extended terms.
    pub wc_from_extension: f64,
    /// Cash consumed by internally funded early payments.
    pub wc_used_for_early_pay: f64,
    pub net_working_capital: f64,
    /// Annual interest value of the net working capital.
    pub wc_annual_value: f64,
}

/// Stage D output: headcount and customs/forwarder savings, all annual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyMetrics {
    pub ap_fte_saved: f64,
    pub ap_savings: f64,
    pub broker_savings: f64,
    pub forwarder_savings: f64,
    pub trade_fte_saved: f64,
    pub trade_headcount_savings: f64,
    pub total_customs_savings: f64,
    pub total_operational_savings: f64,
}

impl EfficiencyMetrics {
    pub fn total_fte_saved(&self) -> f64 {
        self.ap_fte_saved + self.trade_fte_saved
    }
}

/// Historic P&L, balance sheet and cash-flow lines restated for the
/// digitisation benefit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restatement {
    pub turnover: Restated,
    pub cost_of_sales: Restated,
    pub operating_profit: Restated,
    pub net_interest: Restated,
    pub ebitda: Restated,
    pub trade_payables: Restated,
    pub net_debt: Restated,
    pub equity: Restated,
    pub free_cash_flow: Restated,
}

/// Margins, leverage, solvency and cover, before and after.
///
/// Each ratio is 0 when its denominator is not strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRatios {
    pub ebitda_margin: Restated,
    pub operating_margin: Restated,
    /// Net debt / EBITDA.
    pub leverage: Restated,
    /// Net debt / equity.
    pub solvency: Restated,
    pub fcf_sales: Restated,
    /// EBITDA / net interest.
    pub interest_cover: Restated,
}

/// Everything the engine derives from one [`InputParameters`].
///
/// Never stored; recompute it whenever the inputs change.
///
/// [`InputParameters`]: crate::core::params::InputParameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub volume: VolumeMetrics,
    pub early_payment: EarlyPaymentMetrics,
    pub working_capital: WorkingCapitalMetrics,
    pub efficiency: EfficiencyMetrics,
    /// Net discount benefit plus AP and customs savings.
    #[serde(rename = "totalPLBenefit")]
    pub total_pl_benefit: f64,
    pub restatement: Restatement,
    pub ratios: KeyRatios,
}

impl DerivedMetrics {
    /// Reduction in net debt / EBITDA; positive is an improvement.
    pub fn leverage_improvement(&self) -> f64 {
        self.ratios.leverage.historic - self.ratios.leverage.adjusted
    }

    /// Increase in operating profit.
    pub fn pl_improvement(&self) -> f64 {
        self.restatement.operating_profit.change()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restated_change() {
        let line = Restated::new(500.0, 420.0);
        assert_eq!(line.change(), -80.0);
        assert_eq!(Restated::unchanged(7.0).change(), 0.0);
    }

    #[test]
    fn test_total_fte_saved() {
        let efficiency = EfficiencyMetrics {
            ap_fte_saved: 6.0,
            ap_savings: 300_000.0,
            broker_savings: 0.0,
            forwarder_savings: 0.0,
            trade_fte_saved: 3.2,
            trade_headcount_savings: 160_000.0,
            total_customs_savings: 160_000.0,
            total_operational_savings: 460_000.0,
        };
        assert!((efficiency.total_fte_saved() - 9.2).abs() < 1e-12);
    }
}
