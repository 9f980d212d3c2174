use crate::core::metrics::{
    DerivedMetrics, EarlyPaymentMetrics, EfficiencyMetrics, Restated, Restatement,
    VolumeMetrics, WorkingCapitalMetrics,
};
use crate::core::params::{InputParameters, FILING_PERIODS_PER_YEAR};
use crate::engine::ratios::key_ratios;

/// Day count used to annualise funding costs and working capital.
pub const DAYS_PER_YEAR: f64 = 365.0;

fn pct(value: f64) -> f64 {
    value / 100.0
}

/// The calculation engine.
///
/// A pure function from [`InputParameters`] to [`DerivedMetrics`], run in five
/// ordered stages: digitised volume, early-payment economics, working
/// capital, operational efficiency, then aggregation with the restated
/// statements and ratios.
///
/// # Examples
///
/// ```
/// use trade_digitisation_engine::core::params::InputParameters;
/// use trade_digitisation_engine::engine::calculation::CalculationEngine;
///
/// let metrics = CalculationEngine::compute(&InputParameters::default());
/// assert_eq!(metrics.volume.digitised_volume, 200_000_000.0);
/// assert_eq!(metrics.early_payment.days_accelerated, 83.0);
/// ```
pub struct CalculationEngine;

impl CalculationEngine {
    /// Compute every derived metric.
    ///
    /// Total for any input: NaN, infinite and out-of-scale fields (see
    /// [`MAX_INPUT_MAGNITUDE`]) are treated as 0 before stage A, and ratios
    /// with a non-positive denominator are reported as 0.
    ///
    /// [`MAX_INPUT_MAGNITUDE`]: crate::core::params::MAX_INPUT_MAGNITUDE
    pub fn compute(input: &InputParameters) -> DerivedMetrics {
        let params = input.sanitized();

        let volume = Self::volume(&params);
        let early_payment = Self::early_payment(&params, &volume);
        let working_capital = Self::working_capital(&params, &volume, &early_payment);
        let efficiency = Self::efficiency(&params);

        let total_pl_benefit = early_payment.net_discount_benefit
            + efficiency.ap_savings
            + efficiency.total_customs_savings;

        let restatement = Self::restate(
            &params,
            &early_payment,
            &working_capital,
            &efficiency,
            total_pl_benefit,
        );
        let ratios = key_ratios(&restatement);

        DerivedMetrics {
            volume,
            early_payment,
            working_capital,
            efficiency,
            total_pl_benefit,
            restatement,
            ratios,
        }
    }

    /// Stage A.
    fn volume(p: &InputParameters) -> VolumeMetrics {
        let annual_volume = p.annual_volume();
        VolumeMetrics {
            annual_volume,
            digitised_volume: annual_volume * pct(p.digitisation_pct),
        }
    }

    /// Stage B.
    ///
    /// `days_accelerated` is deliberately left unclamped: when payment lands
    /// after the extended terms it goes negative and so do the funding costs.
    fn early_payment(p: &InputParameters, volume: &VolumeMetrics) -> EarlyPaymentMetrics {
        let days_accelerated = p.current_payment_terms + p.term_extension - p.days_to_payment;
        let year_fraction = days_accelerated / DAYS_PER_YEAR;

        let participating_spend = volume.digitised_volume * pct(p.supplier_uptake_pct);
        let discount_value = participating_spend * pct(p.early_payment_discount);

        let bank_funded_amount = participating_spend * pct(p.bank_funded_pct);
        let internal_funded_amount = participating_spend * (1.0 - pct(p.bank_funded_pct));
        let bank_funding_cost = bank_funded_amount * pct(p.scf_rate) * year_fraction;
        let internal_funding_cost =
            internal_funded_amount * pct(p.internal_cost_of_funds) * year_fraction;

        EarlyPaymentMetrics {
            days_accelerated,
            participating_spend,
            discount_value,
            bank_funded_amount,
            internal_funded_amount,
            bank_funding_cost,
            internal_funding_cost,
            net_discount_benefit: discount_value - bank_funding_cost - internal_funding_cost,
        }
    }

    /// Stage C.
    fn working_capital(
        p: &InputParameters,
        volume: &VolumeMetrics,
        early: &EarlyPaymentMetrics,
    ) -> WorkingCapitalMetrics {
        let wc_from_extension = volume.digitised_volume * (p.term_extension / DAYS_PER_YEAR);
        let wc_used_for_early_pay =
            early.internal_funded_amount * (early.days_accelerated / DAYS_PER_YEAR);
        let net_working_capital = wc_from_extension - wc_used_for_early_pay;

        WorkingCapitalMetrics {
            wc_from_extension,
            wc_used_for_early_pay,
            net_working_capital,
            wc_annual_value: net_working_capital * pct(p.wc_interest_rate),
        }
    }

    /// Stage D. Filing and shipment counts are monthly.
    fn efficiency(p: &InputParameters) -> EfficiencyMetrics {
        let ap_fte_saved = p.ap_headcount * pct(p.ap_efficiency_pct);
        let ap_savings = ap_fte_saved * p.ap_cost_per_fte;

        let broker_savings = p.customs_filings
            * FILING_PERIODS_PER_YEAR
            * p.broker_fee_per_filing
            * pct(p.self_filing_pct);
        let forwarder_savings = p.shipments_with_fees
            * FILING_PERIODS_PER_YEAR
            * p.forwarder_fee_per_shipment
            * pct(p.doc_fees_eliminated_pct);

        let trade_fte_saved = p.trade_compliance_headcount * pct(p.trade_efficiency_pct);
        let trade_headcount_savings = trade_fte_saved * p.trade_cost_per_fte;
        let total_customs_savings = broker_savings + forwarder_savings + trade_headcount_savings;

        EfficiencyMetrics {
            ap_fte_saved,
            ap_savings,
            broker_savings,
            forwarder_savings,
            trade_fte_saved,
            trade_headcount_savings,
            total_customs_savings,
            total_operational_savings: ap_savings + total_customs_savings,
        }
    }

    /// Stage E restatement.
    ///
    /// Only the bank-funded share of the discount reduces cost of sales and
    /// lifts EBITDA; internally funded discounts show up through operating
    /// profit via the total P&L benefit.
    fn restate(
        p: &InputParameters,
        early: &EarlyPaymentMetrics,
        wc: &WorkingCapitalMetrics,
        efficiency: &EfficiencyMetrics,
        total_pl_benefit: f64,
    ) -> Restatement {
        let funded_discount = early.bank_funded_amount * pct(p.early_payment_discount);

        Restatement {
            turnover: Restated::unchanged(p.turnover),
            cost_of_sales: Restated::new(p.cost_of_sales, p.cost_of_sales - funded_discount),
            operating_profit: Restated::new(
                p.operating_profit,
                p.operating_profit + total_pl_benefit,
            ),
            net_interest: Restated::new(p.net_interest, p.net_interest - wc.wc_annual_value),
            ebitda: Restated::new(
                p.ebitda,
                p.ebitda
                    + funded_discount
                    + efficiency.ap_savings
                    + efficiency.total_customs_savings,
            ),
            trade_payables: Restated::new(
                p.trade_payables,
                p.trade_payables + wc.wc_from_extension,
            ),
            net_debt: Restated::new(p.net_debt, p.net_debt - wc.net_working_capital),
            equity: Restated::new(p.equity, p.equity + total_pl_benefit),
            free_cash_flow: Restated::new(
                p.free_cash_flow,
                p.free_cash_flow + wc.net_working_capital,
            ),
        }
    }
}
