use crate::core::metrics::{DerivedMetrics, Restated};
use crate::core::params::InputParameters;
use crate::report::format::{format_currency, format_multiple, format_number, format_percent};
use serde::Serialize;
use std::fmt;

/// How a row's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Currency,
    Percent,
    Multiple,
}

/// One row of a before/after table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    pub label: &'static str,
    pub kind: LineKind,
    pub value: Restated,
    pub note: &'static str,
}

impl StatementLine {
    fn new(label: &'static str, kind: LineKind, value: Restated, note: &'static str) -> Self {
        Self {
            label,
            kind,
            value,
            note,
        }
    }
}

/// Before/after view of one calculation run.
///
/// Pairs the inputs with their derived metrics so the tables can be built
/// and printed; the numbers themselves all come from [`DerivedMetrics`].
pub struct ImpactReport<'a> {
    params: &'a InputParameters,
    metrics: &'a DerivedMetrics,
}

impl<'a> ImpactReport<'a> {
    pub fn new(params: &'a InputParameters, metrics: &'a DerivedMetrics) -> Self {
        Self { params, metrics }
    }

    pub fn pnl_extract(&self) -> Vec<StatementLine> {
        let s = &self.metrics.restatement;
        vec![
            StatementLine::new("Turnover / revenue", LineKind::Currency, s.turnover, "Unchanged"),
            StatementLine::new(
                "Cost of sales",
                LineKind::Currency,
                s.cost_of_sales,
                "Reduced by early payment discounts where funding is external",
            ),
            StatementLine::new(
                "Operating profit",
                LineKind::Currency,
                s.operating_profit,
                "Increased by the full P&L benefit",
            ),
            StatementLine::new(
                "Net interest payable",
                LineKind::Currency,
                s.net_interest,
                "Lower borrowing from working capital released",
            ),
            StatementLine::new(
                "EBITDA",
                LineKind::Currency,
                s.ebitda,
                "Bank-funded discounts and operational savings",
            ),
        ]
    }

    pub fn balance_sheet_extract(&self) -> Vec<StatementLine> {
        let s = &self.metrics.restatement;
        vec![
            StatementLine::new(
                "Trade payables",
                LineKind::Currency,
                s.trade_payables,
                "Suppliers extend more credit",
            ),
            StatementLine::new(
                "Net debt",
                LineKind::Currency,
                s.net_debt,
                "Lower borrowing from working capital released",
            ),
            StatementLine::new(
                "Equity",
                LineKind::Currency,
                s.equity,
                "Higher retained earnings",
            ),
            StatementLine::new(
                "Free cash flow",
                LineKind::Currency,
                s.free_cash_flow,
                "Working capital generated",
            ),
        ]
    }

    pub fn key_ratios(&self) -> Vec<StatementLine> {
        let r = &self.metrics.ratios;
        vec![
            StatementLine::new(
                "EBITDA margin",
                LineKind::Percent,
                r.ebitda_margin,
                "Lower cost of sales, leaner operations",
            ),
            StatementLine::new(
                "Operating margin",
                LineKind::Percent,
                r.operating_margin,
                "Lower cost of sales, leaner operations",
            ),
            StatementLine::new(
                "Leverage (Net debt / EBITDA)",
                LineKind::Multiple,
                r.leverage,
                "Higher EBITDA, lower net debt",
            ),
            StatementLine::new(
                "Solvency (Net debt / Equity)",
                LineKind::Multiple,
                r.solvency,
                "Lower net debt, higher equity",
            ),
            StatementLine::new(
                "FCF / Sales",
                LineKind::Percent,
                r.fcf_sales,
                "Working capital generated",
            ),
            StatementLine::new(
                "Interest cover",
                LineKind::Multiple,
                r.interest_cover,
                "Lower interest, higher earnings",
            ),
        ]
    }

    fn money(&self, value: f64) -> String {
        format_currency(value, &self.params.currency_symbol)
    }

    fn render(&self, kind: LineKind, value: f64) -> String {
        match kind {
            LineKind::Currency => self.money(value),
            LineKind::Percent => format_percent(value),
            LineKind::Multiple => format_multiple(value),
        }
    }

    fn write_table(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        lines: &[StatementLine],
    ) -> fmt::Result {
        writeln!(f, "\n--- {} ---", title)?;
        writeln!(f, "  {:<30} {:>14} {:>14}  Notes", "Item", "Historic", "Adjusted")?;
        for line in lines {
            writeln!(
                f,
                "  {:<30} {:>14} {:>14}  {}",
                line.label,
                self.render(line.kind, line.value.historic),
                self.render(line.kind, line.value.adjusted),
                line.note
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ImpactReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.params;
        let m = self.metrics;
        let early = &m.early_payment;
        let wc = &m.working_capital;
        let eff = &m.efficiency;

        writeln!(f, "=== Trade Digitisation Impact ===")?;
        writeln!(f, "Digitised volume:          {}", self.money(m.volume.digitised_volume))?;
        writeln!(f, "Total annual P&L benefit:  {}", self.money(m.total_pl_benefit))?;
        writeln!(f, "Net working capital:       {}", self.money(wc.net_working_capital))?;

        writeln!(f, "\n--- Working Capital Benefits ---")?;
        writeln!(f, "  Cash from term extension:   {}", self.money(wc.wc_from_extension))?;
        writeln!(f, "  Cash used for early pay:   -{}", self.money(wc.wc_used_for_early_pay))?;
        writeln!(f, "  Net working capital:        {}", self.money(wc.net_working_capital))?;
        writeln!(
            f,
            "  Annual value at {}%:       {}",
            format_number(p.wc_interest_rate, 1),
            self.money(wc.wc_annual_value)
        )?;

        writeln!(f, "\n--- Early Payment Details ---")?;
        writeln!(f, "  Days accelerated:           {}", format_number(early.days_accelerated, 0))?;
        writeln!(f, "  Participating spend:        {}", self.money(early.participating_spend))?;
        writeln!(
            f,
            "    Bank funded ({}%):        {}",
            format_number(p.bank_funded_pct, 0),
            self.money(early.bank_funded_amount)
        )?;
        writeln!(
            f,
            "    Internally funded ({}%):  {}",
            format_number(100.0 - p.bank_funded_pct, 0),
            self.money(early.internal_funded_amount)
        )?;
        writeln!(f, "  Total discount value:       {}", self.money(early.discount_value))?;
        writeln!(f, "  Bank funding cost:         -{}", self.money(early.bank_funding_cost))?;
        writeln!(f, "  Internal funding cost:     -{}", self.money(early.internal_funding_cost))?;
        writeln!(f, "  Net discount benefit:       {}", self.money(early.net_discount_benefit))?;

        writeln!(f, "\n--- Headcount Efficiency ---")?;
        writeln!(f, "  AP FTEs saved:              {} FTEs", format_number(eff.ap_fte_saved, 1))?;
        writeln!(f, "  AP annual savings:          {}", self.money(eff.ap_savings))?;
        writeln!(f, "  Trade FTEs saved:           {} FTEs", format_number(eff.trade_fte_saved, 1))?;
        writeln!(f, "  Trade headcount savings:    {}", self.money(eff.trade_headcount_savings))?;
        writeln!(f, "  Total FTEs saved:           {} FTEs", format_number(eff.total_fte_saved(), 1))?;

        writeln!(f, "\n--- P&L Benefit Breakdown ---")?;
        writeln!(f, "  Net discount benefit:       {}", self.money(early.net_discount_benefit))?;
        writeln!(f, "  AP headcount savings:       {}", self.money(eff.ap_savings))?;
        writeln!(f, "  Customs broker savings:     {}", self.money(eff.broker_savings))?;
        writeln!(f, "  Forwarder fee savings:      {}", self.money(eff.forwarder_savings))?;
        writeln!(f, "  Trade compliance savings:   {}", self.money(eff.trade_headcount_savings))?;
        writeln!(f, "  Total P&L benefit:          {}", self.money(m.total_pl_benefit))?;

        self.write_table(f, "P&L (Extract)", &self.pnl_extract())?;
        self.write_table(f, "Balance Sheet and Cash Flow (Extract)", &self.balance_sheet_extract())?;
        self.write_table(f, "Key Ratios", &self.key_ratios())?;

        writeln!(f, "\n--- Impact Summary ---")?;
        writeln!(f, "  P&L improvement:            {}", self.money(m.pl_improvement()))?;
        writeln!(f, "  Working capital released:   {}", self.money(wc.net_working_capital))?;
        writeln!(f, "  Leverage improvement:       {}", format_multiple(m.leverage_improvement()))?;
        Ok(())
    }
}
