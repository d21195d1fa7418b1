//! One-month overview combining both ledgers with transaction metrics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tally_core::{
    BudgetComparison, CashFlowPoint, FinancialMetrics, MetricsService, SummaryService,
};
use tally_domain::{BudgetLedger, MonthKey, MonthTotals, SavingsLedger, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub month: MonthKey,
    pub budget: MonthTotals,
    pub savings: MonthTotals,
    pub metrics: FinancialMetrics,
    pub budget_comparison: Vec<BudgetComparison>,
    /// Cash flow for the months leading up to and including `month`.
    pub cash_flow: Vec<CashFlowPoint>,
}

impl Dashboard {
    /// Builds the overview for `month` with `trailing_months` of cash-flow history
    /// (at least the month itself).
    pub fn for_month(
        budget: &BudgetLedger,
        savings: &SavingsLedger,
        transactions: &[Transaction],
        month: MonthKey,
        trailing_months: usize,
    ) -> Self {
        let start = (1..trailing_months.max(1)).fold(month, |key, _| key.previous());
        let dashboard = Self {
            month,
            budget: SummaryService::month_totals(budget, month),
            savings: SummaryService::month_totals(savings, month),
            metrics: MetricsService::monthly_metrics(transactions, month),
            budget_comparison: MetricsService::budget_comparison(budget, month),
            cash_flow: MetricsService::cash_flow(transactions, start, month),
        };
        debug!(
            %month,
            net = dashboard.metrics.net_cash_flow,
            budget_categories = dashboard.budget.category_count,
            savings_goals = dashboard.savings.category_count,
            "dashboard built"
        );
        dashboard
    }
}
