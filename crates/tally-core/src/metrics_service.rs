//! Dashboard figures derived from the transaction log and the budget ledger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_domain::{
    BudgetLedger, MonthKey, ProgressStatus, ProgressTotals, Transaction, TransactionKind,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Income and expense figures for one month.
pub struct FinancialMetrics {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub net_cash_flow: f64,
    /// Share of income kept, in percent. `None` without income.
    pub savings_rate: Option<f64>,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One month of the cash-flow chart.
pub struct CashFlowPoint {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Budgeted against spent for one category.
pub struct BudgetComparison {
    pub category_id: Uuid,
    pub name: String,
    pub budgeted: f64,
    pub spent: f64,
    pub difference: f64,
    pub status: ProgressStatus,
}

pub struct MetricsService;

impl MetricsService {
    pub fn monthly_metrics(transactions: &[Transaction], month: MonthKey) -> FinancialMetrics {
        let mut income = 0.0;
        let mut expenses = 0.0;
        let mut count = 0;
        for txn in transactions.iter().filter(|txn| month.contains(txn.date)) {
            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => expenses += txn.amount,
            }
            count += 1;
        }
        let net_cash_flow = income - expenses;
        let savings_rate = if income > 0.0 {
            Some(100.0 * net_cash_flow / income)
        } else {
            None
        };
        FinancialMetrics {
            month,
            income,
            expenses,
            net_cash_flow,
            savings_rate,
            transaction_count: count,
        }
    }

    /// Monthly income, expenses, and net from `from` to `to` inclusive.
    ///
    /// Months without transactions appear with zeros. Empty when `from > to`.
    pub fn cash_flow(
        transactions: &[Transaction],
        from: MonthKey,
        to: MonthKey,
    ) -> Vec<CashFlowPoint> {
        let mut by_month: HashMap<MonthKey, (f64, f64)> = HashMap::new();
        for txn in transactions {
            let totals = by_month.entry(txn.month()).or_insert((0.0, 0.0));
            match txn.kind {
                TransactionKind::Income => totals.0 += txn.amount,
                TransactionKind::Expense => totals.1 += txn.amount,
            }
        }

        let mut points = Vec::new();
        if from > to {
            return points;
        }
        let mut month = from;
        loop {
            let (income, expenses) = by_month.get(&month).copied().unwrap_or((0.0, 0.0));
            points.push(CashFlowPoint {
                month,
                income,
                expenses,
                net: income - expenses,
            });
            if month == to {
                break;
            }
            month = month.next();
        }
        points
    }

    /// Per-category budget against spending for `month`, in bucket order.
    pub fn budget_comparison(ledger: &BudgetLedger, month: MonthKey) -> Vec<BudgetComparison> {
        ledger
            .bucket(month)
            .map(|bucket| {
                bucket
                    .categories
                    .iter()
                    .map(|entry| BudgetComparison {
                        category_id: entry.id,
                        name: entry.name.clone(),
                        budgeted: entry.allocation,
                        spent: entry.actual,
                        difference: entry.allocation - entry.actual,
                        status: ProgressTotals::from_parts(entry.allocation, entry.actual).status,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
