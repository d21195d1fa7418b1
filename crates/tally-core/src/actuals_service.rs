//! Feeding externally computed actual amounts into a ledger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_domain::{LedgerKind, MonthKey, MonthlyLedger, Transaction};

use crate::{ledger_service::validate_amount, CoreError, CoreResult, FeedError};

/// Per-category actual amounts for one month, as reported by a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActuals {
    pub month: MonthKey,
    #[serde(default)]
    pub amounts: HashMap<Uuid, f64>,
}

impl MonthlyActuals {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            amounts: HashMap::new(),
        }
    }

    pub fn with_amount(mut self, category_id: Uuid, amount: f64) -> Self {
        self.amounts.insert(category_id, amount);
        self
    }
}

/// Source of actual amounts, typically backed by the transaction log.
pub trait ActualsFeed {
    fn monthly_actuals(&self, month: MonthKey) -> Result<MonthlyActuals, FeedError>;
}

/// Sums expense transactions per category for the requested month.
#[derive(Debug, Clone, Copy)]
pub struct TransactionActuals<'a> {
    transactions: &'a [Transaction],
}

impl<'a> TransactionActuals<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }
}

impl ActualsFeed for TransactionActuals<'_> {
    fn monthly_actuals(&self, month: MonthKey) -> Result<MonthlyActuals, FeedError> {
        let mut actuals = MonthlyActuals::new(month);
        for txn in self
            .transactions
            .iter()
            .filter(|txn| txn.is_expense() && month.contains(txn.date))
        {
            let Some(category_id) = txn.category_id else {
                continue;
            };
            if !txn.amount.is_finite() {
                return Err(FeedError::Malformed(format!(
                    "transaction {} has a non-finite amount",
                    txn.id
                )));
            }
            *actuals.amounts.entry(category_id).or_insert(0.0) += txn.amount;
        }
        Ok(actuals)
    }
}

/// Outcome of [`ActualsService::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedActuals<K: LedgerKind> {
    pub ledger: MonthlyLedger<K>,
    /// Categories of the month whose actual amount was written.
    pub updated: usize,
    /// Reported ids the ledger does not know, sorted.
    pub orphaned: Vec<Uuid>,
}

pub struct ActualsService;

impl ActualsService {
    /// Replaces the actual amounts of `actuals.month` with the reported figures.
    ///
    /// Categories missing from the report are set to zero. Every amount is
    /// checked before the ledger is touched.
    pub fn apply<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        actuals: &MonthlyActuals,
    ) -> CoreResult<AppliedActuals<K>> {
        for amount in actuals.amounts.values() {
            validate_amount(K::ACTUAL_LABEL, *amount)?;
        }

        let mut next = ledger.clone();
        next.insert_month(actuals.month);
        let ids: Vec<Uuid> = next
            .bucket(actuals.month)
            .map(|bucket| bucket.categories.iter().map(|entry| entry.id).collect())
            .unwrap_or_default();
        for id in &ids {
            let amount = actuals.amounts.get(id).copied().unwrap_or(0.0);
            if !next.set_actual(actuals.month, *id, amount) {
                return Err(CoreError::NotFound(*id));
            }
        }

        let mut orphaned: Vec<Uuid> = actuals
            .amounts
            .keys()
            .filter(|id| !ids.contains(id))
            .copied()
            .collect();
        orphaned.sort();

        Ok(AppliedActuals {
            ledger: next,
            updated: ids.len(),
            orphaned,
        })
    }
}
