//! Snapshot operations for [`MonthlyLedger`].
//!
//! Every operation borrows the current snapshot and returns a new one. Inputs
//! are validated before anything is copied, so a failed call has no effect.

use chrono::NaiveDate;
use uuid::Uuid;

use tally_domain::{
    is_valid_amount, is_valid_name, CategoryEntry, CategoryUpdate, LedgerKind, MonthKey,
    MonthlyLedger,
};

use crate::{CoreError, CoreResult};

/// Result of [`LedgerService::add_category`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedCategory<K: LedgerKind> {
    pub ledger: MonthlyLedger<K>,
    pub id: Uuid,
}

/// Provides the month-bucket lifecycle and category CRUD for ledgers of any kind.
pub struct LedgerService;

impl LedgerService {
    /// Key of the month containing `date`.
    pub fn month_key_of(date: NaiveDate) -> MonthKey {
        MonthKey::from_date(date)
    }

    /// Parses a `YEAR-MONTH` key.
    pub fn parse_month(raw: &str) -> CoreResult<MonthKey> {
        Ok(raw.parse::<MonthKey>()?)
    }

    /// Returns a snapshot in which `month` has a bucket.
    ///
    /// A missing bucket is seeded from the greatest existing month with the
    /// same category ids and names and zeroed amounts.
    pub fn ensure_month<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        month: MonthKey,
    ) -> MonthlyLedger<K> {
        let mut next = ledger.clone();
        next.insert_month(month);
        next
    }

    /// Adds a category funded in `month` and present at zero in every other month.
    pub fn add_category<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        month: MonthKey,
        name: &str,
        allocation: f64,
    ) -> CoreResult<AddedCategory<K>> {
        let name = validate_name::<K>(name)?;
        let allocation = validate_amount(K::ALLOCATION_LABEL, allocation)?;

        let entry = CategoryEntry::new(name, allocation);
        let id = entry.id;
        let mut next = ledger.clone();
        next.insert_category(month, entry);
        Ok(AddedCategory { ledger: next, id })
    }

    /// Applies a rename to every month and an allocation change to `month` only.
    pub fn update_category<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        id: Uuid,
        update: &CategoryUpdate,
        month: MonthKey,
    ) -> CoreResult<MonthlyLedger<K>> {
        if !ledger.contains_category(id) {
            return Err(CoreError::NotFound(id));
        }
        let name = update
            .name
            .as_deref()
            .map(validate_name::<K>)
            .transpose()?;
        let allocation = update
            .allocation
            .map(|amount| validate_amount(K::ALLOCATION_LABEL, amount))
            .transpose()?;

        let mut next = ledger.clone();
        if let Some(name) = name {
            next.rename_category(id, name);
        }
        if let Some(allocation) = allocation {
            next.insert_month(month);
            if !next.set_allocation(month, id, allocation) {
                return Err(CoreError::NotFound(id));
            }
        }
        Ok(next)
    }

    /// Removes a category from every month. Unknown ids are ignored.
    pub fn delete_category<K: LedgerKind>(ledger: &MonthlyLedger<K>, id: Uuid) -> MonthlyLedger<K> {
        let mut next = ledger.clone();
        next.remove_category(id);
        next
    }

    /// Records the spent or saved amount of one category in one month.
    pub fn set_actual<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        id: Uuid,
        month: MonthKey,
        actual: f64,
    ) -> CoreResult<MonthlyLedger<K>> {
        let actual = validate_amount(K::ACTUAL_LABEL, actual)?;
        if !ledger.contains_category(id) {
            return Err(CoreError::NotFound(id));
        }
        let mut next = ledger.clone();
        next.insert_month(month);
        if !next.set_actual(month, id, actual) {
            return Err(CoreError::NotFound(id));
        }
        Ok(next)
    }
}

fn validate_name<K: LedgerKind>(name: &str) -> CoreResult<&str> {
    if is_valid_name(name) {
        Ok(name.trim())
    } else {
        Err(CoreError::Validation(format!(
            "{} name must not be empty",
            K::ENTRY_LABEL
        )))
    }
}

pub(crate) fn validate_amount(label: &str, amount: f64) -> CoreResult<f64> {
    if is_valid_amount(amount) {
        Ok(amount)
    } else {
        Err(CoreError::Validation(format!(
            "{label} must be a finite, non-negative amount (got {amount})"
        )))
    }
}
