//! Markers that specialise a ledger as a budget or a savings tracker.

use std::fmt::Debug;

/// Names the two per-month amounts of a ledger flavour.
///
/// The ledger logic is identical for every kind; only the labels shown to
/// users differ.
pub trait LedgerKind: Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static {
    /// What a single category is called ("budget category", "savings goal").
    const ENTRY_LABEL: &'static str;
    /// Label of the planned amount.
    const ALLOCATION_LABEL: &'static str;
    /// Label of the realised amount.
    const ACTUAL_LABEL: &'static str;
}

/// Budget categories: allocation is the budget, actual is the amount spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budgeting;

impl LedgerKind for Budgeting {
    const ENTRY_LABEL: &'static str = "budget category";
    const ALLOCATION_LABEL: &'static str = "budget";
    const ACTUAL_LABEL: &'static str = "spent";
}

/// Savings goals: allocation is the target, actual is the amount saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Saving;

impl LedgerKind for Saving {
    const ENTRY_LABEL: &'static str = "savings goal";
    const ALLOCATION_LABEL: &'static str = "target";
    const ACTUAL_LABEL: &'static str = "saved";
}
