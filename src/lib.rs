#![doc(test(attr(deny(warnings))))]

//! Tally keeps month-bucketed budget categories and savings goals for small
//! business finance apps: lazy month creation, category fan-out across months,
//! and chart-ready aggregates.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod store;
pub mod utils;

pub use tally_config;
pub use tally_core;
pub use tally_domain;

pub use dashboard::Dashboard;
pub use errors::{Result, TallyError};
pub use store::{BudgetStore, LedgerStore, RefreshOutcome, SavingsStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}
