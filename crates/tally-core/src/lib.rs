//! tally-core
//!
//! Operations and derived views over the month-bucketed category ledger.
//! Depends on tally-domain. No terminal I/O, no storage, no logging setup.

pub mod actuals_service;
pub mod error;
pub mod ledger_service;
pub mod metrics_service;
pub mod summary_service;
pub mod time;

pub use actuals_service::*;
pub use error::{CoreError, CoreResult, FeedError};
pub use ledger_service::*;
pub use metrics_service::*;
pub use summary_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
