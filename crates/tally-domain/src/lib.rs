//! tally-domain
//!
//! Pure domain models for the month-bucketed category ledger.
//! No I/O, no services, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod kind;
pub mod ledger;
pub mod month;
pub mod transaction;
pub mod view;

pub use category::*;
pub use common::*;
pub use kind::*;
pub use ledger::*;
pub use month::*;
pub use transaction::*;
pub use view::*;
