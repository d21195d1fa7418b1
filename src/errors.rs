use std::result::Result as StdResult;

use tally_config::ConfigError;
use tally_core::CoreError;
use thiserror::Error;

/// Unified error type for the ledger, configuration, and snapshot layers.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, TallyError>;
