use serde::{Deserialize, Serialize};
use tally_domain::{SeriesOrder, ViewMode};

use crate::ConfigError;

/// Stores user-configurable display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Number of chart colours before the palette repeats.
    #[serde(default = "Config::default_palette_size")]
    pub palette_size: usize,
    #[serde(default)]
    pub default_view_mode: ViewMode,
    #[serde(default)]
    pub show_percentages: bool,
    #[serde(default)]
    pub series_order: SeriesOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            palette_size: Self::default_palette_size(),
            default_view_mode: ViewMode::default(),
            show_percentages: false,
            series_order: SeriesOrder::default(),
        }
    }
}

impl Config {
    pub fn default_palette_size() -> usize {
        8
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette_size == 0 {
            return Err(ConfigError::Invalid("palette_size must be at least 1".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }
        Ok(())
    }
}
