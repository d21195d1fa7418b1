//! Read-only views derived from a month bucket for charts and lists.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::month::MonthKey;

/// Which per-month amount a view reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Allocation,
    Actual,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewMode::Allocation => "allocation",
            ViewMode::Actual => "actual",
        };
        f.write_str(label)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allocation" | "budget" | "target" => Ok(ViewMode::Allocation),
            "actual" | "spent" | "saved" => Ok(ViewMode::Actual),
            other => Err(format!("unknown view mode `{other}`")),
        }
    }
}

/// Ordering of chart series entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    /// Same order as the month bucket.
    #[default]
    Ledger,
    /// Largest value first; ties by name, then id.
    ValueDescending,
}

/// One chart-ready slice or bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub category_id: Uuid,
    pub name: String,
    pub value: f64,
    pub color_index: usize,
}

/// Total and chart series for one month and one amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateView {
    pub month: MonthKey,
    pub view_mode: ViewMode,
    pub as_percentage: bool,
    /// Sum over every category in the bucket, zero-valued ones included.
    pub total: f64,
    /// Categories whose selected amount is above zero.
    pub series: Vec<SeriesPoint>,
}

impl AggregateView {
    pub fn empty(month: MonthKey, view_mode: ViewMode, as_percentage: bool) -> Self {
        Self {
            month,
            view_mode,
            as_percentage,
            total: 0.0,
            series: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// How the actual amount compares with the allocation.
pub enum ProgressStatus {
    Empty,
    Under,
    Met,
    Over,
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressStatus::Empty => "Empty",
            ProgressStatus::Under => "Under",
            ProgressStatus::Met => "Met",
            ProgressStatus::Over => "Over",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Allocation versus actual for one category or a whole month.
pub struct ProgressTotals {
    pub allocation: f64,
    pub actual: f64,
    pub remaining: f64,
    pub variance: f64,
    /// Progress bar width, clamped to `[0, 1]`.
    pub fraction: f64,
    /// Unclamped percentage for labels; `None` when nothing is allocated or realised.
    pub percent: Option<f64>,
    pub status: ProgressStatus,
}

impl ProgressTotals {
    pub fn from_parts(allocation: f64, actual: f64) -> Self {
        let remaining = allocation - actual;
        let variance = actual - allocation;
        let percent = if allocation.abs() > f64::EPSILON {
            Some((actual / allocation) * 100.0)
        } else if actual.abs() > f64::EPSILON {
            Some(100.0)
        } else {
            None
        };
        let fraction = if allocation.abs() > f64::EPSILON {
            (actual / allocation).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let status = if allocation.abs() < f64::EPSILON && actual.abs() < f64::EPSILON {
            ProgressStatus::Empty
        } else {
            match actual.partial_cmp(&allocation).unwrap_or(Ordering::Equal) {
                Ordering::Greater => ProgressStatus::Over,
                Ordering::Less => ProgressStatus::Under,
                Ordering::Equal => ProgressStatus::Met,
            }
        };
        Self {
            allocation,
            actual,
            remaining,
            variance,
            fraction,
            percent,
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// List row for one category with its progress figures.
pub struct CategoryProgress {
    pub category_id: Uuid,
    pub name: String,
    pub totals: ProgressTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Roll-up of a whole month bucket.
pub struct MonthTotals {
    pub month: MonthKey,
    pub category_count: usize,
    pub totals: ProgressTotals,
}
