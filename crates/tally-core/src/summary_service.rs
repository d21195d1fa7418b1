//! Aggregate, chart, and progress views over a month bucket.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use tally_domain::{
    AggregateView, CategoryEntry, CategoryProgress, LedgerKind, MonthKey, MonthTotals,
    MonthlyLedger, ProgressTotals, SeriesOrder, SeriesPoint, ViewMode,
};

/// Number of distinct chart colours used when none is configured.
pub const DEFAULT_PALETTE_SIZE: usize = 8;

/// Presentation knobs for [`SummaryService::aggregate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    pub palette_size: usize,
    pub order: SeriesOrder,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            order: SeriesOrder::Ledger,
        }
    }
}

/// Stateless read helpers. Linear in the number of categories; nothing is cached.
pub struct SummaryService;

impl SummaryService {
    /// Total and chart series for `month` with the default palette and bucket order.
    pub fn aggregate<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        month: MonthKey,
        view_mode: ViewMode,
        as_percentage: bool,
    ) -> AggregateView {
        Self::aggregate_with(
            ledger,
            month,
            view_mode,
            as_percentage,
            AggregateOptions::default(),
        )
    }

    /// Total and chart series for `month`.
    ///
    /// `total` counts every category. The series skips categories whose
    /// selected amount is zero, and colours are assigned by series position
    /// modulo the palette size.
    pub fn aggregate_with<K: LedgerKind>(
        ledger: &MonthlyLedger<K>,
        month: MonthKey,
        view_mode: ViewMode,
        as_percentage: bool,
        options: AggregateOptions,
    ) -> AggregateView {
        let Some(bucket) = ledger.bucket(month) else {
            return AggregateView::empty(month, view_mode, as_percentage);
        };

        let total: f64 = bucket
            .categories
            .iter()
            .map(|entry| amount_of(entry, view_mode))
            .sum();

        let mut visible: Vec<(&CategoryEntry, f64)> = bucket
            .categories
            .iter()
            .map(|entry| (entry, amount_of(entry, view_mode)))
            .filter(|(_, amount)| *amount > 0.0)
            .collect();

        if options.order == SeriesOrder::ValueDescending {
            visible.sort_by(|(a, a_amount), (b, b_amount)| {
                b_amount
                    .partial_cmp(a_amount)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        let palette = options.palette_size.max(1);
        let series = visible
            .into_iter()
            .enumerate()
            .map(|(position, (entry, amount))| SeriesPoint {
                category_id: entry.id,
                name: entry.name.clone(),
                value: if as_percentage {
                    percentage_of(amount, total)
                } else {
                    amount
                },
                color_index: position % palette,
            })
            .collect();

        AggregateView {
            month,
            view_mode,
            as_percentage,
            total,
            series,
        }
    }

    /// Progress rows for every category in `month`, in bucket order.
    pub fn progress<K: LedgerKind>(ledger: &MonthlyLedger<K>, month: MonthKey) -> Vec<CategoryProgress> {
        ledger
            .bucket(month)
            .map(|bucket| {
                bucket
                    .categories
                    .iter()
                    .map(|entry| CategoryProgress {
                        category_id: entry.id,
                        name: entry.name.clone(),
                        totals: ProgressTotals::from_parts(entry.allocation, entry.actual),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Allocation and actual totals for the whole month.
    pub fn month_totals<K: LedgerKind>(ledger: &MonthlyLedger<K>, month: MonthKey) -> MonthTotals {
        let (count, allocation, actual) = ledger
            .bucket(month)
            .map(|bucket| {
                (
                    bucket.categories.len(),
                    bucket.total_allocation(),
                    bucket.total_actual(),
                )
            })
            .unwrap_or((0, 0.0, 0.0));
        MonthTotals {
            month,
            category_count: count,
            totals: ProgressTotals::from_parts(allocation, actual),
        }
    }
}

fn amount_of(entry: &CategoryEntry, view_mode: ViewMode) -> f64 {
    match view_mode {
        ViewMode::Allocation => entry.allocation,
        ViewMode::Actual => entry.actual,
    }
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * amount / total
    } else {
        0.0
    }
}
