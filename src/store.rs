//! Stateful adapter that owns the current ledger snapshot for a UI layer.
//!
//! The ledger itself is a plain value; this wrapper keeps the active month and
//! a version counter so views know when to re-render. Every successful change
//! swaps in a new snapshot, so the last write wins.

use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_config::Config;
use tally_core::{
    ActualsFeed, ActualsService, AggregateOptions, Clock, LedgerService, SummaryService,
};
use tally_domain::{
    AggregateView, Budgeting, CategoryProgress, CategoryUpdate, LedgerKind, MonthKey,
    MonthTotals, MonthlyLedger, Saving, ViewMode,
};

use crate::errors::Result;

/// What happened when actuals were pulled from a feed.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied { updated: usize, orphaned: Vec<Uuid> },
    /// The feed failed; the previous actual amounts were kept.
    Stale { reason: String },
}

#[derive(Debug, Clone)]
pub struct LedgerStore<K: LedgerKind> {
    snapshot: MonthlyLedger<K>,
    active_month: MonthKey,
    version: u64,
    options: AggregateOptions,
    view_mode: ViewMode,
    as_percentage: bool,
}

pub type BudgetStore = LedgerStore<Budgeting>;
pub type SavingsStore = LedgerStore<Saving>;

impl<K: LedgerKind> LedgerStore<K> {
    /// Empty ledger opened on the clock's current month.
    pub fn new(clock: &dyn Clock) -> Self {
        Self::from_snapshot(MonthlyLedger::new(), clock.current_month())
    }

    /// Wraps an existing snapshot, for example one restored by a persistence layer.
    pub fn from_snapshot(snapshot: MonthlyLedger<K>, active_month: MonthKey) -> Self {
        Self {
            snapshot: LedgerService::ensure_month(&snapshot, active_month),
            active_month,
            version: 0,
            options: AggregateOptions::default(),
            view_mode: ViewMode::default(),
            as_percentage: false,
        }
    }

    pub fn from_json(json: &str, active_month: MonthKey) -> Result<Self> {
        let snapshot: MonthlyLedger<K> = serde_json::from_str(json)?;
        info!(
            kind = K::ENTRY_LABEL,
            months = snapshot.len(),
            "ledger snapshot restored"
        );
        Ok(Self::from_snapshot(snapshot, active_month))
    }

    /// Applies chart preferences: palette, ordering, and the view used by
    /// [`LedgerStore::default_aggregate`].
    pub fn with_config(mut self, config: &Config) -> Self {
        self.options = AggregateOptions {
            palette_size: config.palette_size,
            order: config.series_order,
        };
        self.view_mode = config.default_view_mode;
        self.as_percentage = config.show_percentages;
        self
    }

    pub fn snapshot(&self) -> &MonthlyLedger<K> {
        &self.snapshot
    }

    pub fn active_month(&self) -> MonthKey {
        self.active_month
    }

    /// Incremented on every change to the snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot)?)
    }

    /// Switches the active month, creating its bucket if needed.
    pub fn navigate_to(&mut self, month: MonthKey) {
        if !self.snapshot.contains_month(month) {
            let next = LedgerService::ensure_month(&self.snapshot, month);
            self.commit(next);
            info!(kind = K::ENTRY_LABEL, %month, "month bucket created");
        }
        debug!(from = %self.active_month, to = %month, "active month changed");
        self.active_month = month;
    }

    pub fn next_month(&mut self) {
        self.navigate_to(self.active_month.next());
    }

    pub fn previous_month(&mut self) {
        self.navigate_to(self.active_month.previous());
    }

    /// Adds a category funded in the active month.
    pub fn add_category(&mut self, name: &str, allocation: f64) -> Result<Uuid> {
        let added = LedgerService::add_category(&self.snapshot, self.active_month, name, allocation)
            .inspect_err(|err| warn!(kind = K::ENTRY_LABEL, error = %err, "add rejected"))?;
        self.commit(added.ledger);
        info!(
            kind = K::ENTRY_LABEL,
            id = %added.id,
            month = %self.active_month,
            allocation,
            "category added"
        );
        Ok(added.id)
    }

    /// Renames everywhere and/or reallocates in the active month.
    ///
    /// An empty update only checks that the category exists.
    pub fn update_category(&mut self, id: Uuid, update: &CategoryUpdate) -> Result<()> {
        let next = LedgerService::update_category(&self.snapshot, id, update, self.active_month)
            .inspect_err(|err| warn!(kind = K::ENTRY_LABEL, %id, error = %err, "update rejected"))?;
        if update.is_empty() {
            return Ok(());
        }
        self.commit(next);
        debug!(kind = K::ENTRY_LABEL, %id, month = %self.active_month, ?update, "category updated");
        Ok(())
    }

    /// Removes the category from every month. Returns `false` if it was unknown.
    pub fn delete_category(&mut self, id: Uuid) -> bool {
        if !self.snapshot.contains_category(id) {
            return false;
        }
        let next = LedgerService::delete_category(&self.snapshot, id);
        self.commit(next);
        info!(kind = K::ENTRY_LABEL, %id, "category deleted");
        true
    }

    /// Records the actual amount for the active month.
    pub fn set_actual(&mut self, id: Uuid, actual: f64) -> Result<()> {
        self.set_actual_in(id, self.active_month, actual)
    }

    pub fn set_actual_in(&mut self, id: Uuid, month: MonthKey, actual: f64) -> Result<()> {
        let next = LedgerService::set_actual(&self.snapshot, id, month, actual)
            .inspect_err(|err| warn!(kind = K::ENTRY_LABEL, %id, error = %err, "actual rejected"))?;
        self.commit(next);
        debug!(kind = K::ENTRY_LABEL, %id, %month, actual, "actual recorded");
        Ok(())
    }

    /// Pulls actual amounts for the active month from `feed`.
    ///
    /// A failing feed leaves the snapshot untouched and reports
    /// [`RefreshOutcome::Stale`]. Invalid amounts are an error.
    pub fn refresh_actuals(&mut self, feed: &dyn ActualsFeed) -> Result<RefreshOutcome> {
        let actuals = match feed.monthly_actuals(self.active_month) {
            Ok(actuals) => actuals,
            Err(err) => {
                warn!(
                    kind = K::ENTRY_LABEL,
                    month = %self.active_month,
                    error = %err,
                    "actuals feed failed, keeping last known values"
                );
                return Ok(RefreshOutcome::Stale {
                    reason: err.to_string(),
                });
            }
        };
        let applied = ActualsService::apply(&self.snapshot, &actuals)?;
        if !applied.orphaned.is_empty() {
            warn!(
                kind = K::ENTRY_LABEL,
                orphaned = applied.orphaned.len(),
                "feed reported unknown categories"
            );
        }
        self.commit(applied.ledger);
        debug!(
            kind = K::ENTRY_LABEL,
            month = %actuals.month,
            updated = applied.updated,
            "actuals refreshed"
        );
        Ok(RefreshOutcome::Applied {
            updated: applied.updated,
            orphaned: applied.orphaned,
        })
    }

    pub fn aggregate(&self, view_mode: ViewMode, as_percentage: bool) -> AggregateView {
        SummaryService::aggregate_with(
            &self.snapshot,
            self.active_month,
            view_mode,
            as_percentage,
            self.options,
        )
    }

    /// Chart of the active month in the configured view mode.
    pub fn default_aggregate(&self) -> AggregateView {
        self.aggregate(self.view_mode, self.as_percentage)
    }

    pub fn progress(&self) -> Vec<CategoryProgress> {
        SummaryService::progress(&self.snapshot, self.active_month)
    }

    pub fn totals(&self) -> MonthTotals {
        SummaryService::month_totals(&self.snapshot, self.active_month)
    }

    fn commit(&mut self, next: MonthlyLedger<K>) {
        self.snapshot = next;
        self.version += 1;
    }
}
