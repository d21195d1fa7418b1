//! Month-bucketed category ledger.
//!
//! The mutating methods here assume their inputs were validated by the caller;
//! they only maintain the structural rules: every bucket holds the same set of
//! category ids, a category's name is the same everywhere, and amounts belong
//! to a single bucket. Deserialized snapshots are checked against the same
//! rules before a ledger is handed out.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt,
    marker::PhantomData,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::CategoryEntry,
    common::{is_valid_amount, is_valid_name},
    kind::{Budgeting, LedgerKind, Saving},
    month::MonthKey,
};

/// Categories and their amounts for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    pub month: MonthKey,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

impl MonthBucket {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            categories: Vec::new(),
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&CategoryEntry> {
        self.categories.iter().find(|entry| entry.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut CategoryEntry> {
        self.categories.iter_mut().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.category(id).is_some()
    }

    pub fn total_allocation(&self) -> f64 {
        self.categories.iter().map(|entry| entry.allocation).sum()
    }

    pub fn total_actual(&self) -> f64 {
        self.categories.iter().map(|entry| entry.actual).sum()
    }
}

/// Mapping from calendar month to the categories tracked in that month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound = "")]
pub struct MonthlyLedger<K: LedgerKind> {
    #[serde(default, with = "bucket_list")]
    buckets: BTreeMap<MonthKey, MonthBucket>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

/// Ledger of monthly budget categories (budget / spent).
pub type BudgetLedger = MonthlyLedger<Budgeting>;

/// Ledger of monthly savings goals (target / saved).
pub type SavingsLedger = MonthlyLedger<Saving>;

impl<K: LedgerKind> Default for MonthlyLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LedgerKind> MonthlyLedger<K> {
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            kind: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of month buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, month: MonthKey) -> Option<&MonthBucket> {
        self.buckets.get(&month)
    }

    /// Buckets in calendar order.
    pub fn buckets(&self) -> impl Iterator<Item = &MonthBucket> {
        self.buckets.values()
    }

    /// Month keys in calendar order.
    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.buckets.keys().copied()
    }

    /// The greatest month currently tracked.
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.buckets.keys().next_back().copied()
    }

    pub fn contains_month(&self, month: MonthKey) -> bool {
        self.buckets.contains_key(&month)
    }

    /// Returns `true` when any bucket holds the category.
    pub fn contains_category(&self, id: Uuid) -> bool {
        self.buckets.values().any(|bucket| bucket.contains(id))
    }

    /// Current name of a category, looked up in any bucket.
    pub fn category_name(&self, id: Uuid) -> Option<&str> {
        self.buckets
            .values()
            .find_map(|bucket| bucket.category(id))
            .map(|entry| entry.name.as_str())
    }

    pub fn entry(&self, month: MonthKey, id: Uuid) -> Option<&CategoryEntry> {
        self.bucket(month).and_then(|bucket| bucket.category(id))
    }

    /// Creates the bucket for `month` when it is missing.
    ///
    /// The new bucket copies the categories of the greatest existing month with
    /// both amounts at zero. Returns `true` if a bucket was created.
    pub fn insert_month(&mut self, month: MonthKey) -> bool {
        if self.buckets.contains_key(&month) {
            return false;
        }
        let categories = self
            .buckets
            .values()
            .next_back()
            .map(|template| template.categories.iter().map(CategoryEntry::zeroed).collect())
            .unwrap_or_default();
        self.buckets.insert(month, MonthBucket { month, categories });
        true
    }

    /// Adds `entry` to `month` as given and to every other bucket at zero.
    pub fn insert_category(&mut self, month: MonthKey, entry: CategoryEntry) {
        self.insert_month(month);
        for (key, bucket) in self.buckets.iter_mut() {
            if *key == month {
                bucket.categories.push(entry.clone());
            } else {
                bucket.categories.push(entry.zeroed());
            }
        }
    }

    /// Renames the category in every bucket. Returns the number of buckets touched.
    pub fn rename_category(&mut self, id: Uuid, name: &str) -> usize {
        let mut touched = 0;
        for bucket in self.buckets.values_mut() {
            if let Some(entry) = bucket.category_mut(id) {
                entry.name = name.to_string();
                touched += 1;
            }
        }
        touched
    }

    /// Sets the allocation of one category in one month. Returns `false` when
    /// the month or the category is missing.
    pub fn set_allocation(&mut self, month: MonthKey, id: Uuid, allocation: f64) -> bool {
        match self
            .buckets
            .get_mut(&month)
            .and_then(|bucket| bucket.category_mut(id))
        {
            Some(entry) => {
                entry.allocation = allocation;
                true
            }
            None => false,
        }
    }

    /// Sets the actual amount of one category in one month. Returns `false`
    /// when the month or the category is missing.
    pub fn set_actual(&mut self, month: MonthKey, id: Uuid, actual: f64) -> bool {
        match self
            .buckets
            .get_mut(&month)
            .and_then(|bucket| bucket.category_mut(id))
        {
            Some(entry) => {
                entry.actual = actual;
                true
            }
            None => false,
        }
    }

    /// Removes the category from every bucket. Returns the number of entries removed.
    pub fn remove_category(&mut self, id: Uuid) -> usize {
        let mut removed = 0;
        for bucket in self.buckets.values_mut() {
            let before = bucket.categories.len();
            bucket.categories.retain(|entry| entry.id != id);
            removed += before - bucket.categories.len();
        }
        removed
    }
}

/// Why a stored snapshot was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    DuplicateMonth(MonthKey),
    DuplicateCategory { month: MonthKey, id: Uuid },
    BlankName { month: MonthKey, id: Uuid },
    InvalidAmount { month: MonthKey, id: Uuid, amount: f64 },
    NameMismatch { id: Uuid, first: String, other: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::DuplicateMonth(month) => write!(f, "duplicate month bucket {month}"),
            SnapshotError::DuplicateCategory { month, id } => {
                write!(f, "category {id} appears twice in {month}")
            }
            SnapshotError::BlankName { month, id } => {
                write!(f, "category {id} has a blank name in {month}")
            }
            SnapshotError::InvalidAmount { month, id, amount } => {
                write!(f, "category {id} has invalid amount {amount} in {month}")
            }
            SnapshotError::NameMismatch { id, first, other } => {
                write!(f, "category {id} is named both `{first}` and `{other}`")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Rebuilds the bucket map from stored buckets.
///
/// Entries must have a name, finite non-negative amounts, one name per id and
/// no repeated id within a bucket. Categories missing from some months are
/// added there at zero, in the order they first appear.
fn restore_buckets(
    list: Vec<MonthBucket>,
) -> Result<BTreeMap<MonthKey, MonthBucket>, SnapshotError> {
    let mut buckets = BTreeMap::new();
    for bucket in list {
        let month = bucket.month;
        if buckets.insert(month, bucket).is_some() {
            return Err(SnapshotError::DuplicateMonth(month));
        }
    }

    let mut templates: Vec<CategoryEntry> = Vec::new();
    let mut names: HashMap<Uuid, String> = HashMap::new();
    for (&month, bucket) in &buckets {
        let mut seen = HashSet::new();
        for entry in &bucket.categories {
            let id = entry.id;
            if !seen.insert(id) {
                return Err(SnapshotError::DuplicateCategory { month, id });
            }
            if !is_valid_name(&entry.name) {
                return Err(SnapshotError::BlankName { month, id });
            }
            if let Some(amount) = [entry.allocation, entry.actual]
                .into_iter()
                .find(|amount| !is_valid_amount(*amount))
            {
                return Err(SnapshotError::InvalidAmount { month, id, amount });
            }
            match names.get(&id) {
                Some(first) if *first != entry.name => {
                    return Err(SnapshotError::NameMismatch {
                        id,
                        first: first.clone(),
                        other: entry.name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    names.insert(id, entry.name.clone());
                    templates.push(entry.zeroed());
                }
            }
        }
    }

    for bucket in buckets.values_mut() {
        let present: HashSet<Uuid> = bucket.categories.iter().map(|entry| entry.id).collect();
        bucket.categories.extend(
            templates
                .iter()
                .filter(|template| !present.contains(&template.id))
                .cloned(),
        );
    }
    Ok(buckets)
}

/// Buckets are stored as a list ordered by month so the key lives in one place.
mod bucket_list {
    use std::collections::BTreeMap;

    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::{ledger::MonthBucket, month::MonthKey};

    pub fn serialize<S>(
        buckets: &BTreeMap<MonthKey, MonthBucket>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(buckets.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<MonthKey, MonthBucket>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<MonthBucket>::deserialize(deserializer)?;
        super::restore_buckets(list).map_err(de::Error::custom)
    }
}
