//! Domain types representing budget categories and savings goals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One category as seen from a single month bucket.
///
/// `id` and `name` are shared with every other bucket holding the category;
/// `allocation` and `actual` belong to this bucket alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryEntry {
    pub id: Uuid,
    pub name: String,
    pub allocation: f64,
    #[serde(default)]
    pub actual: f64,
}

impl CategoryEntry {
    pub fn new(name: impl Into<String>, allocation: f64) -> Self {
        Self::with_id(Uuid::new_v4(), name, allocation)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>, allocation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            allocation,
            actual: 0.0,
        }
    }

    /// Copy of this entry carrying the same identity with both amounts at zero.
    pub fn zeroed(&self) -> Self {
        Self::with_id(self.id, self.name.clone(), 0.0)
    }
}

/// Partial change to a category. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<f64>,
}

impl CategoryUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            allocation: None,
        }
    }

    pub fn allocate(allocation: f64) -> Self {
        Self {
            name: None,
            allocation: Some(allocation),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_allocation(mut self, allocation: f64) -> Self {
        self.allocation = Some(allocation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.allocation.is_none()
    }
}
