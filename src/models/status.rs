//! Per-category monthly status
//!
//! The central derived record of the engine: for one category and one
//! calendar month, how much was assigned, spent and carried over, what is
//! still available, what the target suggests contributing, and the derived
//! gauge state. Keyed by (category, month) and recomputed from source
//! transactions whenever one of them changes.
//!
//! The record carries no timestamps: rebuilding it from identical inputs
//! must produce an identical value, which is what makes recomputation after
//! every transaction mutation safe.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::month::YearMonth;
use super::progress::Progress;

/// Composite key for status records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusKey {
    pub category_id: CategoryId,
    pub month: YearMonth,
}

impl StatusKey {
    pub fn new(category_id: CategoryId, month: YearMonth) -> Self {
        Self { category_id, month }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category_id, self.month)
    }
}

/// A category's complete financial state for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMonthlyStatus {
    /// The category this status belongs to
    pub category_id: CategoryId,

    /// The month this status describes
    pub month: YearMonth,

    /// Money placed into the category this month; mutated externally by the
    /// assign-money use case, read here
    pub assigned: Money,

    /// Derived: what left the category this month
    pub spent: Money,

    /// Derived: carry-over + assigned (+ card inflow) - spent
    pub available: Money,

    /// Derived: the previous month's available amount, when enabled
    pub carry_over: Money,

    /// Whether unspent money rolls into the next month
    pub carry_over_enabled: bool,

    /// Derived: what the target asks to be contributed this month, if a
    /// target is configured and computable
    pub suggested: Option<Money>,

    /// Derived: gauge state for presentation
    pub progress: Progress,
}

impl CategoryMonthlyStatus {
    /// An empty status for a (category, month) pair
    pub fn empty(category_id: CategoryId, month: YearMonth) -> Self {
        Self {
            category_id,
            month,
            assigned: Money::zero(),
            spent: Money::zero(),
            available: Money::zero(),
            carry_over: Money::zero(),
            carry_over_enabled: true,
            suggested: None,
            progress: Progress::default(),
        }
    }

    /// The record's natural key
    pub fn key(&self) -> StatusKey {
        StatusKey::new(self.category_id, self.month)
    }

    /// Return a copy with a different assigned amount. Derived fields are
    /// stale afterwards; callers rebuild through the status builder.
    pub fn with_assigned(&self, assigned: Money) -> Self {
        Self {
            assigned,
            ..self.clone()
        }
    }

    /// Check if this category is overspent this month
    pub fn is_overspent(&self) -> bool {
        self.available.is_negative()
    }
}

impl fmt::Display for CategoryMonthlyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} assigned: {} | spent: {} | available: {}",
            self.month, self.assigned, self.spent, self.available
        )
    }
}
