//! Status builder and the budget engine
//!
//! [`StatusBuilder`] is the pure core: given a category, its transactions,
//! the persisted state of the same month and the carry-over lookup result,
//! it assembles the complete [`CategoryMonthlyStatus`] with no I/O and no
//! clock. Identical inputs give an identical record, so recomputing after
//! every transaction mutation is safe and racing writers can
//! last-write-wins at the store.
//!
//! [`BudgetEngine`] is the calling layer: it fetches inputs from the storage
//! collaborators, runs the builder and persists the result.

use chrono::FixedOffset;
use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    AccountIndex, Category, CategoryBehavior, CategoryId, CategoryMonthlyStatus, Money,
    Progress, Transaction, YearMonth,
};
use crate::storage::{AccountSource, CategorySource, StatusStore, TransactionSource};

use super::carryover::carry_over;
use super::spending::{invisible_inflow, SpentCalculator};
use super::target;

/// Pure assembly of one category-month status record
pub struct StatusBuilder<'a> {
    /// The category being computed
    pub category: &'a Category,
    /// The category's behavior, classified once by the caller
    pub behavior: CategoryBehavior,
    /// The month being computed
    pub month: YearMonth,
    /// The budget's transactions
    pub transactions: &'a [Transaction],
    /// Account lookup for resolving transaction account types
    pub accounts: &'a AccountIndex<'a>,
    /// The already-persisted status for this (category, month), if any;
    /// source of the externally-mutated assigned amount and flag
    pub existing: Option<&'a CategoryMonthlyStatus>,
    /// Result of the carry-over lookup for this month (the previous month's
    /// available amount, or zero), before the enabled-flag gating applied
    /// here
    pub previous_available: Money,
    /// Zone used to bucket transaction timestamps into months
    pub tz: FixedOffset,
}

impl<'a> StatusBuilder<'a> {
    /// Assemble the status record.
    ///
    /// `available = carry-over + assigned + card inflow - spent`, where the
    /// card inflow is zero for normal categories and the carry-over is zero
    /// when disabled.
    pub fn build(&self) -> CategoryMonthlyStatus {
        let spent = SpentCalculator::for_behavior(&self.behavior).spent(
            self.category.id,
            self.month,
            self.transactions,
            self.accounts,
            self.tz,
        );

        let card_inflow = match self.behavior.linked_account() {
            Some(card_id) => {
                invisible_inflow(card_id, self.month, self.transactions, self.tz)
            }
            None => Money::zero(),
        };

        let assigned = self
            .existing
            .map(|s| s.assigned)
            .unwrap_or_else(Money::zero);
        let carry_over_enabled = self
            .existing
            .map(|s| s.carry_over_enabled)
            .unwrap_or(self.category.carry_over_enabled);

        let carry_over = if carry_over_enabled {
            self.previous_available
        } else {
            Money::zero()
        };

        let available = carry_over + assigned + card_inflow - spent;
        let suggested = target::contribution(self.category, available, self.month);
        let monthly_target = target::monthly_target_amount(self.category, self.month)
            .unwrap_or_else(Money::zero);

        CategoryMonthlyStatus {
            category_id: self.category.id,
            month: self.month,
            assigned,
            spent,
            available,
            carry_over,
            carry_over_enabled,
            suggested,
            progress: Progress::compute(monthly_target, assigned, available),
        }
    }
}

/// The engine's stateful entry point: wires the storage collaborators to the
/// pure builder
pub struct BudgetEngine<'a> {
    pub(crate) transactions: &'a dyn TransactionSource,
    pub(crate) statuses: &'a dyn StatusStore,
    pub(crate) categories: &'a dyn CategorySource,
    pub(crate) accounts: &'a dyn AccountSource,
    pub(crate) tz: FixedOffset,
}

impl<'a> BudgetEngine<'a> {
    /// Create an engine over the four collaborators, bucketing months in UTC
    pub fn new(
        transactions: &'a dyn TransactionSource,
        statuses: &'a dyn StatusStore,
        categories: &'a dyn CategorySource,
        accounts: &'a dyn AccountSource,
    ) -> Self {
        Self {
            transactions,
            statuses,
            categories,
            accounts,
            tz: FixedOffset::east_opt(0).unwrap(),
        }
    }

    /// Use an explicit zone for timestamp-to-month bucketing
    pub fn with_time_zone(mut self, tz: FixedOffset) -> Self {
        self.tz = tz;
        self
    }

    /// Recompute and persist the status of one (category, month) pair.
    ///
    /// Call after any transaction affecting the pair was added, edited or
    /// removed. The upsert replaces by key, so repeated calls are harmless.
    pub fn recalculate(
        &self,
        category_id: CategoryId,
        month: YearMonth,
    ) -> BudgetResult<CategoryMonthlyStatus> {
        let category = self
            .categories
            .category(category_id)?
            .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;

        let accounts = self.accounts.accounts()?;
        let index = AccountIndex::new(&accounts);
        let linked_account = category.linked_account_id.and_then(|id| index.get(id));
        let behavior = CategoryBehavior::classify(&category, linked_account);

        let transactions = self.transactions.all()?;
        let existing = self.statuses.get(category_id, month)?;
        let previous_available = carry_over(self.statuses, category_id, month)?;

        let status = StatusBuilder {
            category: &category,
            behavior,
            month,
            transactions: &transactions,
            accounts: &index,
            existing: existing.as_ref(),
            previous_available,
            tz: self.tz,
        }
        .build();

        self.statuses.upsert(status.clone())?;
        debug!(
            category = %category.name,
            month = %month,
            available = %status.available,
            "recalculated category status"
        );

        Ok(status)
    }

    /// Recompute every category's status for one month
    pub fn recalculate_month(
        &self,
        month: YearMonth,
    ) -> BudgetResult<Vec<CategoryMonthlyStatus>> {
        let categories = self.categories.categories()?;
        let mut results = Vec::with_capacity(categories.len());
        for category in &categories {
            results.push(self.recalculate(category.id, month)?);
        }
        Ok(results)
    }

    /// Set the money assigned to a category for a month, then rebuild.
    ///
    /// This is the one status field the engine does not derive; everything
    /// downstream of it is recomputed immediately.
    pub fn assign(
        &self,
        category_id: CategoryId,
        month: YearMonth,
        amount: Money,
    ) -> BudgetResult<CategoryMonthlyStatus> {
        if amount.is_negative() {
            return Err(BudgetError::Validation(
                "Assigned amount cannot be negative".into(),
            ));
        }

        let current = self
            .statuses
            .get(category_id, month)?
            .unwrap_or_else(|| CategoryMonthlyStatus::empty(category_id, month));
        self.statuses.upsert(current.with_assigned(amount))?;

        self.recalculate(category_id, month)
    }

    /// Enable or disable carry-over for a (category, month) pair, then
    /// rebuild
    pub fn set_carry_over_enabled(
        &self,
        category_id: CategoryId,
        month: YearMonth,
        enabled: bool,
    ) -> BudgetResult<CategoryMonthlyStatus> {
        let mut current = self
            .statuses
            .get(category_id, month)?
            .unwrap_or_else(|| CategoryMonthlyStatus::empty(category_id, month));
        current.carry_over_enabled = enabled;
        self.statuses.upsert(current)?;

        self.recalculate(category_id, month)
    }

    /// Month-close propagation: push every carry-enabled category's
    /// available amount of `from` into `to`, creating next-month statuses
    /// where none exist and preserving assignments where they do.
    ///
    /// Rebuilding derives the carry from `from`'s persisted available
    /// amount, so running this twice changes nothing. Statuses whose
    /// category has been deleted are skipped.
    ///
    /// Returns the number of categories propagated.
    pub fn carry_over_to_next_month(
        &self,
        from: YearMonth,
        to: YearMonth,
    ) -> BudgetResult<usize> {
        if to != from.next() {
            return Err(BudgetError::Validation(format!(
                "Carry-over target {} is not the month after {}",
                to, from
            )));
        }

        let mut propagated = 0;
        for status in self.statuses.for_month(from)? {
            if !status.carry_over_enabled {
                continue;
            }

            match self.recalculate(status.category_id, to) {
                Ok(_) => propagated += 1,
                Err(err) if err.is_not_found() => {
                    warn!(
                        category_id = %status.category_id,
                        month = %from,
                        "skipping carry-over for orphaned status"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        debug!(from = %from, to = %to, propagated, "carried over month");
        Ok(propagated)
    }

    /// Remove the persisted status of a (category, month) pair
    pub fn delete_status(
        &self,
        category_id: CategoryId,
        month: YearMonth,
    ) -> BudgetResult<bool> {
        self.statuses.delete(category_id, month)
    }
}
