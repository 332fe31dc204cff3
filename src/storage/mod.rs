//! Storage collaborators
//!
//! The engine never owns persistence. It consumes these four narrow traits
//! and leaves durability, caching and synchronization to the embedder. Two
//! implementations ship with the crate: an in-memory ledger for tests and
//! embedders that persist elsewhere, and a JSON-file status store with
//! atomic writes.
//!
//! Saving a status is an idempotent upsert keyed by (category, month);
//! racing recalculations may last-write-wins without corruption because the
//! builder produces identical output for identical input.

pub mod json;
pub mod memory;

pub use json::JsonStatusStore;
pub use memory::MemoryLedger;

use crate::error::BudgetResult;
use crate::models::{
    Account, AccountId, Category, CategoryGroup, CategoryId, CategoryMonthlyStatus, Transaction,
    YearMonth,
};

/// Read-only access to transactions
pub trait TransactionSource {
    /// Every transaction of the budget
    fn all(&self) -> BudgetResult<Vec<Transaction>>;

    /// Transactions booked against a category
    fn for_category(&self, category_id: CategoryId) -> BudgetResult<Vec<Transaction>>;

    /// Transactions on an account
    fn for_account(&self, account_id: AccountId) -> BudgetResult<Vec<Transaction>>;
}

/// Persistence for category-month status records
pub trait StatusStore {
    /// Look up the status for a (category, month) pair
    fn get(
        &self,
        category_id: CategoryId,
        month: YearMonth,
    ) -> BudgetResult<Option<CategoryMonthlyStatus>>;

    /// Insert or replace by natural key
    fn upsert(&self, status: CategoryMonthlyStatus) -> BudgetResult<()>;

    /// Delete a status; returns whether one existed
    fn delete(&self, category_id: CategoryId, month: YearMonth) -> BudgetResult<bool>;

    /// All statuses of one month
    fn for_month(&self, month: YearMonth) -> BudgetResult<Vec<CategoryMonthlyStatus>>;

    /// Every persisted status
    fn all(&self) -> BudgetResult<Vec<CategoryMonthlyStatus>>;
}

/// Read-only access to category groups and categories
pub trait CategorySource {
    fn groups(&self) -> BudgetResult<Vec<CategoryGroup>>;

    fn categories(&self) -> BudgetResult<Vec<Category>>;

    fn category(&self, category_id: CategoryId) -> BudgetResult<Option<Category>>;
}

/// Read-only access to accounts
pub trait AccountSource {
    fn accounts(&self) -> BudgetResult<Vec<Account>>;

    fn account(&self, account_id: AccountId) -> BudgetResult<Option<Account>>;
}
