//! In-memory implementation of the storage collaborators
//!
//! Backs every trait with an `RwLock<HashMap>`. Used by the test suite and
//! by embedders that keep their own persistence and just need to hand the
//! engine a working set.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountId, Category, CategoryGroup, CategoryGroupId, CategoryId,
    CategoryMonthlyStatus, StatusKey, Transaction, TransactionId, YearMonth,
};

use super::{AccountSource, CategorySource, StatusStore, TransactionSource};

/// An in-memory budget: accounts, categories, transactions and statuses
#[derive(Default)]
pub struct MemoryLedger {
    accounts: RwLock<HashMap<AccountId, Account>>,
    groups: RwLock<HashMap<CategoryGroupId, CategoryGroup>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
    statuses: RwLock<HashMap<StatusKey, CategoryMonthlyStatus>>,
}

fn lock_err<T>(_: T) -> BudgetError {
    BudgetError::Storage("Lock poisoned".into())
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account
    pub fn put_account(&self, account: Account) -> BudgetResult<()> {
        self.accounts
            .write()
            .map_err(lock_err)?
            .insert(account.id, account);
        Ok(())
    }

    /// Add or replace a category group
    pub fn put_group(&self, group: CategoryGroup) -> BudgetResult<()> {
        self.groups
            .write()
            .map_err(lock_err)?
            .insert(group.id, group);
        Ok(())
    }

    /// Add or replace a category
    pub fn put_category(&self, category: Category) -> BudgetResult<()> {
        self.categories
            .write()
            .map_err(lock_err)?
            .insert(category.id, category);
        Ok(())
    }

    /// Remove a category; statuses pointing at it become orphans
    pub fn remove_category(&self, category_id: CategoryId) -> BudgetResult<bool> {
        Ok(self
            .categories
            .write()
            .map_err(lock_err)?
            .remove(&category_id)
            .is_some())
    }

    /// Add or replace a transaction
    pub fn put_transaction(&self, transaction: Transaction) -> BudgetResult<()> {
        self.transactions
            .write()
            .map_err(lock_err)?
            .insert(transaction.id, transaction);
        Ok(())
    }

    /// Remove a transaction
    pub fn remove_transaction(&self, transaction_id: TransactionId) -> BudgetResult<bool> {
        Ok(self
            .transactions
            .write()
            .map_err(lock_err)?
            .remove(&transaction_id)
            .is_some())
    }

    /// Number of stored statuses
    pub fn status_count(&self) -> BudgetResult<usize> {
        Ok(self.statuses.read().map_err(lock_err)?.len())
    }
}

impl TransactionSource for MemoryLedger {
    fn all(&self) -> BudgetResult<Vec<Transaction>> {
        let transactions = self.transactions.read().map_err(lock_err)?;
        let mut list: Vec<_> = transactions.values().cloned().collect();
        list.sort_by_key(|t| t.timestamp);
        Ok(list)
    }

    fn for_category(&self, category_id: CategoryId) -> BudgetResult<Vec<Transaction>> {
        let transactions = self.transactions.read().map_err(lock_err)?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| t.category_id == Some(category_id))
            .cloned()
            .collect();
        list.sort_by_key(|t| t.timestamp);
        Ok(list)
    }

    fn for_account(&self, account_id: AccountId) -> BudgetResult<Vec<Transaction>> {
        let transactions = self.transactions.read().map_err(lock_err)?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        list.sort_by_key(|t| t.timestamp);
        Ok(list)
    }
}

impl StatusStore for MemoryLedger {
    fn get(
        &self,
        category_id: CategoryId,
        month: YearMonth,
    ) -> BudgetResult<Option<CategoryMonthlyStatus>> {
        let statuses = self.statuses.read().map_err(lock_err)?;
        Ok(statuses.get(&StatusKey::new(category_id, month)).cloned())
    }

    fn upsert(&self, status: CategoryMonthlyStatus) -> BudgetResult<()> {
        self.statuses
            .write()
            .map_err(lock_err)?
            .insert(status.key(), status);
        Ok(())
    }

    fn delete(&self, category_id: CategoryId, month: YearMonth) -> BudgetResult<bool> {
        Ok(self
            .statuses
            .write()
            .map_err(lock_err)?
            .remove(&StatusKey::new(category_id, month))
            .is_some())
    }

    fn for_month(&self, month: YearMonth) -> BudgetResult<Vec<CategoryMonthlyStatus>> {
        let statuses = self.statuses.read().map_err(lock_err)?;
        Ok(statuses
            .values()
            .filter(|s| s.month == month)
            .cloned()
            .collect())
    }

    fn all(&self) -> BudgetResult<Vec<CategoryMonthlyStatus>> {
        let statuses = self.statuses.read().map_err(lock_err)?;
        let mut list: Vec<_> = statuses.values().cloned().collect();
        list.sort_by_key(|s| (s.month, s.category_id.as_uuid().as_u128()));
        Ok(list)
    }
}

impl CategorySource for MemoryLedger {
    fn groups(&self) -> BudgetResult<Vec<CategoryGroup>> {
        let groups = self.groups.read().map_err(lock_err)?;
        let mut list: Vec<_> = groups.values().cloned().collect();
        list.sort_by_key(|g| g.list_position);
        Ok(list)
    }

    fn categories(&self) -> BudgetResult<Vec<Category>> {
        let categories = self.categories.read().map_err(lock_err)?;
        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by_key(|c| c.list_position);
        Ok(list)
    }

    fn category(&self, category_id: CategoryId) -> BudgetResult<Option<Category>> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories.get(&category_id).cloned())
    }
}

impl AccountSource for MemoryLedger {
    fn accounts(&self) -> BudgetResult<Vec<Account>> {
        let accounts = self.accounts.read().map_err(lock_err)?;
        let mut list: Vec<_> = accounts.values().cloned().collect();
        list.sort_by_key(|a| a.list_position);
        Ok(list)
    }

    fn account(&self, account_id: AccountId) -> BudgetResult<Option<Account>> {
        let accounts = self.accounts.read().map_err(lock_err)?;
        Ok(accounts.get(&account_id).cloned())
    }
}
