//! Budget-month aggregation
//!
//! Folds the status builder over every category of every group and computes
//! the month's headline figure: how much money is still free to assign.
//! The view is assembled fresh on every query and never persisted.

use tracing::warn;

use crate::error::BudgetResult;
use crate::models::{
    AccountIndex, CategoryBehavior, CategoryGroup, CategoryMonthlyStatus, Money, YearMonth,
};

use super::carryover::carry_over;
use super::status::{BudgetEngine, StatusBuilder};

/// One group with its categories' statuses, in display order
#[derive(Debug, Clone)]
pub struct GroupStatuses {
    pub group: CategoryGroup,
    pub statuses: Vec<CategoryMonthlyStatus>,
}

/// The aggregate view of one budget month
#[derive(Debug, Clone)]
pub struct BudgetMonth {
    pub month: YearMonth,

    /// Sum of all account balances minus everything assigned this month
    pub total_assignable: Money,

    /// Everything assigned across all categories this month
    pub total_assigned: Money,

    /// Groups ordered by list position, categories likewise within each
    pub groups: Vec<GroupStatuses>,
}

impl<'a> BudgetEngine<'a> {
    /// Assemble the aggregate view of one month.
    ///
    /// Persisted statuses are reused as-is; categories without one get a
    /// transient status computed on the fly (and not stored). Status rows
    /// whose category no longer exists are skipped with a warning.
    pub fn budget_month(&self, month: YearMonth) -> BudgetResult<BudgetMonth> {
        let mut groups = self.categories.groups()?;
        groups.sort_by_key(|g| g.list_position);

        let mut categories = self.categories.categories()?;
        categories.sort_by_key(|c| c.list_position);

        let accounts = self.accounts.accounts()?;
        let index = AccountIndex::new(&accounts);
        let transactions = self.transactions.all()?;

        let mut total_assigned = Money::zero();
        let mut group_statuses = Vec::with_capacity(groups.len());

        for group in groups {
            let mut statuses = Vec::new();

            for category in categories.iter().filter(|c| c.group_id == group.id) {
                let status = match self.statuses.get(category.id, month)? {
                    Some(persisted) => persisted,
                    None => {
                        let linked_account =
                            category.linked_account_id.and_then(|id| index.get(id));
                        let previous_available =
                            carry_over(self.statuses, category.id, month)?;
                        StatusBuilder {
                            category,
                            behavior: CategoryBehavior::classify(category, linked_account),
                            month,
                            transactions: &transactions,
                            accounts: &index,
                            existing: None,
                            previous_available,
                            tz: self.tz,
                        }
                        .build()
                    }
                };

                total_assigned += status.assigned;
                statuses.push(status);
            }

            group_statuses.push(GroupStatuses { group, statuses });
        }

        // Orphaned rows: persisted for this month but pointing at a deleted
        // category. Dropped from the view, flagged for the embedder.
        for status in self.statuses.for_month(month)? {
            if self.categories.category(status.category_id)?.is_none() {
                warn!(
                    category_id = %status.category_id,
                    month = %month,
                    "dropping orphaned status from budget month"
                );
            }
        }

        Ok(BudgetMonth {
            month,
            total_assignable: index.total_balance() - total_assigned,
            total_assigned,
            groups: group_statuses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Account, AccountType, Category, CategoryId, CategoryMonthlyStatus, Transaction,
    };
    use crate::storage::{MemoryLedger, StatusStore};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_assignable_is_balances_minus_assigned() {
        let ledger = MemoryLedger::new();
        let checking = Account::with_balance(
            "Checking",
            AccountType::Checking,
            Money::from_cents(100000),
        );
        let savings = Account::with_balance(
            "Savings",
            AccountType::Savings,
            Money::from_cents(50000),
        );
        let group = CategoryGroup::new("Needs");
        let groceries = Category::new("Groceries", group.id);
        let rent = Category::new("Rent", group.id);

        ledger.put_account(checking).unwrap();
        ledger.put_account(savings).unwrap();
        ledger.put_group(group).unwrap();
        ledger.put_category(groceries.clone()).unwrap();
        ledger.put_category(rent.clone()).unwrap();

        let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
        let jan = YearMonth::new(2025, 1);

        engine
            .assign(groceries.id, jan, Money::from_cents(30000))
            .unwrap();
        engine.assign(rent.id, jan, Money::from_cents(50000)).unwrap();

        let overview = engine.budget_month(jan).unwrap();
        assert_eq!(overview.total_assigned.cents(), 80000);
        assert_eq!(overview.total_assignable.cents(), 70000);
    }

    #[test]
    fn test_group_and_category_ordering() {
        let ledger = MemoryLedger::new();
        let first_group = CategoryGroup::with_position("Bills", 1);
        let second_group = CategoryGroup::with_position("Wants", 2);

        let mut rent = Category::new("Rent", first_group.id);
        rent.list_position = 1;
        let mut power = Category::new("Power", first_group.id);
        power.list_position = 2;
        let mut games = Category::new("Games", second_group.id);
        games.list_position = 1;

        // Insert out of order
        ledger.put_group(second_group).unwrap();
        ledger.put_group(first_group).unwrap();
        ledger.put_category(games.clone()).unwrap();
        ledger.put_category(power.clone()).unwrap();
        ledger.put_category(rent.clone()).unwrap();

        let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
        let overview = engine.budget_month(YearMonth::new(2025, 1)).unwrap();

        assert_eq!(overview.groups.len(), 2);
        assert_eq!(overview.groups[0].group.name, "Bills");
        assert_eq!(overview.groups[1].group.name, "Wants");
        assert_eq!(overview.groups[0].statuses[0].category_id, rent.id);
        assert_eq!(overview.groups[0].statuses[1].category_id, power.id);
        assert_eq!(overview.groups[1].statuses[0].category_id, games.id);
    }

    #[test]
    fn test_transient_status_for_unpersisted_category() {
        let ledger = MemoryLedger::new();
        let checking = Account::with_balance(
            "Checking",
            AccountType::Checking,
            Money::from_cents(10000),
        );
        let group = CategoryGroup::new("Needs");
        let groceries = Category::new("Groceries", group.id);

        ledger.put_account(checking.clone()).unwrap();
        ledger.put_group(group).unwrap();
        ledger.put_category(groceries.clone()).unwrap();

        // Spending exists but no status row was ever persisted
        let ts = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        ledger
            .put_transaction(Transaction::outflow(
                checking.id,
                groceries.id,
                Money::from_cents(2500),
                ts,
            ))
            .unwrap();

        let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
        let overview = engine.budget_month(YearMonth::new(2025, 1)).unwrap();

        let status = &overview.groups[0].statuses[0];
        assert_eq!(status.spent.cents(), 2500);
        assert_eq!(status.available.cents(), -2500);

        // The view did not materialize anything
        assert_eq!(ledger.status_count().unwrap(), 0);
    }

    #[test]
    fn test_orphaned_status_is_dropped() {
        let ledger = MemoryLedger::new();
        let group = CategoryGroup::new("Needs");
        let groceries = Category::new("Groceries", group.id);

        ledger.put_group(group).unwrap();
        ledger.put_category(groceries.clone()).unwrap();

        let jan = YearMonth::new(2025, 1);
        let mut orphan = CategoryMonthlyStatus::empty(CategoryId::new(), jan);
        orphan.assigned = Money::from_cents(7777);
        ledger.upsert(orphan).unwrap();

        let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
        let overview = engine.budget_month(jan).unwrap();

        // The orphan's assignment is not in the totals and not in any group
        assert_eq!(overview.total_assigned, Money::zero());
        let listed: usize = overview.groups.iter().map(|g| g.statuses.len()).sum();
        assert_eq!(listed, 1);
        assert_eq!(overview.groups[0].statuses[0].category_id, groceries.id);
    }

    #[test]
    fn test_empty_budget() {
        let ledger = MemoryLedger::new();
        let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
        let overview = engine.budget_month(YearMonth::new(2025, 1)).unwrap();

        assert!(overview.groups.is_empty());
        assert_eq!(overview.total_assigned, Money::zero());
        assert_eq!(overview.total_assignable, Money::zero());
    }
}
