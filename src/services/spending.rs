//! Spent-amount calculators
//!
//! Two ways of answering "what left this category this month", selected by
//! the category's behavior:
//!
//! - a normal category sums its outflows on cash-like accounts;
//! - a credit-card payment category sums the payments made toward the card,
//!   while the card's own spending surfaces separately as the invisible
//!   inflow credited to that payment category.
//!
//! Spending on a credit card never counts as normal category outflow: the
//! cash has not left yet. The card's outflows instead feed
//! [`invisible_inflow`], strictly per card.

use chrono::FixedOffset;

use crate::models::{
    AccountId, AccountIndex, CategoryBehavior, CategoryId, Money, Transaction,
    TransactionDirection, YearMonth,
};

/// Spent-amount calculator, selected once per category from its behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpentCalculator {
    /// Outflows on non-card accounts
    Normal,
    /// Payments toward the linked card
    CreditCardPayment,
}

impl SpentCalculator {
    /// Pick the calculator matching a category's behavior
    pub fn for_behavior(behavior: &CategoryBehavior) -> Self {
        match behavior {
            CategoryBehavior::Normal => Self::Normal,
            CategoryBehavior::CreditCardPayment(_) => Self::CreditCardPayment,
        }
    }

    /// Sum of money that left the category in `month`, as a positive amount
    pub fn spent(
        &self,
        category_id: CategoryId,
        month: YearMonth,
        transactions: &[Transaction],
        accounts: &AccountIndex<'_>,
        tz: FixedOffset,
    ) -> Money {
        match self {
            Self::Normal => normal_spent(category_id, month, transactions, accounts, tz),
            Self::CreditCardPayment => {
                credit_card_spent(category_id, month, transactions, tz)
            }
        }
    }
}

fn in_month(transaction: &Transaction, month: YearMonth, tz: FixedOffset) -> bool {
    YearMonth::from_timestamp(transaction.timestamp, tz) == month
}

/// Outflow total of a normal category: matching category, `Outflow`
/// direction, booked on anything except a credit-card account.
pub fn normal_spent(
    category_id: CategoryId,
    month: YearMonth,
    transactions: &[Transaction],
    accounts: &AccountIndex<'_>,
    tz: FixedOffset,
) -> Money {
    transactions
        .iter()
        .filter(|t| t.category_id == Some(category_id))
        .filter(|t| t.direction == TransactionDirection::Outflow)
        .filter(|t| !accounts.type_of(t.account_id).is_credit_card())
        .filter(|t| in_month(t, month, tz))
        .map(|t| t.amount.abs())
        .sum()
}

/// Debt paid down this month: `CreditCardPayment` transactions booked
/// against the payment category.
pub fn credit_card_spent(
    category_id: CategoryId,
    month: YearMonth,
    transactions: &[Transaction],
    tz: FixedOffset,
) -> Money {
    transactions
        .iter()
        .filter(|t| t.category_id == Some(category_id))
        .filter(|t| t.direction == TransactionDirection::CreditCardPayment)
        .filter(|t| in_month(t, month, tz))
        .map(|t| t.amount.abs())
        .sum()
}

/// Spending on one credit card in one month, regardless of category.
///
/// This is the synthetic inflow credited to that card's payment category so
/// the money to pay the card off gets set aside. Only the given card's
/// outflows count; another card's spending must never leak in here.
pub fn invisible_inflow(
    card_account_id: AccountId,
    month: YearMonth,
    transactions: &[Transaction],
    tz: FixedOffset,
) -> Money {
    transactions
        .iter()
        .filter(|t| t.account_id == card_account_id)
        .filter(|t| t.direction == TransactionDirection::Outflow)
        .filter(|t| in_month(t, month, tz))
        .map(|t| t.amount.abs())
        .sum()
}
