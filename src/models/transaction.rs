//! Transaction model
//!
//! A signed money movement on an account, optionally categorized. The
//! `direction` field is authoritative for how the engine buckets a
//! transaction; the sign convention (outflows negative, inflows positive) is
//! enforced by validation but never used as the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// What a transaction does, independent of its sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionDirection {
    /// Money entering an account
    Inflow,
    /// Money leaving an account
    Outflow,
    /// Movement between two own accounts
    AccountTransfer,
    /// A payment toward a credit-card balance
    CreditCardPayment,
    /// Unclassified
    #[default]
    Unknown,
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "Inflow"),
            Self::Outflow => write!(f, "Outflow"),
            Self::AccountTransfer => write!(f, "Transfer"),
            Self::CreditCardPayment => write!(f, "Card Payment"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Category ID (None for uncategorized movements and transfers)
    pub category_id: Option<CategoryId>,

    /// Direction of the movement; authoritative over the amount's sign
    #[serde(default)]
    pub direction: TransactionDirection,

    /// When the movement happened
    pub timestamp: DateTime<Utc>,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        account_id: AccountId,
        amount: Money,
        direction: TransactionDirection,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            amount,
            category_id: None,
            direction,
            timestamp,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an outflow for a category; `amount` is the positive magnitude
    pub fn outflow(
        account_id: AccountId,
        category_id: CategoryId,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut txn = Self::new(
            account_id,
            -amount.abs(),
            TransactionDirection::Outflow,
            timestamp,
        );
        txn.category_id = Some(category_id);
        txn
    }

    /// Create an inflow; `amount` is the positive magnitude
    pub fn inflow(account_id: AccountId, amount: Money, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            account_id,
            amount.abs(),
            TransactionDirection::Inflow,
            timestamp,
        )
    }

    /// Create a credit-card payment booked against the card's payment
    /// category; `amount` is the positive magnitude paid
    pub fn card_payment(
        account_id: AccountId,
        payment_category_id: CategoryId,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut txn = Self::new(
            account_id,
            -amount.abs(),
            TransactionDirection::CreditCardPayment,
            timestamp,
        );
        txn.category_id = Some(payment_category_id);
        txn
    }

    /// Check if this is categorized
    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }

    /// Set the category
    pub fn set_category(&mut self, category_id: CategoryId) {
        self.category_id = Some(category_id);
        self.updated_at = Utc::now();
    }

    /// Validate the sign convention against the direction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        match self.direction {
            TransactionDirection::Inflow if self.amount.is_negative() => {
                Err(TransactionValidationError::SignMismatch {
                    direction: self.direction,
                    amount: self.amount,
                })
            }
            TransactionDirection::Outflow | TransactionDirection::CreditCardPayment
                if self.amount.is_positive() =>
            {
                Err(TransactionValidationError::SignMismatch {
                    direction: self.direction,
                    amount: self.amount,
                })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d"),
            self.direction,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    SignMismatch {
        direction: TransactionDirection,
        amount: Money,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignMismatch { direction, amount } => write!(
                f,
                "Amount {} does not match direction {}",
                amount, direction
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_outflow_constructor_normalizes_sign() {
        let txn = Transaction::outflow(
            AccountId::new(),
            CategoryId::new(),
            Money::from_cents(5000),
            ts(),
        );
        assert_eq!(txn.amount.cents(), -5000);
        assert_eq!(txn.direction, TransactionDirection::Outflow);
        assert!(txn.is_categorized());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_inflow_constructor() {
        let txn = Transaction::inflow(AccountId::new(), Money::from_cents(250000), ts());
        assert_eq!(txn.amount.cents(), 250000);
        assert_eq!(txn.direction, TransactionDirection::Inflow);
        assert!(!txn.is_categorized());
    }

    #[test]
    fn test_card_payment_constructor() {
        let txn = Transaction::card_payment(
            AccountId::new(),
            CategoryId::new(),
            Money::from_cents(30000),
            ts(),
        );
        assert_eq!(txn.amount.cents(), -30000);
        assert_eq!(txn.direction, TransactionDirection::CreditCardPayment);
    }

    #[test]
    fn test_sign_validation() {
        let mut txn = Transaction::new(
            AccountId::new(),
            Money::from_cents(100),
            TransactionDirection::Outflow,
            ts(),
        );
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::SignMismatch { .. })
        ));

        txn.amount = Money::from_cents(-100);
        assert!(txn.validate().is_ok());

        txn.direction = TransactionDirection::Inflow;
        assert!(txn.validate().is_err());
    }

    #[test]
    fn test_transfer_has_no_sign_constraint() {
        let txn = Transaction::new(
            AccountId::new(),
            Money::from_cents(100),
            TransactionDirection::AccountTransfer,
            ts(),
        );
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::outflow(
            AccountId::new(),
            CategoryId::new(),
            Money::from_cents(5000),
            ts(),
        );
        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert_eq!(txn.amount, deserialized.amount);
        assert_eq!(txn.direction, deserialized.direction);
    }
}
