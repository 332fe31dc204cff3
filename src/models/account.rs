//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, etc.)
//! The engine only reads accounts: balances feed the assignable-money total,
//! and the account type decides whether spending counts as cash outflow or
//! credit-card debt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Cash/wallet
    Cash,
    /// Checking account
    #[default]
    Checking,
    /// Savings account
    Savings,
    /// Credit card
    CreditCard,
    /// Securities depot
    Depot,
    /// Mortgage
    Mortgage,
    /// Loan
    Loan,
    /// Unclassified account type
    Unknown,
}

impl AccountType {
    /// Credit-card accounts get the invisible-inflow treatment: spending on
    /// them does not reduce cash on hand, so the normal spent calculator must
    /// skip them entirely.
    pub fn is_credit_card(&self) -> bool {
        matches!(self, Self::CreditCard)
    }

    /// Returns true for account types that represent debt
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::CreditCard | Self::Mortgage | Self::Loan)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::CreditCard),
            "depot" => Some(Self::Depot),
            "mortgage" => Some(Self::Mortgage),
            "loan" => Some(Self::Loan),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Depot => write!(f, "Depot"),
            Self::Mortgage => write!(f, "Mortgage"),
            Self::Loan => write!(f, "Loan"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g. "Chase Checking")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance
    pub balance: Money,

    /// Sort order for display
    #[serde(default)]
    pub list_position: i32,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance: Money::zero(),
            list_position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with a balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type);
        account.balance = balance;
        account
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Borrowed id -> account lookup built once per calculation pass.
///
/// Calculators resolve a transaction's account type through this; a
/// transaction pointing at a vanished account reads as `Unknown`.
pub struct AccountIndex<'a> {
    by_id: HashMap<AccountId, &'a Account>,
}

impl<'a> AccountIndex<'a> {
    /// Build an index over a slice of accounts
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            by_id: accounts.iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Look up an account by id
    pub fn get(&self, id: AccountId) -> Option<&'a Account> {
        self.by_id.get(&id).copied()
    }

    /// The account's type, or `Unknown` when the account is missing
    pub fn type_of(&self, id: AccountId) -> AccountType {
        self.get(id)
            .map(|a| a.account_type)
            .unwrap_or(AccountType::Unknown)
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> Money {
        self.by_id.values().map(|a| a.balance).sum()
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking", AccountType::Checking);
        assert_eq!(account.name, "Checking");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.balance, Money::zero());
    }

    #[test]
    fn test_with_balance() {
        let account =
            Account::with_balance("Savings", AccountType::Savings, Money::from_cents(100000));
        assert_eq!(account.balance.cents(), 100000);
    }

    #[test]
    fn test_account_type_checks() {
        assert!(AccountType::CreditCard.is_credit_card());
        assert!(!AccountType::Checking.is_credit_card());

        assert!(AccountType::CreditCard.is_liability());
        assert!(AccountType::Mortgage.is_liability());
        assert!(AccountType::Loan.is_liability());
        assert!(!AccountType::Cash.is_liability());
        assert!(!AccountType::Depot.is_liability());
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(
            AccountType::parse("credit_card"),
            Some(AccountType::CreditCard)
        );
        assert_eq!(AccountType::parse("Depot"), Some(AccountType::Depot));
        assert_eq!(AccountType::parse("invalid"), None);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name", AccountType::Checking);
        assert!(account.validate().is_ok());

        account.name = String::new();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_account_index() {
        let checking =
            Account::with_balance("Checking", AccountType::Checking, Money::from_cents(50000));
        let card = Account::with_balance(
            "Visa",
            AccountType::CreditCard,
            Money::from_cents(-20000),
        );
        let accounts = vec![checking.clone(), card.clone()];
        let index = AccountIndex::new(&accounts);

        assert_eq!(index.type_of(checking.id), AccountType::Checking);
        assert_eq!(index.type_of(card.id), AccountType::CreditCard);
        assert_eq!(index.type_of(AccountId::new()), AccountType::Unknown);
        assert_eq!(index.total_balance().cents(), 30000);
    }

    #[test]
    fn test_serialization() {
        let account = Account::new("Test", AccountType::Cash);
        let json = serde_json::to_string(&account).unwrap();
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.id, deserialized.id);
        assert_eq!(account.account_type, deserialized.account_type);
    }
}
