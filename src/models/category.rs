//! Category, CategoryGroup and category behavior
//!
//! Categories are organized into groups for display and carry an optional
//! budget target. A category linked to a credit-card account is that card's
//! payment category and is treated differently by the spent calculators; the
//! distinction is computed once per category as a [`CategoryBehavior`] and
//! threaded explicitly instead of being re-derived in each calculator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::ids::{AccountId, CategoryGroupId, CategoryId};
use super::money::Money;

/// A group of related categories (e.g. "Bills", "Needs", "Wants")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// Group name
    pub name: String,

    /// Sort order for display
    pub list_position: i32,

    /// Whether this group is hidden (collapsed in UI)
    #[serde(default)]
    pub hidden: bool,

    /// When the group was created
    pub created_at: DateTime<Utc>,

    /// When the group was last modified
    pub updated_at: DateTime<Utc>,
}

impl CategoryGroup {
    /// Create a new category group
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryGroupId::new(),
            name: name.into(),
            list_position: 0,
            hidden: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new group with a specific sort order
    pub fn with_position(name: impl Into<String>, list_position: i32) -> Self {
        let mut group = Self::new(name);
        group.list_position = list_position;
        group
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The kind of budget target configured on a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// No target configured
    #[default]
    None,
    /// A flat recurring amount needed every month (bill-style)
    NeededForSpending,
    /// A balance to reach by a date, funded in equal monthly installments
    SavingsBalance,
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::NeededForSpending => write!(f, "Needed for spending"),
            Self::SavingsBalance => write!(f, "Savings balance"),
        }
    }
}

/// A budget category within a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// The group this category belongs to
    pub group_id: CategoryGroupId,

    /// Sort order within the group
    pub list_position: i32,

    /// Whether this category is hidden
    #[serde(default)]
    pub hidden: bool,

    /// Kind of target configured on this category
    #[serde(default)]
    pub target_type: TargetType,

    /// Target amount; required for either target kind to be computable
    pub target_amount: Option<Money>,

    /// Target date; required for a savings-balance target to be computable
    pub target_date: Option<NaiveDate>,

    /// Present exactly when this is the payment category of a credit card
    pub linked_account_id: Option<AccountId>,

    /// Whether unspent money rolls into the next month by default
    #[serde(default = "default_carry_over")]
    pub carry_over_enabled: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_carry_over() -> bool {
    true
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, group_id: CategoryGroupId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            group_id,
            list_position: 0,
            hidden: false,
            target_type: TargetType::None,
            target_amount: None,
            target_date: None,
            linked_account_id: None,
            carry_over_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with a flat monthly spending target
    pub fn with_spending_target(
        name: impl Into<String>,
        group_id: CategoryGroupId,
        amount: Money,
    ) -> Self {
        let mut category = Self::new(name, group_id);
        category.target_type = TargetType::NeededForSpending;
        category.target_amount = Some(amount);
        category
    }

    /// Create a category with a savings-by-date target
    pub fn with_savings_target(
        name: impl Into<String>,
        group_id: CategoryGroupId,
        amount: Money,
        target_date: NaiveDate,
    ) -> Self {
        let mut category = Self::new(name, group_id);
        category.target_type = TargetType::SavingsBalance;
        category.target_amount = Some(amount);
        category.target_date = Some(target_date);
        category
    }

    /// Create the payment category for a credit-card account
    pub fn payment_category(
        name: impl Into<String>,
        group_id: CategoryGroupId,
        linked_account_id: AccountId,
    ) -> Self {
        let mut category = Self::new(name, group_id);
        category.linked_account_id = Some(linked_account_id);
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if let Some(amount) = self.target_amount {
            if amount.is_negative() {
                return Err(CategoryValidationError::NegativeTarget);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How the engine treats a category, decided once and threaded through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryBehavior {
    /// A regular spending category
    Normal,
    /// The payment category of the given credit-card account
    CreditCardPayment(AccountId),
}

impl CategoryBehavior {
    /// Classify a category. `linked_account` is the account resolved from
    /// `category.linked_account_id`, if any.
    ///
    /// A category is a credit-card payment category iff it links to an
    /// account AND that account is a credit card. A dangling link or a link
    /// to any other account type classifies as `Normal`.
    pub fn classify(category: &Category, linked_account: Option<&Account>) -> Self {
        match (category.linked_account_id, linked_account) {
            (Some(id), Some(account))
                if account.id == id && account.account_type.is_credit_card() =>
            {
                Self::CreditCardPayment(id)
            }
            _ => Self::Normal,
        }
    }

    /// The linked card account, when this is a payment category
    pub fn linked_account(&self) -> Option<AccountId> {
        match self {
            Self::Normal => None,
            Self::CreditCardPayment(id) => Some(*id),
        }
    }
}

/// Validation errors for categories and groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeTarget,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeTarget => write!(f, "Target amount cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
