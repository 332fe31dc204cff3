//! monthwise - envelope-style budget calculation engine
//!
//! This library implements the calculation core of an envelope (YNAB-style)
//! budget: given raw transactions, account balances and per-category
//! assignments, it derives the authoritative per-category-per-month
//! financial status, propagates carry-over across months, computes target
//! contributions and maps everything to a presentation-agnostic progress
//! gauge.
//!
//! Everything in the engine is a pure function over in-memory data;
//! persistence, synchronization and presentation live behind the narrow
//! collaborator traits in [`storage`].
//!
//! # Architecture
//!
//! - `config`: path resolution and persisted settings
//! - `error`: custom error types
//! - `models`: money, months, accounts, categories, transactions, statuses
//! - `services`: the calculators, the status builder and the aggregator
//! - `storage`: collaborator traits plus in-memory and JSON implementations
//!
//! # Example
//!
//! ```rust
//! use monthwise::models::{Account, AccountType, Category, CategoryGroup, Money, YearMonth};
//! use monthwise::services::BudgetEngine;
//! use monthwise::storage::MemoryLedger;
//!
//! let ledger = MemoryLedger::new();
//! let group = CategoryGroup::new("Needs");
//! let groceries = Category::new("Groceries", group.id);
//! ledger.put_account(Account::with_balance(
//!     "Checking",
//!     AccountType::Checking,
//!     Money::from_cents(100_000),
//! )).unwrap();
//! ledger.put_group(group).unwrap();
//! ledger.put_category(groceries.clone()).unwrap();
//!
//! let engine = BudgetEngine::new(&ledger, &ledger, &ledger, &ledger);
//! let january = YearMonth::new(2025, 1);
//! engine.assign(groceries.id, january, Money::from_cents(30_000)).unwrap();
//!
//! let month = engine.budget_month(january).unwrap();
//! assert_eq!(month.total_assignable, Money::from_cents(70_000));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
