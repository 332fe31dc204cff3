//! The calculation engine
//!
//! Pure, deterministic computations over in-memory data: spent amounts,
//! carry-over, target contributions, the per-category status builder and the
//! budget-month aggregate. [`BudgetEngine`] wires them to the storage
//! collaborators.

pub mod carryover;
pub mod overview;
pub mod spending;
pub mod status;
pub mod target;

pub use carryover::carry_over;
pub use overview::{BudgetMonth, GroupStatuses};
pub use spending::{credit_card_spent, invisible_inflow, normal_spent, SpentCalculator};
pub use status::{BudgetEngine, StatusBuilder};
pub use target::{contribution, contribution_today, monthly_target_amount};
