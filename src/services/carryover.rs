//! Carry-over lookup
//!
//! What a category brings into a month is exactly what its previous month's
//! status left available, overspending included. The lookup itself never
//! gates on the carry-over flag; the status builder decides whether the
//! result participates.

use crate::error::BudgetResult;
use crate::models::{CategoryId, Money, YearMonth};
use crate::storage::StatusStore;

/// The amount carried into `month` from the month before: the previous
/// month's persisted available amount, which may be negative, or zero when
/// no status was ever persisted for it.
pub fn carry_over(
    statuses: &dyn StatusStore,
    category_id: CategoryId,
    month: YearMonth,
) -> BudgetResult<Money> {
    Ok(statuses
        .get(category_id, month.prev())?
        .map(|status| status.available)
        .unwrap_or(Money::zero()))
}
