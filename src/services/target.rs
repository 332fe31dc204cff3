//! Target contribution calculator
//!
//! Turns a category's target configuration into concrete monthly amounts.
//! Two distinct questions are answered:
//!
//! - `monthly_target_amount`: the stable per-month figure of the plan, used
//!   as the gauge's target scale. Recomputing it for a past month must give
//!   the answer that month saw, so everything is anchored at a caller-
//!   supplied month, never at "now".
//! - `contribution`: what still needs to go in this month, given what has
//!   already accumulated.
//!
//! Savings-balance division truncates toward zero; because each month's
//! contribution is recomputed from the amount actually remaining, the
//! truncated cents collect in the final installment instead of drifting.

use chrono::NaiveDate;

use crate::models::{Category, Money, TargetType, YearMonth};

/// The equal-monthly figure a category's target plan asks for, anchored at
/// `anchor`. `None` when no target is configured or required fields are
/// missing.
pub fn monthly_target_amount(category: &Category, anchor: YearMonth) -> Option<Money> {
    match category.target_type {
        TargetType::None => None,
        TargetType::NeededForSpending => category.target_amount,
        TargetType::SavingsBalance => {
            let amount = category.target_amount?;
            let date = category.target_date?;
            let target_month = YearMonth::of(date);
            if target_month < anchor {
                return Some(Money::zero());
            }
            Some(amount.split_across(anchor.months_until(target_month)))
        }
    }
}

/// The contribution still needed in the month `anchor`, given the money
/// already available in the category. `None` when no target is configured
/// or a savings target is missing its amount or date.
pub fn contribution(
    category: &Category,
    available: Money,
    anchor: YearMonth,
) -> Option<Money> {
    match category.target_type {
        TargetType::None => None,
        TargetType::NeededForSpending => category.target_amount,
        TargetType::SavingsBalance => {
            let amount = category.target_amount?;
            let date = category.target_date?;
            Some(savings_contribution(
                amount,
                YearMonth::of(date),
                available,
                anchor,
            ))
        }
    }
}

/// Like [`contribution`], anchored at the current date. A target date of
/// today or earlier asks for nothing more.
pub fn contribution_today(
    category: &Category,
    available: Money,
    today: NaiveDate,
) -> Option<Money> {
    if category.target_type == TargetType::SavingsBalance {
        if let Some(date) = category.target_date {
            if date <= today {
                return Some(Money::zero());
            }
        }
    }
    contribution(category, available, YearMonth::of(today))
}

fn savings_contribution(
    target_amount: Money,
    target_month: YearMonth,
    available: Money,
    anchor: YearMonth,
) -> Money {
    if target_month < anchor {
        return Money::zero();
    }

    let remaining = target_amount - available;
    if !remaining.is_positive() {
        return Money::zero();
    }

    remaining.split_across(anchor.months_until(target_month))
}
