//! Progress bars and user hints derived from a category's monthly numbers
//!
//! A toolkit-agnostic description of the two-bar budget gauge: fill
//! fractions, discrete color tags and a single categorical hint. The mapping
//! from (target, assigned, available) to a `Progress` is a fixed decision
//! table; every branch is pinned down by tests.
//!
//! Both bars are drawn against the same total width, the larger of the
//! monthly target and the assigned amount, so target and assignment stay
//! visually comparable. The "lite" fills are ghost overlays showing how much
//! of the money is already gone.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Discrete color tag for a bar or its lite overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    #[default]
    Grey,
    Yellow,
    Green,
    GreenLite,
    Red,
    Primary,
}

/// The single actionable hint shown next to the gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum UserHint {
    /// Nothing to say
    #[default]
    NoHint,
    /// Some of the assigned money is spent
    Spent(Money),
    /// Every assigned cent is spent
    AllSpent,
    /// Overspent with money assigned: add funds or remove spending
    AssignMoreOrRemoveSpending(Money),
    /// Overspent with nothing assigned
    SpentMoreThanAvailable(Money),
    /// The monthly target is not yet fully assigned
    MoreNeedForBudgetTarget(Money),
    /// The monthly target is exactly met
    FullyFunded,
    /// More is assigned than the target asks for
    ExtraMoney(Money),
}

/// Presentation-agnostic two-bar progress state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub bar1: f64,
    pub bar1_lite: f64,
    pub bar2: f64,
    pub bar2_lite: f64,
    pub bar1_color: BarColor,
    pub bar1_lite_color: BarColor,
    pub bar2_color: BarColor,
    pub bar2_lite_color: BarColor,
    pub show_color_on_second_bar: bool,
    pub hint: UserHint,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            bar1: 0.0,
            bar1_lite: 0.0,
            bar2: 0.0,
            bar2_lite: 0.0,
            bar1_color: BarColor::Grey,
            bar1_lite_color: BarColor::GreenLite,
            bar2_color: BarColor::Grey,
            bar2_lite_color: BarColor::GreenLite,
            show_color_on_second_bar: false,
            hint: UserHint::NoHint,
        }
    }
}

/// Fill fraction `numerator / denominator`, clamped to 0..=1.
fn fraction(numerator: Money, denominator: Money) -> f64 {
    if !denominator.is_positive() {
        return 0.0;
    }
    (numerator.cents() as f64 / denominator.cents() as f64).clamp(0.0, 1.0)
}

impl Progress {
    /// Map a category's monthly numbers to the gauge state.
    ///
    /// `target` is the monthly target amount (zero when no target is
    /// configured), `assigned` the money placed into the category this month
    /// and `available` what is currently usable (carry-over + assigned +
    /// card inflow - spent).
    pub fn compute(target: Money, assigned: Money, available: Money) -> Self {
        if target.is_positive() {
            Self::compute_with_target(target, assigned, available)
        } else {
            Self::compute_without_target(assigned, available)
        }
    }

    fn compute_without_target(assigned: Money, available: Money) -> Self {
        let mut progress = Progress::default();

        if !assigned.is_positive() {
            if available.is_negative() {
                // Spending without any assignment
                progress.bar1 = 1.0;
                progress.bar1_color = BarColor::Red;
                progress.hint = UserHint::SpentMoreThanAvailable(available.abs());
            } else if available.is_positive() {
                // Carried-over money only, still untouched
                progress.bar1 = 1.0;
                progress.bar1_color = BarColor::Green;
            }
            // Nothing assigned, nothing available: the empty default
            return progress;
        }

        if available.is_negative() {
            progress.bar1 = 1.0;
            progress.bar1_lite = 1.0;
            progress.bar1_color = BarColor::Red;
            progress.hint = UserHint::AssignMoreOrRemoveSpending(available.abs());
        } else if available.is_zero() {
            progress.bar1 = 1.0;
            progress.bar1_lite = 1.0;
            progress.bar1_color = BarColor::Green;
            progress.hint = UserHint::AllSpent;
        } else if available < assigned {
            let spent = assigned - available;
            progress.bar1 = 1.0;
            progress.bar1_lite = fraction(spent, assigned);
            progress.bar1_color = BarColor::Green;
            progress.hint = UserHint::Spent(spent);
        } else {
            // Everything assigned is still there (or grew via carry-over)
            progress.bar1 = 1.0;
            progress.bar1_color = BarColor::Green;
        }

        progress
    }

    fn compute_with_target(target: Money, assigned: Money, available: Money) -> Self {
        let mut progress = Progress::default();

        if assigned < target {
            // Under-assigned: a single bar on the target scale
            progress.bar1 = fraction(assigned, target);
            if available.is_negative() {
                progress.bar1_color = BarColor::Red;
                progress.hint = if assigned.is_positive() {
                    UserHint::AssignMoreOrRemoveSpending(available.abs())
                } else {
                    UserHint::SpentMoreThanAvailable(available.abs())
                };
            } else {
                progress.bar1_color = if assigned.is_positive() {
                    BarColor::Yellow
                } else {
                    BarColor::Grey
                };
                progress.hint = UserHint::MoreNeedForBudgetTarget(target - assigned);
            }
            return progress;
        }

        if assigned == target {
            progress.bar1 = 1.0;
            if available.is_negative() {
                progress.bar1_lite = 1.0;
                progress.bar1_color = BarColor::Red;
                progress.hint = UserHint::AssignMoreOrRemoveSpending(available.abs());
            } else {
                progress.bar1_color = BarColor::Green;
                if available < assigned {
                    progress.bar1_lite = fraction(assigned - available, assigned);
                }
                progress.hint = UserHint::FullyFunded;
            }
            return progress;
        }

        // Over-assigned: both bars live on the assigned scale, the first
        // marking the target boundary, the second carrying the state of the
        // money beyond it.
        let boundary = fraction(target, assigned);
        progress.bar1 = boundary;
        progress.bar1_color = if available >= assigned {
            BarColor::Green
        } else {
            BarColor::GreenLite
        };
        progress.bar2 = boundary;
        progress.show_color_on_second_bar = true;

        if available.is_negative() {
            progress.bar2_lite = boundary;
            progress.bar2_color = BarColor::Red;
            progress.hint = UserHint::AssignMoreOrRemoveSpending(available.abs());
        } else {
            progress.bar2_color = BarColor::Primary;
            progress.hint = UserHint::ExtraMoney(assigned - target);
        }

        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_no_target_fully_available() {
        let p = Progress::compute(Money::zero(), money(10000), money(10000));
        assert_eq!(p.bar1, 1.0);
        assert_eq!(p.bar1_lite, 0.0);
        assert_eq!(p.bar1_color, BarColor::Green);
        assert_eq!(p.hint, UserHint::NoHint);
    }

    #[test]
    fn test_no_target_partially_spent() {
        // assigned 100.00, available 80.00 -> lite overlay 0.2, Spent(20.00)
        let p = Progress::compute(Money::zero(), money(10000), money(8000));
        assert_eq!(p.bar1, 1.0);
        assert!((p.bar1_lite - 0.2).abs() < 1e-9);
        assert_eq!(p.bar1_color, BarColor::Green);
        assert_eq!(p.bar1_lite_color, BarColor::GreenLite);
        assert_eq!(p.hint, UserHint::Spent(money(2000)));
    }

    #[test]
    fn test_no_target_all_spent() {
        let p = Progress::compute(Money::zero(), money(10000), Money::zero());
        assert_eq!(p.bar1, 1.0);
        assert_eq!(p.bar1_lite, 1.0);
        assert_eq!(p.hint, UserHint::AllSpent);
    }

    #[test]
    fn test_no_target_overspent_with_assignment() {
        let p = Progress::compute(Money::zero(), money(10000), money(-2500));
        assert_eq!(p.bar1_color, BarColor::Red);
        assert_eq!(p.hint, UserHint::AssignMoreOrRemoveSpending(money(2500)));
    }

    #[test]
    fn test_no_target_overspent_without_assignment() {
        let p = Progress::compute(Money::zero(), Money::zero(), money(-2500));
        assert_eq!(p.bar1, 1.0);
        assert_eq!(p.bar1_color, BarColor::Red);
        assert_eq!(p.hint, UserHint::SpentMoreThanAvailable(money(2500)));
    }

    #[test]
    fn test_no_target_untouched_carry_over_only() {
        let p = Progress::compute(Money::zero(), Money::zero(), money(4200));
        assert_eq!(p.bar1, 1.0);
        assert_eq!(p.bar1_color, BarColor::Green);
        assert_eq!(p.hint, UserHint::NoHint);
    }

    #[test]
    fn test_no_target_empty() {
        let p = Progress::compute(Money::zero(), Money::zero(), Money::zero());
        assert_eq!(p, Progress::default());
    }

    #[test]
    fn test_target_under_assigned() {
        let p = Progress::compute(money(10000), money(4000), money(4000));
        assert!((p.bar1 - 0.4).abs() < 1e-9);
        assert_eq!(p.bar1_color, BarColor::Yellow);
        assert_eq!(p.hint, UserHint::MoreNeedForBudgetTarget(money(6000)));
    }

    #[test]
    fn test_target_nothing_assigned_yet() {
        let p = Progress::compute(money(10000), Money::zero(), Money::zero());
        assert_eq!(p.bar1, 0.0);
        assert_eq!(p.bar1_color, BarColor::Grey);
        assert_eq!(p.hint, UserHint::MoreNeedForBudgetTarget(money(10000)));
    }

    #[test]
    fn test_target_under_assigned_and_overspent() {
        let p = Progress::compute(money(10000), money(4000), money(-1000));
        assert_eq!(p.bar1_color, BarColor::Red);
        assert_eq!(p.hint, UserHint::AssignMoreOrRemoveSpending(money(1000)));
    }

    #[test]
    fn test_target_exactly_met() {
        let p = Progress::compute(money(10000), money(10000), money(10000));
        assert_eq!(p.bar1, 1.0);
        assert_eq!(p.bar1_color, BarColor::Green);
        assert_eq!(p.hint, UserHint::FullyFunded);
    }

    #[test]
    fn test_target_met_and_partially_spent_keeps_funded_hint() {
        let p = Progress::compute(money(10000), money(10000), money(2500));
        assert_eq!(p.bar1, 1.0);
        assert!((p.bar1_lite - 0.75).abs() < 1e-9);
        assert_eq!(p.hint, UserHint::FullyFunded);
    }

    #[test]
    fn test_target_over_assigned_extra_money() {
        // target 100.00, assigned 120.00, untouched
        let p = Progress::compute(money(10000), money(12000), money(12000));
        let boundary = 10000.0 / 12000.0;
        assert!((p.bar1 - boundary).abs() < 1e-9);
        assert_eq!(p.bar1_color, BarColor::Green);
        assert!((p.bar2 - boundary).abs() < 1e-9);
        assert_eq!(p.bar2_color, BarColor::Primary);
        assert!(p.show_color_on_second_bar);
        assert_eq!(p.hint, UserHint::ExtraMoney(money(2000)));
    }

    #[test]
    fn test_target_over_assigned_and_overspent_scenario() {
        // budgetTarget=100, assignedMoney=120, availableMoney=-20 (spent 140)
        let p = Progress::compute(money(10000), money(12000), money(-2000));
        let boundary = 10000.0 / 12000.0;

        assert!((p.bar1 - boundary).abs() < 1e-9);
        assert_eq!(p.bar1_lite, 0.0);
        assert_eq!(p.bar1_color, BarColor::GreenLite);

        assert!((p.bar2 - boundary).abs() < 1e-9);
        assert!((p.bar2_lite - boundary).abs() < 1e-9);
        assert_eq!(p.bar2_color, BarColor::Red);
        assert!(p.show_color_on_second_bar);

        assert_eq!(p.hint, UserHint::AssignMoreOrRemoveSpending(money(2000)));
    }

    #[test]
    fn test_fraction_clamps() {
        assert_eq!(fraction(money(200), money(100)), 1.0);
        assert_eq!(fraction(money(-50), money(100)), 0.0);
        assert_eq!(fraction(money(50), Money::zero()), 0.0);
    }

    #[test]
    fn test_serialization() {
        let p = Progress::compute(money(10000), money(12000), money(-2000));
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }
}
