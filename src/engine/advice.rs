//! Rule-based budgeting advice.
//!
//! Each rule is an independent predicate over a `FinancialSnapshot` (and `DebtMetrics` when the
//! user has debts). Every rule that matches contributes one `Recommendation`, in the order the
//! rules are declared in `RULES`. When nothing matches, a single "well balanced" recommendation is
//! returned instead, so the result is never empty.

use crate::engine::{saturating_div, DebtMetrics, FinancialSnapshot};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Normal,
}

serde_plain::derive_display_from_serialize!(Priority);

/// A piece of advice produced by one rule.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Recommendation {
    /// Identifies the rule that produced this recommendation.
    pub rule: &'static str,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub suggested_action: String,
}

pub const OVERSPENDING: &str = "overspending";
pub const LOW_SAVINGS_RATE: &str = "low_savings_rate";
pub const DOMINANT_CATEGORY: &str = "dominant_category";
pub const DEBT_UNAFFORDABLE: &str = "debt_unaffordable";
pub const DEBT_PAYOFF: &str = "debt_payoff";
pub const WELL_BALANCED: &str = "well_balanced";

/// Savings below this share of income triggers `low_savings_rate`.
fn savings_target() -> Decimal {
    Decimal::new(20, 2)
}

/// A category above this share of expenses triggers `dominant_category`.
fn dominance_threshold() -> Decimal {
    Decimal::new(40, 2)
}

/// Suggested actions for well-known categories. Anything else gets `GENERIC_CATEGORY_TIP`.
const CATEGORY_TIPS: &[(&str, &str)] = &[
    (
        "Food & Dining",
        "Plan meals for the week, cook at home more often and set a dining-out limit.",
    ),
    (
        "Shopping",
        "Wait 48 hours before non-essential purchases and unsubscribe from retailer emails.",
    ),
    (
        "Transportation",
        "Combine errands, compare fuel prices and consider carpooling or public transit.",
    ),
    (
        "Entertainment",
        "Audit your subscriptions and look for free or low-cost activities.",
    ),
    (
        "Bills & Utilities",
        "Shop around for cheaper plans and ask providers about loyalty discounts.",
    ),
    (
        "Housing",
        "Review your rent or mortgage terms and look into refinancing or a roommate.",
    ),
];

const GENERIC_CATEGORY_TIP: &str =
    "Set a monthly cap for this category and track it weekly to catch overruns early.";

struct Facts<'a> {
    snapshot: &'a FinancialSnapshot,
    debt: Option<&'a DebtMetrics>,
}

struct Advice {
    title: String,
    description: String,
    suggested_action: String,
}

struct Rule {
    id: &'static str,
    priority: Priority,
    applies: fn(&Facts<'_>) -> bool,
    advise: fn(&Facts<'_>) -> Advice,
}

const RULES: &[Rule] = &[
    Rule {
        id: OVERSPENDING,
        priority: Priority::Urgent,
        applies: |f| f.snapshot.balance < Decimal::ZERO,
        advise: overspending,
    },
    Rule {
        id: LOW_SAVINGS_RATE,
        priority: Priority::Normal,
        applies: |f| f.snapshot.savings_rate < savings_target(),
        advise: low_savings_rate,
    },
    Rule {
        id: DOMINANT_CATEGORY,
        priority: Priority::Normal,
        applies: |f| {
            f.snapshot.dominant.is_some()
                && f.snapshot.dominant_category_amount()
                    > f.snapshot.total_expenses.saturating_mul(dominance_threshold())
        },
        advise: dominant_category,
    },
    Rule {
        id: DEBT_UNAFFORDABLE,
        priority: Priority::Urgent,
        applies: |f| {
            f.debt
                .is_some_and(|d| d.monthly_minimum > Decimal::ZERO && !d.affordable)
        },
        advise: debt_unaffordable,
    },
    Rule {
        id: DEBT_PAYOFF,
        priority: Priority::Normal,
        applies: |f| {
            f.debt.is_some_and(|d| {
                d.total_debt > Decimal::ZERO && d.payoff_months_estimate.is_some()
            })
        },
        advise: debt_payoff,
    },
];

/// Evaluates every rule against `snapshot` and `debt_metrics` and returns the matching
/// recommendations in rule order, or a single `well_balanced` recommendation if none match.
pub fn generate_recommendations(
    snapshot: &FinancialSnapshot,
    debt_metrics: Option<&DebtMetrics>,
) -> Vec<Recommendation> {
    let facts = Facts {
        snapshot,
        debt: debt_metrics,
    };

    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| (rule.applies)(&facts))
        .map(|rule| rule.recommend(&facts))
        .collect();

    if recommendations.is_empty() {
        let fallback = Rule {
            id: WELL_BALANCED,
            priority: Priority::Normal,
            applies: |_| true,
            advise: well_balanced,
        };
        recommendations.push(fallback.recommend(&facts));
    }
    recommendations
}

impl Rule {
    fn recommend(&self, facts: &Facts<'_>) -> Recommendation {
        let advice = (self.advise)(facts);
        Recommendation {
            rule: self.id,
            priority: self.priority,
            title: advice.title,
            description: advice.description,
            suggested_action: advice.suggested_action,
        }
    }
}

fn overspending(f: &Facts<'_>) -> Advice {
    Advice {
        title: "Address overspending".to_string(),
        description: format!(
            "Your expenses exceed your income by {} this period.",
            money(-f.snapshot.balance)
        ),
        suggested_action: "Pause non-essential spending and review recurring charges until your \
            balance is positive again."
            .to_string(),
    }
}

fn low_savings_rate(f: &Facts<'_>) -> Advice {
    let description = if f.snapshot.total_income.is_zero() {
        "No income is recorded for this period, so nothing is being saved.".to_string()
    } else {
        format!(
            "You are saving {}% of your income. Aim for at least {}%.",
            percent(f.snapshot.savings_rate),
            percent(savings_target())
        )
    };
    Advice {
        title: "Increase automatic savings".to_string(),
        description,
        suggested_action: "Set up an automatic transfer to savings on payday, starting with 5-10% \
            of your income."
            .to_string(),
    }
}

fn dominant_category(f: &Facts<'_>) -> Advice {
    let category = f.snapshot.dominant_category().unwrap_or_default();
    let amount = f.snapshot.dominant_category_amount();
    let share = saturating_div(amount, f.snapshot.total_expenses);
    let tip = CATEGORY_TIPS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, tip)| *tip)
        .unwrap_or(GENERIC_CATEGORY_TIP);
    Advice {
        title: format!("Optimize {category} spending"),
        description: format!(
            "{category} accounts for {}% of your expenses ({}).",
            percent(share),
            money(amount)
        ),
        suggested_action: tip.to_string(),
    }
}

fn debt_unaffordable(f: &Facts<'_>) -> Advice {
    let (minimum, available) = f
        .debt
        .map(|d| (d.monthly_minimum, d.available_for_debt))
        .unwrap_or_default();
    Advice {
        title: "Minimum debt payments exceed your budget".to_string(),
        description: format!(
            "Your debts require {} per month but only {} is left after expenses.",
            money(minimum),
            money(available.max(Decimal::ZERO))
        ),
        suggested_action: "Talk to your lenders about hardship plans, or consolidate \
            high-interest balances into a lower-rate loan."
            .to_string(),
    }
}

fn debt_payoff(f: &Facts<'_>) -> Advice {
    let description = match f.debt {
        Some(d) => format!(
            "Putting the {} left after minimum payments toward {} of debt could clear it in about \
            {} months.",
            money(d.available_for_debt.saturating_sub(d.monthly_minimum)),
            money(d.total_debt),
            d.payoff_months_estimate.unwrap_or_default()
        ),
        None => String::new(),
    };
    Advice {
        title: "Accelerate debt payoff".to_string(),
        description,
        suggested_action: "Direct surplus cash to the highest-interest debt first while paying \
            the minimum on the rest."
            .to_string(),
    }
}

fn well_balanced(f: &Facts<'_>) -> Advice {
    Advice {
        title: "Your finances look well balanced".to_string(),
        description: format!(
            "You are saving {}% of your income and no single category dominates your spending.",
            percent(f.snapshot.savings_rate)
        ),
        suggested_action: "Keep tracking your spending and consider investing part of your \
            surplus."
            .to_string(),
    }
}

fn percent(ratio: Decimal) -> Decimal {
    ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp(0)
        .normalize()
}

fn money(value: Decimal) -> String {
    format_num::format_num!(",.2", value.to_f64().unwrap_or_default())
}
