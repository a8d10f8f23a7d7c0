use crate::engine::{saturating_div, saturating_sum};
use crate::model::Debt;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Whether the current balance can carry the user's debts.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct DebtMetrics {
    pub total_debt: Decimal,
    pub monthly_minimum: Decimal,
    /// The income-minus-expenses balance that could go towards debt.
    pub available_for_debt: Decimal,
    pub affordable: bool,
    /// Months to clear the principal with whatever is left after minimum payments. Interest is
    /// ignored, so this is only an order-of-magnitude signal. `None` when nothing is left over.
    /// Estimates beyond `u64::MAX` months are reported as `u64::MAX`.
    pub payoff_months_estimate: Option<u64>,
}

/// Sums `debts` and compares their minimum payments against `balance`.
pub fn compute_debt_metrics(debts: &[Debt], balance: Decimal) -> DebtMetrics {
    let total_debt = saturating_sum(debts.iter().map(Debt::principal));
    let monthly_minimum = saturating_sum(debts.iter().map(Debt::minimum_payment));
    let available_for_debt = balance;

    let payoff_months_estimate = if available_for_debt > monthly_minimum {
        let surplus = available_for_debt.saturating_sub(monthly_minimum);
        let months = saturating_div(total_debt, surplus).ceil().max(Decimal::ZERO);
        Some(months.to_u64().unwrap_or(u64::MAX))
    } else {
        None
    };

    DebtMetrics {
        total_debt,
        monthly_minimum,
        available_for_debt,
        affordable: available_for_debt >= monthly_minimum,
        payoff_months_estimate,
    }
}
