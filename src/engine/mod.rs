//! The aggregation and advice engine.
//!
//! Everything in here is a pure function of its inputs: no I/O, no logging and no shared state.
//! Callers are responsible for handing in records that belong to a single user.

pub mod advice;
mod debt;
mod report;
mod snapshot;

pub use advice::{generate_recommendations, Priority, Recommendation};
pub use debt::{compute_debt_metrics, DebtMetrics};
pub use report::{MonthlyTrend, Report};
pub use snapshot::{compute_snapshot, CategoryTotal, ExpenseBreakdown, FinancialSnapshot};

use rust_decimal::Decimal;

/// Adds up `values`, pinning the result at `Decimal::MAX` or `Decimal::MIN` instead of
/// overflowing.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Divides `a` by `b`, pinning the result at `Decimal::MAX` or `Decimal::MIN` when it does not fit.
/// Dividing by zero gives zero.
fn saturating_div(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    match a.checked_div(b) {
        Some(quotient) => quotient,
        None if a.is_sign_negative() != b.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}
