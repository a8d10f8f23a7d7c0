use crate::engine::{
    compute_debt_metrics, compute_snapshot, generate_recommendations, DebtMetrics,
    FinancialSnapshot, Recommendation,
};
use crate::model::{Debt, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction indicator shown next to the balance.
///
/// This is derived from the sign of the current balance only. There is no time series behind it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyTrend {
    Up,
    Down,
}

serde_plain::derive_display_from_serialize!(MonthlyTrend);

impl MonthlyTrend {
    pub fn from_balance(balance: Decimal) -> Self {
        if balance < Decimal::ZERO {
            MonthlyTrend::Down
        } else {
            MonthlyTrend::Up
        }
    }
}

/// Everything the engine derives for one user in one pass.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Report {
    pub snapshot: FinancialSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_metrics: Option<DebtMetrics>,
    pub recommendations: Vec<Recommendation>,
    pub trend: MonthlyTrend,
}

impl Report {
    /// Builds a report from user-scoped records. Debt metrics are only computed when `debts` is
    /// given, so an empty slice still yields metrics (all zero) while `None` skips them.
    pub fn build(transactions: &[Transaction], debts: Option<&[Debt]>) -> Self {
        let snapshot = compute_snapshot(transactions);
        let debt_metrics = debts.map(|d| compute_debt_metrics(d, snapshot.balance));
        let recommendations = generate_recommendations(&snapshot, debt_metrics.as_ref());
        let trend = MonthlyTrend::from_balance(snapshot.balance);
        Self {
            snapshot,
            debt_metrics,
            recommendations,
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::advice::{DEBT_UNAFFORDABLE, LOW_SAVINGS_RATE};
    use crate::model::TransactionKind;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_trend_follows_balance_sign() {
        assert_eq!(MonthlyTrend::from_balance(Decimal::ZERO), MonthlyTrend::Up);
        assert_eq!(MonthlyTrend::from_balance(Decimal::ONE), MonthlyTrend::Up);
        assert_eq!(
            MonthlyTrend::from_balance(Decimal::NEGATIVE_ONE),
            MonthlyTrend::Down
        );
    }

    #[test]
    fn test_build_without_debts() {
        let txs = [Transaction::new(
            TransactionKind::Expense,
            Decimal::from(40),
            "Shopping",
            date(),
        )];
        let report = Report::build(&txs, None);
        assert_eq!(report.debt_metrics, None);
        assert_eq!(report.trend, MonthlyTrend::Down);
        assert_eq!(report.recommendations[0].rule, "overspending");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("debt_metrics").is_none());
        assert_eq!(json["trend"], "down");
    }

    #[test]
    fn test_build_with_debts() {
        let debts = [Debt::new(Decimal::from(1000), Decimal::from(50), date())];
        let report = Report::build(&[], Some(&debts));
        let metrics = report.debt_metrics.as_ref().unwrap();
        assert_eq!(metrics.total_debt, Decimal::from(1000));
        assert!(!metrics.affordable);
        let rules: Vec<_> = report.recommendations.iter().map(|r| r.rule).collect();
        assert_eq!(rules, vec![LOW_SAVINGS_RATE, DEBT_UNAFFORDABLE]);
    }
}
