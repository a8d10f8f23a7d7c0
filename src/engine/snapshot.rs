use crate::engine::{saturating_div, saturating_sum};
use crate::model::Transaction;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// The summed expense amount for one category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Expense totals per category, in the order each category was first encountered.
///
/// Categories whose expenses sum to zero are not present.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ExpenseBreakdown {
    totals: Vec<CategoryTotal>,
}

impl ExpenseBreakdown {
    fn from_expenses<'a>(expenses: impl Iterator<Item = &'a Transaction>) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for t in expenses {
            match index.get(t.category()) {
                Some(&ix) => {
                    let total = &mut totals[ix].amount;
                    *total = total.saturating_add(t.amount());
                }
                None => {
                    index.insert(t.category(), totals.len());
                    totals.push(CategoryTotal {
                        category: t.category().to_string(),
                        amount: t.amount(),
                    });
                }
            }
        }
        totals.retain(|c| !c.amount.is_zero());
        Self { totals }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.iter()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.totals.iter().map(|c| c.amount))
    }

    /// The category with the largest total. The earliest category wins a tie.
    fn dominant(&self) -> Option<&CategoryTotal> {
        let mut best: Option<&CategoryTotal> = None;
        for c in &self.totals {
            if best.map_or(true, |b| c.amount > b.amount) {
                best = Some(c);
            }
        }
        best
    }
}

impl Serialize for ExpenseBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.totals.len()))?;
        for c in &self.totals {
            map.serialize_entry(&c.category, &c.amount)?;
        }
        map.end()
    }
}

/// Aggregate figures for one user's transactions.
///
/// A snapshot is a value: it is recomputed from the transactions every time it is needed.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// `balance / total_income`, or zero when there is no income. Check `total_income` before
    /// reading a zero as break-even.
    pub savings_rate: Decimal,
    pub expense_breakdown: ExpenseBreakdown,
    pub dominant: Option<CategoryTotal>,
}

impl FinancialSnapshot {
    pub fn dominant_category(&self) -> Option<&str> {
        self.dominant.as_ref().map(|c| c.category.as_str())
    }

    /// The dominant category's total, or zero when there are no expenses.
    pub fn dominant_category_amount(&self) -> Decimal {
        self.dominant
            .as_ref()
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Computes the totals, savings rate and category breakdown for `transactions`.
///
/// The input must already be scoped to a single user. Amounts are taken as they are; nothing is
/// validated. Sums and ratios that would overflow are pinned at `Decimal::MAX` or `Decimal::MIN`.
pub fn compute_snapshot(transactions: &[Transaction]) -> FinancialSnapshot {
    let total_income = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(Transaction::amount),
    );
    let total_expenses = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(Transaction::amount),
    );
    let balance = total_income.saturating_sub(total_expenses);

    let savings_rate = if total_income > Decimal::ZERO {
        saturating_div(balance, total_income)
    } else {
        Decimal::ZERO
    };

    let expense_breakdown =
        ExpenseBreakdown::from_expenses(transactions.iter().filter(|t| t.is_expense()));
    let dominant = expense_breakdown.dominant().cloned();

    FinancialSnapshot {
        total_income,
        total_expenses,
        balance,
        savings_rate,
        expense_breakdown,
        dominant,
    }
}
