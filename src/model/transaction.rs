use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or sends it out.
#[derive(
    Default, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

/// A single income or expense entry.
///
/// Field names follow the columns of the hosted `transactions` table, so `kind` is written as
/// `type` and `occurred_on` as `date`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) user_id: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(rename = "date")]
    pub(crate) occurred_on: NaiveDate,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: impl Into<Amount>,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: String::new(),
            kind,
            amount: amount.into(),
            category: category.into(),
            description: String::new(),
            occurred_on,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_plain_serde() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(
            TransactionKind::from_str("expense").unwrap(),
            TransactionKind::Expense
        );
        assert!(TransactionKind::from_str("transfer").is_err());
    }

    #[test]
    fn test_json_uses_hosted_column_names() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let t = Transaction::new(
            TransactionKind::Expense,
            Amount::from_str("12.50").unwrap(),
            "Food & Dining",
            date,
        )
        .with_id("t-1")
        .with_description("lunch");

        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2025-03-01");
        assert_eq!(json["amount"], "12.50");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
