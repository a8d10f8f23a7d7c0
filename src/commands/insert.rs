//! Insert command handlers.

use crate::args::{InsertDebtArgs, InsertTransactionArgs};
use crate::commands::Out;
use crate::ledger::Ledger;
use crate::model::{Debt, Transaction};
use crate::{Config, Result};
use chrono::Local;

/// Appends a new transaction to the ledger.
///
/// A unique id is generated for the transaction and returned on success. The date defaults to
/// today.
///
/// # Errors
///
/// - Returns an error if the ledger cannot be read or written.
pub async fn insert_transaction(
    config: Config,
    args: InsertTransactionArgs,
) -> Result<Out<Transaction>> {
    let mut ledger = Ledger::open(&config, args.user.as_deref()).await?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let transaction = Transaction::new(args.kind, args.amount, args.category, date)
        .with_description(args.description.unwrap_or_default());

    let inserted = ledger.insert_transaction(transaction).await?;
    let message = format!(
        "Inserted {} transaction with ID: {}",
        inserted.kind(),
        inserted.id()
    );
    Ok(Out::new(message, inserted))
}

/// Appends a new debt to the ledger and returns it with its generated id.
///
/// # Errors
///
/// - Returns an error if the ledger cannot be read or written.
pub async fn insert_debt(config: Config, args: InsertDebtArgs) -> Result<Out<Debt>> {
    let mut ledger = Ledger::open(&config, args.user.as_deref()).await?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let debt = Debt::new(
        args.amount,
        args.minimum_payment.unwrap_or_default(),
        date,
    )
    .with_rate(args.interest_rate.unwrap_or_default())
    .with_description(args.description.unwrap_or_default());

    let inserted = ledger.insert_debt(debt).await?;
    let message = format!("Inserted debt with ID: {}", inserted.id());
    Ok(Out::new(message, inserted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionKind};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_insert_transaction() {
        let env = TestEnv::new().await;
        let args = InsertTransactionArgs {
            kind: TransactionKind::Income,
            amount: Amount::from_str("$2,500.00").unwrap(),
            category: "Salary".to_string(),
            description: Some("first paycheck".to_string()),
            date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            user: Some("alice".to_string()),
        };
        let out = insert_transaction(env.config(), args).await.unwrap();
        let inserted = out.structure().unwrap();
        assert!(out.message().contains(inserted.id()));
        assert!(out.message().contains("income"));

        let ledger = Ledger::open(&env.config(), Some("alice")).await.unwrap();
        let stored: Vec<&Transaction> = ledger.transactions().collect();
        assert_eq!(stored, vec![inserted]);
        assert_eq!(stored[0].amount(), Decimal::from(2500));
    }

    #[tokio::test]
    async fn test_insert_transaction_defaults_to_today() {
        let env = TestEnv::new().await;
        let args = InsertTransactionArgs {
            kind: TransactionKind::Expense,
            amount: Amount::from_str("4.50").unwrap(),
            category: "Food & Dining".to_string(),
            description: None,
            date: None,
            user: None,
        };
        let out = insert_transaction(env.config(), args).await.unwrap();
        let inserted = out.structure().unwrap();
        assert_eq!(inserted.occurred_on(), Local::now().date_naive());
        assert_eq!(inserted.user_id(), "");
    }

    #[tokio::test]
    async fn test_insert_debt() {
        let env = TestEnv::new().await;
        let args = InsertDebtArgs {
            amount: Amount::from_str("1500").unwrap(),
            interest_rate: Some(Amount::from_str("22.9").unwrap()),
            minimum_payment: Some(Amount::from_str("45").unwrap()),
            description: Some("store card".to_string()),
            date: Some(NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()),
            user: Some("bob".to_string()),
        };
        let out = insert_debt(env.config(), args).await.unwrap();
        assert!(out.message().starts_with("Inserted debt"));

        let ledger = Ledger::open(&env.config(), Some("bob")).await.unwrap();
        let debts = ledger.debts();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].principal(), Decimal::from(1500));
        assert_eq!(debts[0].minimum_payment(), Decimal::from(45));
        assert_eq!(debts[0].user_id(), "bob");
    }
}
