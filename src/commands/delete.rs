//! Delete command handlers.

use crate::args::DeleteTransactionsArgs;
use crate::commands::{plural, Out};
use crate::ledger::Ledger;
use crate::{Config, Result};

/// Deletes one or more of the user's transactions by ID.
///
/// This operation is all-or-nothing: either all specified transactions are deleted, or none are.
pub async fn delete_transactions(
    config: Config,
    args: DeleteTransactionsArgs,
) -> Result<Out<Vec<String>>> {
    let mut ledger = Ledger::open(&config, args.user.as_deref()).await?;
    let deleted = ledger.delete_transactions(&args.ids).await?;
    let message = format!(
        "Deleted {}",
        plural(deleted.len(), "transaction", "transactions")
    );
    Ok(Out::new(message, deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    const TRANSACTIONS: &str = "\
id,type,amount,category,date
a,income,100,Salary,2025-01-01
b,expense,20,Shopping,2025-01-02
c,expense,30,Shopping,2025-01-03
";

    #[tokio::test]
    async fn test_delete_transactions() {
        let env = TestEnv::new().await;
        env.write_ledger(TRANSACTIONS, "").await;

        let args = DeleteTransactionsArgs {
            ids: vec!["b".to_string()],
            user: None,
        };
        let out = delete_transactions(env.config(), args).await.unwrap();
        assert_eq!(out.message(), "Deleted 1 transaction");
        assert_eq!(out.structure().unwrap(), &vec!["b".to_string()]);

        let ledger = Ledger::open(&env.config(), None).await.unwrap();
        let ids: Vec<&str> = ledger.transactions().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_deletes_nothing() {
        let env = TestEnv::new().await;
        env.write_ledger(TRANSACTIONS, "").await;

        let args = DeleteTransactionsArgs {
            ids: vec!["a".to_string(), "zzz".to_string()],
            user: None,
        };
        let err = delete_transactions(env.config(), args).await.unwrap_err();
        assert!(err.to_string().contains("zzz"));

        let ledger = Ledger::open(&env.config(), None).await.unwrap();
        assert_eq!(ledger.transactions().count(), 3);
    }
}
