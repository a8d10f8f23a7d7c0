//! Local storage for transactions and debts.
//!
//! The ledger is a pair of CSV files whose columns match the hosted `transactions` and `debts`
//! tables. Every row carries a `user_id`. A `Ledger` is opened for one user and only ever hands
//! that user's rows to the rest of the program; rows owned by anyone else are kept untouched when
//! a file is rewritten. When no user is selected, every row is treated as the local user's.

use crate::model::{Debt, Transaction};
use crate::{utils, Config, Result};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// An inclusive range of dates. Either end may be open.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                bail!("The start date {from} is after the end date {to}");
            }
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    transactions_path: PathBuf,
    debts_path: PathBuf,
    user: Option<String>,
    transactions: Vec<Transaction>,
    debts: Vec<Debt>,
}

impl Ledger {
    /// Opens the ledger files named in `config` for `user`, falling back to the configured default
    /// user.
    pub async fn open(config: &Config, user: Option<&str>) -> Result<Self> {
        let user = user.or(config.default_user()).map(str::to_string);
        Self::load(config.transactions_path(), config.debts_path(), user).await
    }

    /// Reads both ledger files. A file that does not exist yet is an empty ledger.
    pub async fn load(
        transactions_path: impl Into<PathBuf>,
        debts_path: impl Into<PathBuf>,
        user: Option<String>,
    ) -> Result<Self> {
        let transactions_path = transactions_path.into();
        let debts_path = debts_path.into();
        let transactions: Vec<Transaction> = read_csv(&transactions_path).await?;
        let debts: Vec<Debt> = read_csv(&debts_path).await?;
        debug!(
            "Loaded {} transactions and {} debts",
            transactions.len(),
            debts.len()
        );
        Ok(Self {
            transactions_path,
            debts_path,
            user,
            transactions,
            debts,
        })
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn owns(&self, user_id: &str) -> bool {
        self.user.as_deref().map_or(true, |u| u == user_id)
    }

    /// The selected user's transactions.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| self.owns(t.user_id()))
    }

    /// The selected user's transactions that fall within `range`.
    pub fn transactions_in(&self, range: &DateRange) -> Vec<Transaction> {
        self.transactions()
            .filter(|t| range.contains(t.occurred_on()))
            .cloned()
            .collect()
    }

    /// The selected user's debts.
    pub fn debts(&self) -> Vec<Debt> {
        self.debts
            .iter()
            .filter(|d| self.owns(d.user_id()))
            .cloned()
            .collect()
    }

    /// Adds `transaction` with a freshly generated id and the selected user as its owner, then
    /// rewrites the transactions file.
    pub async fn insert_transaction(&mut self, mut transaction: Transaction) -> Result<Transaction> {
        transaction.id = utils::generate_id();
        if let Some(user) = &self.user {
            transaction.user_id = user.clone();
        }
        trace!("Inserting transaction {}", transaction.id);
        let mut rows = self.transactions.clone();
        rows.push(transaction.clone());
        write_csv(&self.transactions_path, &rows).await?;
        self.transactions = rows;
        Ok(transaction)
    }

    /// Adds `debt` with a freshly generated id and the selected user as its owner, then rewrites
    /// the debts file.
    pub async fn insert_debt(&mut self, mut debt: Debt) -> Result<Debt> {
        debt.id = utils::generate_id();
        if let Some(user) = &self.user {
            debt.user_id = user.clone();
        }
        trace!("Inserting debt {}", debt.id);
        let mut rows = self.debts.clone();
        rows.push(debt.clone());
        write_csv(&self.debts_path, &rows).await?;
        self.debts = rows;
        Ok(debt)
    }

    /// Deletes the selected user's transactions with the given ids.
    ///
    /// This is all-or-nothing: if any id is not found among the user's transactions, nothing is
    /// deleted and the missing ids are reported. Returns each deleted id once, in the order given.
    pub async fn delete_transactions<S>(&mut self, ids: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<str>,
    {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids.iter().map(|id| id.as_ref()) {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let missing: Vec<&str> = unique
            .iter()
            .copied()
            .filter(|id| !self.transactions().any(|t| t.id() == *id))
            .collect();
        if !missing.is_empty() {
            bail!("Transaction(s) not found: {}", missing.join(", "));
        }

        let rows: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| !(self.owns(t.user_id()) && unique.contains(&t.id())))
            .cloned()
            .collect();
        debug!(
            "Removing {} rows from {}",
            self.transactions.len() - rows.len(),
            self.transactions_path.display()
        );
        write_csv(&self.transactions_path, &rows).await?;
        self.transactions = rows;

        Ok(unique.into_iter().map(str::to_string).collect())
    }
}

async fn read_csv<T>(path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let content = match utils::read_optional(path).await? {
        Some(content) => content,
        None => {
            debug!("{} does not exist, treating it as empty", path.display());
            return Ok(Vec::new());
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut rows = Vec::new();
    for (ix, result) in reader.deserialize().enumerate() {
        // row 1 is the header
        let row: T = result
            .with_context(|| format!("Unable to parse row {} of {}", ix + 2, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

async fn write_csv<T>(path: &Path, rows: &[T]) -> Result<()>
where
    T: Serialize,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Unable to serialize a row for {}", path.display()))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV data for {}: {e}", path.display()))?;
    utils::write(path, data).await
}
