//! These structs provide the CLI interface for the finsight CLI.

use crate::model::{Amount, TransactionKind};
use crate::settings::{Currency, Locale, Theme};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// finsight: record income, expenses and debts, and get budgeting advice.
///
/// Transactions and debts are kept in two CSV files in the finsight home directory
/// (transactions.csv and debts.csv). You can edit those files by hand, or use the insert and
/// delete subcommands. The report subcommand totals your income and expenses, breaks spending
/// down by category, checks whether your debts are affordable and prints a short list of
/// recommendations.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and an initial config.json.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/finsight; pass --finsight-home or set FINSIGHT_HOME to put it somewhere else.
    Init(InitArgs),
    /// Summarize income, expenses and debts and print recommendations.
    Report(ReportArgs),
    /// Add a transaction or a debt to the ledger.
    Insert(InsertArgs),
    /// Remove transactions from the ledger.
    Delete(DeleteArgs),
    /// Show or change display settings.
    Settings(SettingsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where finsight data and configuration is held. Defaults to ~/finsight
    #[arg(long, env = "FINSIGHT_HOME", default_value_t = default_finsight_home())]
    finsight_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, finsight_home: PathBuf) -> Self {
        Self {
            log_level,
            finsight_home: finsight_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn finsight_home(&self) -> &DisplayPath {
        &self.finsight_home
    }
}

/// Args for the `finsight init` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct InitArgs {
    /// The name to greet you by in reports.
    #[arg(long)]
    pub display_name: Option<String>,

    /// The currency amounts are shown in, e.g. USD, EUR, GBP.
    #[arg(long)]
    pub currency: Option<Currency>,
}

/// Args for the `finsight report` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ReportArgs {
    /// Only include records owned by this user id. Defaults to the configured default_user, or
    /// to every record if there is none.
    #[arg(long)]
    pub user: Option<String>,

    /// Only include transactions on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only include transactions on or before this date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Print the report as JSON on stdout instead of text in the log.
    #[arg(long)]
    pub json: bool,
}

/// Args for the `finsight insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Record an income or expense.
    Transaction(InsertTransactionArgs),
    /// Record a debt.
    Debt(InsertDebtArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct InsertTransactionArgs {
    /// Either income or expense.
    #[arg(long = "type")]
    pub kind: TransactionKind,

    /// The amount, e.g. 1200 or $1,200.00.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Amount,

    /// A short label such as "Food & Dining" or "Salary".
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub description: Option<String>,

    /// The date of the transaction (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// The user id that owns the transaction.
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertDebtArgs {
    /// The outstanding principal.
    #[arg(long)]
    pub amount: Amount,

    /// The annual interest rate as a percentage, e.g. 19.99.
    #[arg(long)]
    pub interest_rate: Option<Amount>,

    /// The minimum monthly payment.
    #[arg(long)]
    pub minimum_payment: Option<Amount>,

    #[arg(long)]
    pub description: Option<String>,

    /// The date the debt was opened (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// The user id that owns the debt.
    #[arg(long)]
    pub user: Option<String>,
}

/// Args for the `finsight delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete transactions by id. Either all of them are deleted or none are.
    Transactions(DeleteTransactionsArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteTransactionsArgs {
    /// The id of a transaction to delete. Repeat to delete several.
    #[arg(long = "id", required = true)]
    pub ids: Vec<String>,

    /// Only delete transactions owned by this user id.
    #[arg(long)]
    pub user: Option<String>,
}

/// Args for the `finsight settings` command.
#[derive(Debug, Parser, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    action: SettingsSubcommand,
}

impl SettingsArgs {
    pub fn action(&self) -> &SettingsSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsSubcommand {
    /// Print the current settings.
    Show,
    /// Change one or more settings.
    Set(SetSettingsArgs),
}

#[derive(Debug, Default, Parser, Clone)]
pub struct SetSettingsArgs {
    #[arg(long)]
    pub display_name: Option<String>,

    /// One of USD, EUR, GBP, JPY, INR, CAD, AUD.
    #[arg(long)]
    pub currency: Option<Currency>,

    /// A language tag such as en-US.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// An IANA timezone name such as Europe/Paris.
    #[arg(long)]
    pub timezone: Option<String>,

    /// One of light, dark, system.
    #[arg(long)]
    pub theme: Option<Theme>,
}

fn default_finsight_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("finsight"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --finsight-home or FINSIGHT_HOME instead of relying on the \
                default home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("finsight")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
