//! Types that represent the recorded data: transactions, debts and the amounts they carry.
mod amount;
mod debt;
mod transaction;

pub use amount::{Amount, AmountError, AmountFormat};
pub use debt::Debt;
pub use transaction::{Transaction, TransactionKind};
