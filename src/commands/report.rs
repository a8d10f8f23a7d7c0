//! The `report` command: aggregates the ledger and prints totals and advice.

use crate::args::ReportArgs;
use crate::commands::{plural, Out};
use crate::engine::{Priority, Report};
use crate::ledger::{DateRange, Ledger};
use crate::settings::Currency;
use crate::{Config, Result};
use rust_decimal::Decimal;
use std::fmt::Write;
use tracing::debug;

/// Builds a `Report` for one user's transactions within the requested dates.
///
/// Debt metrics are included when the user has at least one debt on record.
///
/// # Errors
///
/// - Returns an error if the ledger files cannot be read or parsed.
/// - Returns an error if `--from` is after `--to`.
pub async fn report(config: Config, args: ReportArgs) -> Result<Out<Report>> {
    let range = DateRange::new(args.from, args.to)?;
    let ledger = Ledger::open(&config, args.user.as_deref()).await?;

    let transactions = ledger.transactions_in(&range);
    let debts = ledger.debts();
    debug!(
        "Building a report from {} and {}",
        plural(transactions.len(), "transaction", "transactions"),
        plural(debts.len(), "debt", "debts")
    );

    let debts = if debts.is_empty() {
        None
    } else {
        Some(debts.as_slice())
    };
    let report = Report::build(&transactions, debts);

    let heading = heading(&config, ledger.user(), &args);
    let message = render(&heading, &report, config.settings().currency);
    Ok(Out::new(message, report))
}

fn heading(config: &Config, user: Option<&str>, args: &ReportArgs) -> String {
    let who = match (user, config.settings().display_name.as_str()) {
        (Some(user), _) => user.to_string(),
        (None, "") => "you".to_string(),
        (None, name) => name.to_string(),
    };
    let when = match (args.from, args.to) {
        (Some(from), Some(to)) => format!(" from {from} to {to}"),
        (Some(from), None) => format!(" since {from}"),
        (None, Some(to)) => format!(" until {to}"),
        (None, None) => String::new(),
    };
    format!("Financial report for {who}{when}")
}

/// Renders a report as plain text for the terminal.
fn render(heading: &str, report: &Report, currency: Currency) -> String {
    let money = |d: Decimal| currency.format(d);
    let s = &report.snapshot;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "  Income:        {}", money(s.total_income));
    let _ = writeln!(out, "  Expenses:      {}", money(s.total_expenses));
    let _ = writeln!(out, "  Balance:       {} ({})", money(s.balance), report.trend);
    if s.total_income.is_zero() {
        let _ = writeln!(out, "  Savings rate:  n/a (no income)");
    } else {
        let rate = s
            .savings_rate
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp(1)
            .normalize();
        let _ = writeln!(out, "  Savings rate:  {rate}%");
    }

    if !s.expense_breakdown.is_empty() {
        let _ = writeln!(out, "Spending by category:");
        let width = s
            .expense_breakdown
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or_default();
        for c in s.expense_breakdown.iter() {
            let marker = if s.dominant_category() == Some(c.category.as_str()) {
                " *"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {:<width$}  {}{marker}",
                c.category,
                money(c.amount)
            );
        }
    }

    if let Some(d) = &report.debt_metrics {
        let payoff = match d.payoff_months_estimate {
            Some(months) => format!("payoff in about {}", plural(months, "month", "months")),
            None if d.affordable => "nothing left over after minimum payments".to_string(),
            None => "minimum payments are not currently affordable".to_string(),
        };
        let _ = writeln!(
            out,
            "Debt: {} total, {} per month minimum, {payoff}",
            money(d.total_debt),
            money(d.monthly_minimum)
        );
    }

    let _ = writeln!(out, "Recommendations:");
    for (ix, r) in report.recommendations.iter().enumerate() {
        let tag = match r.priority {
            Priority::Urgent => " [urgent]",
            Priority::Normal => "",
        };
        let _ = writeln!(out, "  {}. {}{tag}", ix + 1, r.title);
        let _ = writeln!(out, "     {}", r.description);
        let _ = writeln!(out, "     -> {}", r.suggested_action);
    }
    out.trim_end().to_string()
}
