//! Money formatting and the plain-text budget report.

use std::fmt::Write;

use crate::aggregate::{Summary, expense_by_category, rank_by_amount};
use crate::transaction::Transaction;

/// Currency prefix used when none is configured.
pub const DEFAULT_CURRENCY_PREFIX: &str = "Rs";

/// Formats money as `<prefix> <value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    prefix: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_PREFIX)
    }
}

impl MoneyFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `Rs 12.50`, `Rs -3.00`.
    pub fn amount(&self, value: f64) -> String {
        format!("{} {}", self.prefix, format_money(value))
    }

    /// `+Rs 12.50` or `-Rs 3.00`, the sign taken from `value`.
    pub fn signed(&self, value: f64) -> String {
        let sign = if value < 0.0 { '-' } else { '+' };
        format!("{sign}{} {}", self.prefix, format_money(value.abs()))
    }

    /// Rounded to whole units, for axis labels: `Rs 40`.
    pub fn whole(&self, value: f64) -> String {
        format!("{} {}", self.prefix, format_fixed(value, 0))
    }
}

/// Two decimal places, never `-0.00`.
pub fn format_money(value: f64) -> String {
    format_fixed(value, 2)
}

fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let is_zero = text
        .trim_start_matches('-')
        .chars()
        .all(|c| c == '0' || c == '.');
    if is_zero {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Render the budget report: totals, then expense per category.
///
/// Category lines follow the chart order (largest expense first).
pub fn generate_report(transactions: &[Transaction], money: &MoneyFormat) -> String {
    let summary = Summary::from_transactions(transactions);
    let balance = summary.income - summary.expense;
    let by_category = expense_by_category(transactions);

    let mut out = String::from("Budget Report\n\n");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Total Income: {}", money.amount(summary.income));
    let _ = writeln!(out, "Total Expense: {}", money.amount(summary.expense));
    let _ = writeln!(out, "Balance: {}", money.amount(balance));
    out.push('\n');
    out.push_str("Expense Breakdown by Category:\n");
    for (category, amount) in rank_by_amount(&by_category) {
        let _ = writeln!(out, "{category}: {}", money.amount(amount));
    }
    out
}
