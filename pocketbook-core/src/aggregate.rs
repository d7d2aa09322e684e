//! Aggregation over a transaction list.
//!
//! Everything here is pure. Values are accumulated unrounded; rounding to
//! cents happens only in [`crate::report::format_money`].

use std::collections::BTreeMap;

use crate::transaction::Transaction;

/// Sum of every amount.
pub fn total_balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// Sum of positive amounts.
pub fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Sum of the magnitudes of negative amounts.
pub fn total_expense(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.abs_amount())
        .sum()
}

/// Expense magnitude per category. Categories without expenses are absent.
pub fn expense_by_category(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *sums.entry(txn.category.clone()).or_insert(0.0) += txn.abs_amount();
    }
    sums
}

/// Category sums ordered by amount, largest first; ties by name ascending.
pub fn rank_by_amount(by_category: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = by_category
        .iter()
        .map(|(name, amount)| (name.as_str(), *amount))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Income, expense and net balance in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Summary::default();
        for txn in transactions {
            if txn.is_income() {
                summary.income += txn.amount;
            } else if txn.is_expense() {
                summary.expense += txn.abs_amount();
            }
            summary.balance += txn.amount;
        }
        summary
    }
}
