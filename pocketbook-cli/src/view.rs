//! Plain-text views printed by the CLI.

use pocketbook_core::{Chart, MoneyFormat, Summary, Transaction};

/// `#3  2025-05-03  Food  Groceries  -Rs 40.00`
pub fn transaction_line(txn: &Transaction, money: &MoneyFormat) -> String {
    format!(
        "#{:<5} {}  {:<14} {:<28} {:>14}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        txn.category,
        txn.description,
        money.signed(txn.amount)
    )
}

pub fn transaction_list<'a>(
    txns: impl Iterator<Item = &'a Transaction>,
    limit: Option<usize>,
    money: &MoneyFormat,
) -> String {
    let mut out = String::new();
    for txn in txns.take(limit.unwrap_or(usize::MAX)) {
        out.push_str(&transaction_line(txn, money));
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str("No transactions yet\n");
    }
    out
}

pub fn summary(summary: &Summary, money: &MoneyFormat) -> String {
    format!(
        "Balance: {}\nIncome:  +{}\nExpense: -{}\n",
        money.amount(summary.balance),
        money.amount(summary.income),
        money.amount(summary.expense)
    )
}

pub fn chart(chart: &Chart, width: usize, money: &MoneyFormat) -> String {
    match chart {
        Chart::NoData(reason) => format!("{reason}\n"),
        Chart::Bars(bars) => bars.render_text(width, money),
    }
}
