//! Bar-chart data for expense per category.
//!
//! Bars are scaled against the largest category, so the top bar is always
//! 100%. The y-axis gets [`TICK_INTERVALS`] + 1 evenly spaced ticks from zero
//! to that maximum.

use std::collections::BTreeMap;
use std::fmt;

use crate::aggregate::{expense_by_category, rank_by_amount};
use crate::report::MoneyFormat;
use crate::transaction::Transaction;

/// Number of gaps between axis ticks.
pub const TICK_INTERVALS: usize = 5;

/// Why there is nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoData {
    /// No transactions were recorded at all.
    NoTransactions,
    /// Transactions exist but none of them is an expense.
    NoExpenses,
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoData::NoTransactions => write!(f, "No data to display"),
            NoData::NoExpenses => write!(f, "No expense data to display"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub amount: f64,
    /// `amount / max_amount * 100`, in `(0, 100]`
    pub percentage_of_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Largest expense first; ties by category name.
    pub bars: Vec<Bar>,
    pub max_amount: f64,
    /// `max_amount * i / 5` for `i` in `0..=5`.
    pub ticks: [f64; TICK_INTERVALS + 1],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    NoData(NoData),
    Bars(BarChart),
}

impl Chart {
    /// Chart the expenses in `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        if transactions.is_empty() {
            return Chart::NoData(NoData::NoTransactions);
        }
        build_chart(&expense_by_category(transactions))
    }

    pub fn bars(&self) -> Option<&BarChart> {
        match self {
            Chart::Bars(chart) => Some(chart),
            Chart::NoData(_) => None,
        }
    }
}

/// Build chart data from per-category expense sums.
///
/// An empty mapping yields [`NoData::NoExpenses`].
pub fn build_chart(by_category: &BTreeMap<String, f64>) -> Chart {
    let ranked = rank_by_amount(by_category);
    let Some(&(_, max_amount)) = ranked.first() else {
        return Chart::NoData(NoData::NoExpenses);
    };

    let bars = ranked
        .into_iter()
        .map(|(category, amount)| Bar {
            category: category.to_string(),
            amount,
            percentage_of_max: amount / max_amount * 100.0,
        })
        .collect();

    let mut ticks = [0.0; TICK_INTERVALS + 1];
    for (i, tick) in ticks.iter_mut().enumerate() {
        *tick = max_amount * i as f64 / TICK_INTERVALS as f64;
    }

    Chart::Bars(BarChart {
        bars,
        max_amount,
        ticks,
    })
}

impl BarChart {
    /// Horizontal text rendering, `width` characters for a 100% bar.
    pub fn render_text(&self, width: usize, money: &MoneyFormat) -> String {
        let width = width.max(1);
        let label_width = self
            .bars
            .iter()
            .map(|b| b.category.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for bar in &self.bars {
            let cells = ((bar.percentage_of_max / 100.0) * width as f64).round() as usize;
            let cells = cells.clamp(1, width);
            out.push_str(&format!(
                "{:<label_width$} |{}{} {} ({:.1}%)\n",
                bar.category,
                "█".repeat(cells),
                " ".repeat(width - cells),
                money.amount(bar.amount),
                bar.percentage_of_max,
            ));
        }

        let scale: Vec<String> = self.ticks.iter().map(|t| money.whole(*t)).collect();
        out.push_str(&format!(
            "{:<label_width$}  scale: {}\n",
            "",
            scale.join(" | ")
        ));
        out
    }
}
