//! pocketbook-core: transaction records, categories, aggregation, chart data
//! and the text report for the pocketbook budget tracker

pub mod aggregate;
pub mod budget;
pub mod categories;
pub mod chart;
pub mod error;
pub mod records;
pub mod report;
pub mod storage;
pub mod transaction;

pub use aggregate::{
    Summary, expense_by_category, rank_by_amount, total_balance, total_expense, total_income,
};
pub use budget::Budget;
pub use categories::{CategoryRegistry, DEFAULT_CATEGORIES, SENTINEL_CATEGORY};
pub use chart::{Bar, BarChart, Chart, NoData, build_chart};
pub use error::{BudgetError, ValidationError};
pub use records::RecordStore;
pub use report::{MoneyFormat, format_money, generate_report};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transaction::{NewTransaction, Transaction, TransactionId, parse_amount, parse_date};
