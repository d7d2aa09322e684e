//! Transaction record types and input parsing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier handed out by the record store's counter.
pub type TransactionId = u64;

/// A single income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique among live transactions, never reused
    pub id: TransactionId,
    /// Human-readable description
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Category name (may be orphaned if the category was never registered)
    pub category: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
}

impl Transaction {
    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// User-entered fields for a transaction that does not have an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Parse raw form values. The date must be `YYYY-MM-DD`.
    pub fn parse(
        description: &str,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(
            description,
            parse_amount(amount)?,
            category,
            parse_date(date)?,
        ))
    }

    /// Check the fields and attach `id`.
    pub(crate) fn into_transaction(self, id: TransactionId) -> Result<Transaction, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !self.amount.is_finite() || self.amount == 0.0 {
            return Err(ValidationError::InvalidAmount(self.amount));
        }

        Ok(Transaction {
            id,
            description: description.to_string(),
            amount: self.amount,
            category: self.category,
            date: self.date,
        })
    }
}

/// Parse an amount like `-40`, `12.5` or `+100`.
pub fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NonNumericAmount(trimmed.to_string()))?;
    if !amount.is_finite() || amount == 0.0 {
        return Err(ValidationError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Parse an ISO 8601 calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}
