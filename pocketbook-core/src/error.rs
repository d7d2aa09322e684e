//! Error types returned by budget mutations.

use thiserror::Error;

/// Input that was rejected before any state changed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// The transaction description was empty or only whitespace.
    #[error("a transaction needs a description")]
    EmptyDescription,

    /// The amount text could not be parsed as a number.
    #[error("'{0}' is not a number")]
    NonNumericAmount(String),

    /// The amount was zero, NaN or infinite.
    #[error("{0} is not a valid amount (must be a finite, non-zero number)")]
    InvalidAmount(f64),

    /// The date text was not an ISO 8601 calendar date.
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// An empty string was used as a category name.
    #[error("please enter a category name")]
    EmptyCategoryName,

    /// A category with exactly this name is already registered.
    #[error("the category '{0}' already exists")]
    DuplicateCategory(String),

    /// The sentinel category was targeted for deletion.
    #[error("you cannot delete the '{0}' category")]
    ProtectedCategory(String),

    /// Deleting would leave the registry without any category.
    #[error("you must have at least one category")]
    LastCategory,

    /// Every transaction id up to `u64::MAX` has been handed out.
    #[error("no transaction ids are left")]
    IdsExhausted,
}

/// Anything a [`crate::Budget`] mutation can fail with.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing to the persisted store failed. The in-memory change was undone.
    #[error("could not persist budget state: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl BudgetError {
    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            BudgetError::Validation(e) => Some(e),
            BudgetError::Storage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::DuplicateCategory("Food".into()).to_string(),
            "the category 'Food' already exists"
        );
        assert_eq!(
            ValidationError::ProtectedCategory("Other".into()).to_string(),
            "you cannot delete the 'Other' category"
        );
    }

    #[test]
    fn test_validation_converts_into_budget_error() {
        let err: BudgetError = ValidationError::LastCategory.into();
        assert_eq!(err.as_validation(), Some(&ValidationError::LastCategory));
        assert_eq!(err.to_string(), "you must have at least one category");
    }
}
