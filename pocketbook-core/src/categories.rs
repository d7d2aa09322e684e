//! Category registry.

use anyhow::Result;

use crate::error::ValidationError;
use crate::storage::{self, CATEGORIES_KEY, KeyValueStore};

/// The category that can never be deleted and absorbs orphaned records.
pub const SENTINEL_CATEGORY: &str = "Other";

/// Categories used when nothing usable is persisted.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Housing",
    "Utilities",
    "Entertainment",
    "Income",
    SENTINEL_CATEGORY,
];

/// Ordered set of category names. Never empty; always holds [`SENTINEL_CATEGORY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            names: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategoryRegistry {
    /// Load persisted categories, falling back to [`DEFAULT_CATEGORIES`].
    pub fn load(store: &impl KeyValueStore) -> Self {
        match storage::read_json::<Vec<String>>(store, CATEGORIES_KEY) {
            Some(names) => Self::from_names(names),
            None => Self::default(),
        }
    }

    /// Build a registry from raw names, dropping blanks and duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || cleaned.iter().any(|n| n == name) {
                continue;
            }
            cleaned.push(name.to_string());
        }

        if cleaned.is_empty() {
            return Self::default();
        }
        if !cleaned.iter().any(|n| n == SENTINEL_CATEGORY) {
            tracing::warn!("persisted categories lack '{SENTINEL_CATEGORY}', adding it");
            cleaned.push(SENTINEL_CATEGORY.to_string());
        }
        Self { names: cleaned }
    }

    /// Register a new category. Returns the stored (trimmed) name.
    pub fn add(&mut self, name: &str) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        if self.contains(name) {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(name.to_string())
    }

    /// Check whether `name` may be removed, without removing it.
    pub fn check_remove(&self, name: &str) -> Result<(), ValidationError> {
        if self.names.len() <= 1 {
            return Err(ValidationError::LastCategory);
        }
        if name == SENTINEL_CATEGORY {
            return Err(ValidationError::ProtectedCategory(name.to_string()));
        }
        Ok(())
    }

    /// Remove `name`. Returns whether it was registered.
    ///
    /// Reassigning records that used the category is the caller's job; see
    /// [`crate::Budget::remove_category`].
    pub fn remove(&mut self, name: &str) -> Result<bool, ValidationError> {
        self.check_remove(name)?;
        let before = self.names.len();
        self.names.retain(|n| n != name);
        Ok(self.names.len() != before)
    }

    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<()> {
        storage::write_json(store, CATEGORIES_KEY, &self.names)
    }

    /// Case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
