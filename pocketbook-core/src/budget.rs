//! Budget: the record store and category registry bound to one persisted store.
//!
//! Every mutation follows the same sequence: validate, mutate in memory,
//! persist. If persisting fails the in-memory state is restored and written
//! back, so a partly landed write does not survive a restart.

use std::collections::BTreeMap;

use crate::aggregate::{self, Summary};
use crate::categories::{CategoryRegistry, SENTINEL_CATEGORY};
use crate::chart::Chart;
use crate::error::BudgetError;
use crate::records::RecordStore;
use crate::report::{self, MoneyFormat};
use crate::storage::KeyValueStore;
use crate::transaction::{NewTransaction, Transaction, TransactionId};

#[derive(Debug)]
pub struct Budget<S: KeyValueStore> {
    store: S,
    records: RecordStore,
    categories: CategoryRegistry,
}

impl<S: KeyValueStore> Budget<S> {
    /// Load both lists from `store`. Missing or malformed data falls back to
    /// an empty record list and the default categories.
    pub fn load(store: S) -> Self {
        let records = RecordStore::load(&store);
        let categories = CategoryRegistry::load(&store);
        tracing::debug!(
            transactions = records.len(),
            categories = categories.len(),
            "loaded budget"
        );
        Self {
            store,
            records,
            categories,
        }
    }

    /// Write both lists to the store.
    pub fn persist(&mut self) -> anyhow::Result<()> {
        self.records.persist(&mut self.store)?;
        self.categories.persist(&mut self.store)?;
        Ok(())
    }

    /// Record a transaction. The category is not checked against the registry.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction, BudgetError> {
        let snapshot = self.records.clone();
        let txn = self.records.add(new)?;

        if let Err(err) = self.records.persist(&mut self.store) {
            self.restore_records(snapshot);
            return Err(err.into());
        }

        if !self.categories.contains(&txn.category) {
            tracing::debug!(category = %txn.category, "transaction uses an unregistered category");
        }
        tracing::debug!(id = txn.id, amount = txn.amount, "added transaction");
        Ok(txn)
    }

    /// Delete a transaction by id. Unknown ids are a no-op returning `None`.
    pub fn remove_transaction(
        &mut self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, BudgetError> {
        let snapshot = self.records.clone();
        let Some(removed) = self.records.remove(id) else {
            return Ok(None);
        };

        if let Err(err) = self.records.persist(&mut self.store) {
            self.restore_records(snapshot);
            return Err(err.into());
        }

        tracing::debug!(id, "removed transaction");
        Ok(Some(removed))
    }

    /// Register a category, returning the stored name.
    pub fn add_category(&mut self, name: &str) -> Result<String, BudgetError> {
        let snapshot = self.categories.clone();
        let name = self.categories.add(name)?;

        if let Err(err) = self.categories.persist(&mut self.store) {
            self.categories = snapshot;
            return Err(err.into());
        }

        tracing::debug!(category = %name, "added category");
        Ok(name)
    }

    /// Delete a category and move its transactions to the sentinel category.
    ///
    /// Returns how many transactions were reassigned. Deleting a name that is
    /// not registered changes nothing.
    pub fn remove_category(&mut self, name: &str) -> Result<usize, BudgetError> {
        self.categories.check_remove(name)?;
        if !self.categories.contains(name) {
            return Ok(0);
        }

        let records_snapshot = self.records.clone();
        let categories_snapshot = self.categories.clone();

        self.categories.remove(name)?;
        let moved = self.records.reassign_category(name, SENTINEL_CATEGORY);

        if let Err(err) = self.persist() {
            self.records = records_snapshot;
            self.categories = categories_snapshot;
            if let Err(restore_err) = self.persist() {
                tracing::warn!("could not restore budget state after failed write: {restore_err:#}");
            }
            return Err(err.into());
        }

        tracing::debug!(category = name, moved, "removed category");
        Ok(moved)
    }

    fn restore_records(&mut self, snapshot: RecordStore) {
        self.records = snapshot;
        if let Err(err) = self.records.persist(&mut self.store) {
            tracing::warn!("could not restore transactions after failed write: {err:#}");
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.records.as_slice()
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn summary(&self) -> Summary {
        Summary::from_transactions(self.transactions())
    }

    pub fn expense_by_category(&self) -> BTreeMap<String, f64> {
        aggregate::expense_by_category(self.transactions())
    }

    pub fn chart(&self) -> Chart {
        Chart::from_transactions(self.transactions())
    }

    pub fn report(&self, money: &MoneyFormat) -> String {
        report::generate_report(self.transactions(), money)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
