//! Record store: the in-memory transaction list and its id counter.
//!
//! Ids come from a monotonic counter persisted next to the list, so an id is
//! never handed out twice, even after the newest record is deleted. Once the
//! counter passes `u64::MAX` it is `None` and further adds are rejected.

use anyhow::Result;
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::storage::{self, KeyValueStore, TRANSACTION_SEQ_KEY, TRANSACTIONS_KEY};
use crate::transaction::{NewTransaction, Transaction, TransactionId};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    transactions: Vec<Transaction>,
    next_id: Option<TransactionId>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load persisted records. Absent or malformed data gives an empty store.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let loaded: Vec<Transaction> =
            storage::read_json(store, TRANSACTIONS_KEY).unwrap_or_default();
        let seq = storage::read_json::<Option<TransactionId>>(store, TRANSACTION_SEQ_KEY)
            .flatten()
            .unwrap_or(1);
        Self::from_parts(loaded, seq)
    }

    /// Build a store from existing records, repairing duplicate ids.
    fn from_parts(loaded: Vec<Transaction>, seq: TransactionId) -> Self {
        let max_id = loaded.iter().map(|t| t.id).max().unwrap_or(0);
        let mut next_id = max_id.checked_add(1).map(|after_max| seq.max(after_max).max(1));

        let mut seen = HashSet::with_capacity(loaded.len());
        let mut transactions = Vec::with_capacity(loaded.len());
        for mut txn in loaded {
            if !seen.insert(txn.id) {
                let Some(new_id) = next_id else {
                    tracing::warn!(id = txn.id, "dropping duplicate transaction id, no ids left");
                    continue;
                };
                tracing::warn!(id = txn.id, new_id, "reassigning duplicate transaction id");
                txn.id = new_id;
                seen.insert(new_id);
                next_id = new_id.checked_add(1);
            }
            transactions.push(txn);
        }
        if next_id.is_none() {
            tracing::warn!("transaction id space is exhausted");
        }

        Self {
            transactions,
            next_id,
        }
    }

    /// Validate and append a new record, returning it with its fresh id.
    pub fn add(&mut self, new: NewTransaction) -> Result<Transaction, ValidationError> {
        let id = self.next_id.ok_or(ValidationError::IdsExhausted)?;
        let txn = new.into_transaction(id)?;
        self.next_id = id.checked_add(1);
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// Remove the record with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(pos))
    }

    /// Move every record in category `from` to `to`. Returns how many moved.
    pub fn reassign_category(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for txn in self.transactions.iter_mut().filter(|t| t.category == from) {
            txn.category = to.to_string();
            moved += 1;
        }
        moved
    }

    /// Write the counter, then the list. A failed list write leaves at most
    /// a raised counter behind.
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<()> {
        storage::write_json(store, TRANSACTION_SEQ_KEY, &self.next_id)?;
        storage::write_json(store, TRANSACTIONS_KEY, &self.transactions)?;
        Ok(())
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Records in insertion order.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Most recently added first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The id the next added record will receive, `None` once ids ran out.
    pub fn next_id(&self) -> Option<TransactionId> {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn new_txn(description: &str, amount: f64, category: &str) -> NewTransaction {
        NewTransaction::new(
            description,
            amount,
            category,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_load_missing_is_empty() {
        let records = RecordStore::load(&MemoryStore::new());
        assert!(records.is_empty());
        assert_eq!(records.next_id(), Some(1));
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, "[{\"id\": \"oops\"}]").unwrap();
        store.set(TRANSACTION_SEQ_KEY, "-3").unwrap();
        let records = RecordStore::load(&store);
        assert!(records.is_empty());
        assert_eq!(records.next_id(), Some(1));
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut records = RecordStore::new();
        let a = records.add(new_txn("a", -1.0, "Food")).unwrap();
        let b = records.add(new_txn("b", -2.0, "Food")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        records.remove(b.id);
        let c = records.add(new_txn("c", -3.0, "Food")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_rejected_add_leaves_store_untouched() {
        let mut records = RecordStore::new();
        records.add(new_txn("a", -1.0, "Food")).unwrap();
        let before = records.clone();

        assert_eq!(
            records.add(new_txn("", -1.0, "Food")),
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(
            records.add(new_txn("b", 0.0, "Food")),
            Err(ValidationError::InvalidAmount(0.0))
        );
        assert_eq!(records, before);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut records = RecordStore::new();
        records.add(new_txn("a", 5.0, "Income")).unwrap();
        assert_eq!(records.remove(99), None);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_persist_then_load() {
        let mut store = MemoryStore::new();
        let mut records = RecordStore::new();
        records.add(new_txn("Salary", 100.0, "Income")).unwrap();
        records.add(new_txn("Lunch", -12.5, "Food")).unwrap();
        records.remove(2);
        records.persist(&mut store).unwrap();

        let reloaded = RecordStore::load(&store);
        assert_eq!(reloaded.as_slice(), records.as_slice());
        assert_eq!(reloaded.next_id(), Some(3));
    }

    #[test]
    fn test_counter_raised_above_legacy_ids() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[{"id": 482913, "description": "Rent", "amount": -900, "category": "Housing", "date": "2024-12-01"}]"#,
            )
            .unwrap();

        let mut records = RecordStore::load(&store);
        let txn = records.add(new_txn("Bus", -2.0, "Transportation")).unwrap();
        assert_eq!(txn.id, 482914);
    }

    #[test]
    fn test_duplicate_legacy_ids_are_repaired() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[
                    {"id": 7, "description": "a", "amount": -1, "category": "Food", "date": "2024-12-01"},
                    {"id": 7, "description": "b", "amount": -2, "category": "Food", "date": "2024-12-02"}
                ]"#,
            )
            .unwrap();

        let records = RecordStore::load(&store);
        let ids: Vec<_> = records.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 8]);
        assert_eq!(records.next_id(), Some(9));
    }

    #[test]
    fn test_add_rejected_once_ids_run_out() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[{"id": 18446744073709551614, "description": "Rent", "amount": -900, "category": "Housing", "date": "2024-12-01"}]"#,
            )
            .unwrap();

        let mut records = RecordStore::load(&store);
        let last = records.add(new_txn("Bus", -2.0, "Transportation")).unwrap();
        assert_eq!(last.id, u64::MAX);
        assert_eq!(records.next_id(), None);

        let before = records.clone();
        assert_eq!(
            records.add(new_txn("Tram", -3.0, "Transportation")),
            Err(ValidationError::IdsExhausted)
        );
        assert_eq!(records, before);

        records.persist(&mut store).unwrap();
        let reloaded = RecordStore::load(&store);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.next_id(), None);
    }

    #[test]
    fn test_duplicate_of_max_id_dropped_when_ids_run_out() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[
                    {"id": 18446744073709551615, "description": "a", "amount": -1, "category": "Food", "date": "2024-12-01"},
                    {"id": 18446744073709551615, "description": "b", "amount": -2, "category": "Food", "date": "2024-12-02"}
                ]"#,
            )
            .unwrap();

        let records = RecordStore::load(&store);
        assert_eq!(records.len(), 1);
        assert_eq!(records.as_slice()[0].description, "a");
        assert_eq!(records.next_id(), None);
    }

    #[test]
    fn test_reassign_category_and_newest_first() {
        let mut records = RecordStore::new();
        records.add(new_txn("a", -1.0, "Food")).unwrap();
        records.add(new_txn("b", -2.0, "Utilities")).unwrap();
        records.add(new_txn("c", -3.0, "Food")).unwrap();

        assert_eq!(records.reassign_category("Food", "Other"), 2);
        let cats: Vec<_> = records.newest_first().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["Other", "Utilities", "Other"]);
    }
}
