//! Keyed, ordered record tables.
//!
//! Each component owns one or more [`Table`]s; the host persists them as a
//! unit per call, so the table itself needs no durability or locking. Rows
//! remember which account paid for their creation, preserved as an audit
//! association rather than a metering mechanism.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Account;

/// A table row: the record value plus the account billed for its creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row<V> {
    /// The stored record.
    pub value: V,
    /// Storage payer recorded at insertion.
    pub payer: Account,
}

/// An ordered, keyed record table.
///
/// Iteration order is ascending by key and independent of insertion order;
/// "latest" always means the row with the greatest key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<K: Ord, V> {
    #[serde(skip)]
    name: &'static str,
    rows: BTreeMap<K, Row<V>>,
}

impl<K: Ord + Clone + std::fmt::Debug, V> Table<K, V> {
    /// Create an empty table with a name used in trace output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: BTreeMap::new(),
        }
    }

    /// Look up a record by key.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.rows.get(key).map(|row| &row.value)
    }

    /// Whether a record exists for the key.
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// Storage payer recorded for a key's row, if present.
    pub fn payer(&self, key: &K) -> Option<&Account> {
        self.rows.get(key).map(|row| &row.payer)
    }

    /// Insert a new row, billing `payer` for its storage.
    ///
    /// Callers check for an existing row first; inserting over an existing
    /// key replaces it.
    pub fn insert(&mut self, key: K, value: V, payer: Account) {
        tracing::trace!(table = self.name, key = ?key, payer = %payer, "insert row");
        self.rows.insert(key, Row { value, payer });
    }

    /// Load a row's value, apply `mutate`, and write it back in place.
    ///
    /// When `payer` is `Some`, the row's storage payer is re-attributed;
    /// `None` leaves it unchanged. Returns `false` when no row exists.
    pub fn modify(&mut self, key: &K, payer: Option<Account>, mutate: impl FnOnce(&mut V)) -> bool {
        match self.rows.get_mut(key) {
            Some(row) => {
                mutate(&mut row.value);
                if let Some(payer) = payer {
                    row.payer = payer;
                }
                tracing::trace!(table = self.name, key = ?key, "modify row");
                true
            }
            None => false,
        }
    }

    /// Remove a row, returning it if present.
    pub fn erase(&mut self, key: &K) -> Option<Row<V>> {
        let removed = self.rows.remove(key);
        if removed.is_some() {
            tracing::trace!(table = self.name, key = ?key, "erase row");
        }
        removed
    }

    /// Ascending-by-key iteration over records.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter().map(|(k, row)| (k, &row.value))
    }

    /// The record with the greatest key, if any.
    pub fn latest(&self) -> Option<(&K, &V)> {
        self.rows.last_key_value().map(|(k, row)| (k, &row.value))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
