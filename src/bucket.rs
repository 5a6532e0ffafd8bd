//! Chains of key-value entries sharing one bucket index

use std::{iter, mem};

/// A key-value pair owned by the bucket it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
}

/// An ordered chain of entries whose keys hash to the same index.
///
/// Entries keep append order; removing one shifts the later entries left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bucket<V> {
    /// Entries in insertion order
    entries: Vec<Entry<V>>,
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Bucket<V> {
    /// Creates an empty chain
    pub(crate) const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of entries in the chain
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Position of `key` within the chain, found by linear scan
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Returns the value stored under `key`
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.iter_mut().find(|entry| entry.key == key).map(|entry| &mut entry.value)
    }

    /// Overwrites the value of an existing key in place.
    ///
    /// Hands the value back as `Err` when the key is not in the chain.
    pub(crate) fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        match self.get_mut(key) {
            Some(slot) => Ok(mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Appends a new entry; the caller guarantees `key` is not already present
    pub(crate) fn push(&mut self, key: String, value: V) {
        self.entries.push(Entry { key, value });
    }

    /// Removes `key` from the chain, keeping the relative order of the rest
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let position = self.position(key)?;
        Some(self.entries.remove(position).value)
    }

    /// Iterates the entries in chain order
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<V>> {
        self.entries.iter()
    }

    /// Returns the entry at `position` within the chain
    pub(crate) fn entry(&self, position: usize) -> Option<&Entry<V>> {
        self.entries.get(position)
    }

    /// Consumes the chain, yielding its entries in order
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry<V>> {
        self.entries.into_iter()
    }
}

/// Allocates `capacity` empty buckets.
///
/// Every slot is built by its own constructor call, so no two buckets ever share
/// storage.
pub(crate) fn allocate_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    iter::repeat_with(Bucket::new).take(capacity).collect()
}
