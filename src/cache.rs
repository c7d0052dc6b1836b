//! Concurrent memoization of inverse matrices keyed by erasure pattern.
//!
//! `Decode` spends most of its setup cost inverting a k x k submatrix
//! selected by the caller's erasure list; for a storage system that
//! repeatedly sees the same handful of erasure patterns (a fixed set of
//! failed drives, say), caching that inverse across calls avoids redoing
//! the Gauss-Jordan elimination every time. Keys are compared by value —
//! the sorted erasure list itself — never by reference or pointer
//! identity.
//!
//! Backed by [`dashmap::DashMap`], a sharded, lock-striped map: readers on
//! different shards never block each other, and a miss only holds the
//! lock for the shard being populated.

use dashmap::DashMap;

use crate::error::Error;
use crate::matrix::Matrix;

/// A concurrent-safe cache from erasure list to the precomputed k x k
/// inverse matrix used to reconstruct data shards for that pattern.
#[derive(Default)]
pub struct InverseCache {
    entries: DashMap<Vec<usize>, Matrix>,
}

impl InverseCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the cached inverse for `key`, computing and inserting it on
    /// miss via `compute`. Concurrent misses for the same key may race and
    /// recompute independently; that race is tolerated, so no extra
    /// locking is done beyond what `DashMap` already provides.
    pub fn lookup_or_compute<F>(&self, key: &[usize], compute: F) -> Result<Matrix, Error>
    where
        F: FnOnce() -> Result<Matrix, Error>,
    {
        if let Some(hit) = self.entries.get(key) {
            tracing::trace!(?key, "inverse cache hit");
            return Ok(hit.clone());
        }
        tracing::debug!(?key, "inverse cache miss, computing inverse");
        let computed = compute()?;
        self.entries.entry(key.to_vec()).or_insert_with(|| computed.clone());
        Ok(computed)
    }

    /// Number of distinct erasure patterns currently memoized.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
