//! Bounded in-memory cache of password verification outcomes.
//!
//! The cache does not lock itself. [`AuthGate`](crate::gate::AuthGate) keeps it
//! behind a single mutex and holds that mutex only around [`lookup`],
//! [`make_room`] and [`store`], never across a hash comparison.
//!
//! [`lookup`]: CredentialCache::lookup
//! [`make_room`]: CredentialCache::make_room
//! [`store`]: CredentialCache::store

use std::collections::HashMap;
use std::fmt;

/// Default number of outcomes kept in memory.
pub const DEFAULT_CAPACITY: usize = 100;

/// Cache key derived from `(username, password hash, supplied password)`.
///
/// The key embeds the plaintext password, so it must never be logged or
/// persisted. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hex-encodes `username ++ hash ++ password`.
    pub fn derive(username: &str, hash: &str, password: &str) -> Self {
        let mut raw = Vec::with_capacity(username.len() + hash.len() + password.len());
        raw.extend_from_slice(username.as_bytes());
        raw.extend_from_slice(hash.as_bytes());
        raw.extend_from_slice(password.as_bytes());
        Self(hex::encode(raw))
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheKey(<redacted>)")
    }
}

/// Fixed-capacity map from [`CacheKey`] to a verification outcome.
///
/// Eviction removes one arbitrary entry, whichever the map yields first.
/// A capacity of zero disables caching.
#[derive(Debug)]
pub struct CredentialCache {
    capacity: usize,
    entries: HashMap<CacheKey, bool>,
}

impl CredentialCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached outcome, or `None` on a miss.
    pub fn lookup(&self, key: &CacheKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// Evicts one entry if the cache is at capacity.
    pub fn make_room(&mut self) {
        if self.entries.len() < self.capacity {
            return;
        }
        let victim = self.entries.keys().next().cloned();
        if let Some(victim) = victim {
            self.entries.remove(&victim);
        }
    }

    /// Inserts or overwrites an outcome.
    ///
    /// A new key first makes room, so the bound holds even when two misses
    /// raced past [`make_room`](Self::make_room) before either stored.
    pub fn store(&mut self, key: CacheKey, outcome: bool) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) {
            self.make_room();
        }
        self.entries.insert(key, outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CredentialCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
