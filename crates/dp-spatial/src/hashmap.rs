//! Growable hash map with load-factor-triggered rehashing.
//!
//! # Layout
//!
//! Entries live in one arena `Vec` in insertion order.  Each bucket stores the
//! arena index of the head of its chain, and every entry stores the index of
//! the next entry in the same bucket:
//!
//! ```text
//! buckets:  [ 2 | NIL | 0 | NIL ]
//!             │         │
//!             ▼         ▼
//! entries:  #2 ──► #1   #0
//! ```
//!
//! Growing doubles the bucket array and relinks every chain.  Entries never
//! move, so arena indices stay valid across a resize and no value is ever
//! referenced through a stale pointer.  The whole resize runs inside one
//! `&mut self` call; callers cannot observe a half-rehashed map.
//!
//! Keys are bucketed with [`FxHasher`]: street-map keys are short decimal
//! strings and do not need DoS-resistant hashing.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use dp_core::IndexConfig;

/// Chain terminator.
const NIL: u32 = u32::MAX;

struct Entry<K, V> {
    key:   K,
    value: V,
    next:  u32,
}

/// Hash map that doubles its bucket count whenever
/// `len / bucket_count > max_load_factor`.
pub struct ExpandableHashMap<K, V> {
    entries:         Vec<Entry<K, V>>,
    buckets:         Vec<u32>,
    max_load_factor: f64,
}

#[inline]
fn bucket_index<K: Hash>(key: &K, bucket_count: usize) -> usize {
    let mut h = FxHasher::default();
    key.hash(&mut h);
    (h.finish() % bucket_count as u64) as usize
}

impl<K: Hash + Eq, V> ExpandableHashMap<K, V> {
    /// Empty map with the default sizing policy (8 buckets, load factor 0.5).
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Empty map with an explicit sizing policy.  `config` should have
    /// passed [`IndexConfig::validate`]; out-of-range values are clamped
    /// into the accepted bounds and a NaN load factor falls back to the
    /// default.
    pub fn with_config(config: IndexConfig) -> Self {
        let initial_buckets = config.initial_buckets.clamp(1, IndexConfig::MAX_INITIAL_BUCKETS);
        let max_load_factor = if config.max_load_factor.is_nan() {
            IndexConfig::default().max_load_factor
        } else {
            config.max_load_factor.max(IndexConfig::MIN_LOAD_FACTOR)
        };
        Self {
            entries: Vec::new(),
            buckets: vec![NIL; initial_buckets],
            max_load_factor,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.entries.len() as f64 / self.buckets.len() as f64
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    fn position(&self, key: &K) -> Option<usize> {
        let mut cur = self.buckets[bucket_index(key, self.buckets.len())];
        while cur != NIL {
            let entry = &self.entries[cur as usize];
            if entry.key == *key {
                return Some(cur as usize);
            }
            cur = entry.next;
        }
        None
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        let i = self.position(key)?;
        Some(&self.entries[i].value)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `key → value`, overwriting and returning any previous value.
    pub fn associate(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.push_new(key, value);
                None
            }
        }
    }

    fn push_new(&mut self, key: K, value: V) {
        let idx = self.entries.len();
        let b = bucket_index(&key, self.buckets.len());
        self.entries.push(Entry { key, value, next: self.buckets[b] });
        self.buckets[b] = idx as u32;

        while self.load_factor() > self.max_load_factor {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let bucket_count = self.buckets.len() * 2;
        self.buckets = vec![NIL; bucket_count];
        for i in 0..self.entries.len() {
            let b = bucket_index(&self.entries[i].key, bucket_count);
            self.entries[i].next = self.buckets[b];
            self.buckets[b] = i as u32;
        }
        tracing::trace!(buckets = bucket_count, entries = self.entries.len(), "index rehashed");
    }
}

impl<K: Hash + Eq, V> Default for ExpandableHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
