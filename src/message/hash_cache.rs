//! Callsign hash cache for resolving non-standard callsigns.
//!
//! Ported from `examples/N0YPR-RustyFt8/src/message/hash_cache.rs`. Non-
//! standard callsigns are exchanged using a two-message protocol: the first
//! message spells the callsign out in full (and its hash), later messages
//! reference it by hash alone. This cache remembers that mapping across a
//! decode run. The teacher uses `hashbrown`+`ahash` for this map; this
//! crate keeps the standard library's `HashMap` instead, since the pack's
//! Cargo.toml does not carry those two crates and the batch workloads here
//! never approach a scale where the hasher choice matters.

use super::callsign::{hash12, hash22, ihashcall};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CallsignHashCache {
    cache_10bit: HashMap<u16, String>,
    cache_12bit: HashMap<u16, String>,
    cache_22bit: HashMap<u32, String>,
}

impl CallsignHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes all three hash widths for `callsign` and stores it under
    /// each.
    pub fn insert(&mut self, callsign: &str) {
        let hash10 = ihashcall(callsign, 10) as u16;
        self.cache_10bit.insert(hash10, callsign.to_string());
        self.cache_12bit.insert(hash12(callsign), callsign.to_string());
        self.cache_22bit.insert(hash22(callsign), callsign.to_string());
    }

    /// Stores `callsign` under precomputed 12-bit and 22-bit hashes.
    pub fn insert_with_hashes(&mut self, callsign: &str, hash12: u16, hash22: u32) {
        self.cache_12bit.insert(hash12, callsign.to_string());
        self.cache_22bit.insert(hash22, callsign.to_string());
    }

    pub fn lookup_10bit(&self, hash10: u16) -> Option<&String> {
        self.cache_10bit.get(&hash10)
    }

    pub fn lookup_12bit(&self, hash12: u16) -> Option<&String> {
        self.cache_12bit.get(&hash12)
    }

    pub fn lookup_22bit(&self, hash22: u32) -> Option<&String> {
        self.cache_22bit.get(&hash22)
    }

    pub fn clear(&mut self) {
        self.cache_10bit.clear();
        self.cache_12bit.clear();
        self.cache_22bit.clear();
    }

    /// Entry counts, as (10-bit, 12-bit, 22-bit).
    pub fn len(&self) -> (usize, usize, usize) {
        (self.cache_10bit.len(), self.cache_12bit.len(), self.cache_22bit.len())
    }

    pub fn is_empty(&self) -> bool {
        self.cache_10bit.is_empty() && self.cache_12bit.is_empty() && self.cache_22bit.is_empty()
    }
}
