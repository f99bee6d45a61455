//! Memoization of derivation results.
//!
//! Derivations are pure and the store is immutable, so a result depends only
//! on the output and the values of its declared inputs. Only successful
//! results are cached.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use explorer_common::OutputId;
use lru::LruCache;
use serde::Serialize;

use crate::inputs::InputSnapshot;

type MemoKey = (OutputId, InputSnapshot);

/// Statistics for the memo cache.
#[derive(Debug, Default)]
pub struct MemoStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
}

impl MemoStats {
    /// Cache hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    pub fn snapshot(&self) -> MemoStatsSnapshot {
        MemoStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            hit_rate: self.hit_rate(),
        }
    }
}

/// Point-in-time copy of the stats, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Bounded LRU of derivation results.
pub struct MemoCache<A> {
    cache: Mutex<LruCache<MemoKey, A>>,
    stats: MemoStats,
}

impl<A: Clone> MemoCache<A> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        tracing::info!(capacity = capacity.get(), "Memo cache initialized");
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            stats: MemoStats::default(),
        }
    }

    pub fn get(&self, output: OutputId, snapshot: &InputSnapshot) -> Option<A> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        match cache.get(&(output, snapshot.clone())) {
            Some(value) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("explorer_memo_hits_total", "output" => output.as_str())
                    .increment(1);
                Some(value.clone())
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("explorer_memo_misses_total", "output" => output.as_str())
                    .increment(1);
                None
            }
        }
    }

    pub fn put(&self, output: OutputId, snapshot: InputSnapshot, value: A) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.put((output, snapshot), value);
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> &MemoStats {
        &self.stats
    }
}
