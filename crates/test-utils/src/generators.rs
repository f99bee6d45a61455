//! Synthetic dataset generators.
//!
//! These produce predictable, verifiable data so larger tests can check
//! properties across many locations without shipping fixture files.

use crate::fixtures::LocationSpec;
use explorer_common::COMMUNITY_COUNT;

/// Deterministic pseudo-random sequence (64-bit LCG).
///
/// The same seed always yields the same sequence on every platform.
#[derive(Debug, Clone)]
pub struct SeededSequence(u64);

impl SeededSequence {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next value in `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// Community weights that sum to one.
///
/// One dominant community (chosen by the sequence) takes half the mass and
/// the remainder is spread over the others.
pub fn create_weights(seq: &mut SeededSequence) -> Vec<f64> {
    let raw: Vec<f64> = (0..COMMUNITY_COUNT).map(|_| seq.next_unit()).collect();
    let dominant = (seq.next_unit() * COMMUNITY_COUNT as f64) as usize % COMMUNITY_COUNT;
    let rest: f64 = raw
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != dominant)
        .map(|(_, v)| v)
        .sum();

    raw.iter()
        .enumerate()
        .map(|(i, v)| {
            if i == dominant {
                0.5
            } else if rest > 0.0 {
                0.5 * v / rest
            } else {
                0.0
            }
        })
        .collect()
}

/// Generate `count` locations spread over the contiguous United States.
///
/// Ids are `S0000`, `S0001`, ... Climate values stay within realistic
/// bounds: precipitation 10..200 cm, temperature -5..25 C, elevation 0..3000 m.
pub fn create_synthetic_locations(count: usize, seed: u64) -> Vec<LocationSpec> {
    let mut seq = SeededSequence::new(seed);
    (0..count)
        .map(|i| {
            LocationSpec::new(&format!("S{:04}", i))
                .city(&format!("SITE {}", i))
                .state("US")
                .lat_lon(seq.next_range(25.0, 49.0), seq.next_range(-124.0, -67.0))
                .precipitation(seq.next_range(10.0, 200.0))
                .temperature(seq.next_range(-5.0, 25.0))
                .elevation(seq.next_range(0.0, 3000.0))
                .weights(&create_weights(&mut seq))
        })
        .collect()
}
