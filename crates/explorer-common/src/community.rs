//! Community indices and per-location community weights.

use serde::{Deserialize, Serialize};

use crate::{ExplorerError, ExplorerResult};

/// Number of latent communities produced by the upstream clustering model.
pub const COMMUNITY_COUNT: usize = 20;

/// A validated community index in `0..COMMUNITY_COUNT`.
///
/// Construction is the only place an out-of-range index can be rejected;
/// everything downstream indexes weights and summaries without checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct CommunityIndex(u8);

impl CommunityIndex {
    /// Validate a raw index.
    pub fn new(index: i64) -> ExplorerResult<Self> {
        if (0..COMMUNITY_COUNT as i64).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(ExplorerError::OutOfRange(index))
        }
    }

    /// Zero-based index.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// One-based community number, as shown to users.
    pub fn number(self) -> usize {
        self.get() + 1
    }

    /// All community indices in ascending order.
    pub fn all() -> impl Iterator<Item = CommunityIndex> {
        (0..COMMUNITY_COUNT as u8).map(CommunityIndex)
    }
}

impl TryFrom<usize> for CommunityIndex {
    type Error = ExplorerError;

    fn try_from(index: usize) -> ExplorerResult<Self> {
        i64::try_from(index)
            .map_err(|_| ExplorerError::OutOfRange(i64::MAX))
            .and_then(CommunityIndex::new)
    }
}

impl<'de> Deserialize<'de> for CommunityIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        CommunityIndex::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CommunityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The weight of every community at one location.
///
/// Always exactly `COMMUNITY_COUNT` entries, each finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommunityWeights([f64; COMMUNITY_COUNT]);

impl CommunityWeights {
    /// Weight of a single community.
    pub fn get(&self, index: CommunityIndex) -> f64 {
        self.0[index.get()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommunityIndex, f64)> + '_ {
        CommunityIndex::all().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for CommunityWeights {
    type Error = ExplorerError;

    fn try_from(values: Vec<f64>) -> ExplorerResult<Self> {
        let len = values.len();
        let array: [f64; COMMUNITY_COUNT] = values.try_into().map_err(|_| {
            ExplorerError::DatasetLoad(format!(
                "community weight vector has {} entries, expected {}",
                len, COMMUNITY_COUNT
            ))
        })?;

        if let Some((i, w)) = array
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ExplorerError::DatasetLoad(format!(
                "community {} has invalid weight {}",
                i, w
            )));
        }

        Ok(Self(array))
    }
}
