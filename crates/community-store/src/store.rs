//! The immutable dataset store.

use std::collections::HashMap;

use explorer_common::{
    ClimateAttribute, CommunityIndex, ExplorerError, ExplorerResult, LocationId, COMMUNITY_COUNT,
};

use crate::error::LoadError;
use crate::records::{CommunitySummary, LocationRecord, TaxaWeights};

/// Weight totals above this are reported but accepted.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// All location records plus per-community summaries and taxa.
///
/// Read-only after construction.
#[derive(Debug)]
pub struct DatasetStore {
    locations: Vec<LocationRecord>,
    by_id: HashMap<LocationId, usize>,
    /// Position equals community index.
    summaries: Vec<CommunitySummary>,
    /// Position equals community index.
    taxa: Vec<TaxaWeights>,
    /// Indexed by `ClimateAttribute::ordinal`.
    attribute_max: [Option<f64>; 5],
}

impl DatasetStore {
    /// Validate and index the dataset.
    ///
    /// Summaries and taxa may arrive in any order but must cover every
    /// community exactly once.
    pub fn new(
        locations: Vec<LocationRecord>,
        summaries: Vec<CommunitySummary>,
        taxa: Vec<TaxaWeights>,
    ) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(locations.len());
        for (i, loc) in locations.iter().enumerate() {
            if by_id.insert(loc.id.clone(), i).is_some() {
                return Err(LoadError::DuplicateLocation(loc.id.to_string()));
            }
            let total = loc.weights.total();
            if total > 1.0 + WEIGHT_SUM_TOLERANCE {
                tracing::warn!(
                    location = %loc.id,
                    total,
                    "Community weights sum above 1"
                );
            }
        }

        let summaries = order_by_community(summaries, "community summaries", |s| s.community)?;
        let taxa = order_by_community(taxa, "taxa lists", |t| t.community)?;

        for t in &taxa {
            if let Some(entry) = t.first_order_violation() {
                return Err(LoadError::UnsortedTaxa {
                    community: t.community.get(),
                    entry,
                });
            }
        }

        let attribute_max = ClimateAttribute::ALL.map(|attr| {
            locations
                .iter()
                .map(|loc| loc.value(attr))
                .filter(|v| v.is_finite())
                .reduce(f64::max)
        });

        tracing::info!(
            locations = locations.len(),
            communities = COMMUNITY_COUNT,
            "Dataset store built"
        );

        Ok(Self {
            locations,
            by_id,
            summaries,
            taxa,
            attribute_max,
        })
    }

    /// Look up a location by identifier.
    pub fn location_by_id(&self, id: &LocationId) -> ExplorerResult<&LocationRecord> {
        self.by_id
            .get(id)
            .map(|&i| &self.locations[i])
            .ok_or_else(|| ExplorerError::NotFound(id.to_string()))
    }

    /// All locations in load order.
    pub fn all_locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Summary of a community by raw index.
    pub fn community_summary(&self, index: usize) -> ExplorerResult<&CommunitySummary> {
        let idx = CommunityIndex::try_from(index)?;
        Ok(self.summary(idx))
    }

    /// Top taxa of a community by raw index.
    pub fn taxa_for_community(&self, index: usize) -> ExplorerResult<&TaxaWeights> {
        let idx = CommunityIndex::try_from(index)?;
        Ok(self.taxa(idx))
    }

    /// Summary of a validated community.
    pub fn summary(&self, community: CommunityIndex) -> &CommunitySummary {
        &self.summaries[community.get()]
    }

    pub fn summaries(&self) -> &[CommunitySummary] {
        &self.summaries
    }

    /// Taxa of a validated community.
    pub fn taxa(&self, community: CommunityIndex) -> &TaxaWeights {
        &self.taxa[community.get()]
    }

    /// Dataset-wide maximum of an attribute over finite values.
    ///
    /// `None` only for an empty dataset.
    pub fn attribute_max(&self, attr: ClimateAttribute) -> Option<f64> {
        self.attribute_max[attr.ordinal()]
    }
}

/// Place each item at the position of its community, rejecting gaps and repeats.
fn order_by_community<T>(
    items: Vec<T>,
    what: &'static str,
    community: impl Fn(&T) -> CommunityIndex,
) -> Result<Vec<T>, LoadError> {
    if items.len() != COMMUNITY_COUNT {
        return Err(LoadError::WrongCount {
            what,
            expected: COMMUNITY_COUNT,
            found: items.len(),
        });
    }

    let mut slots: Vec<Option<T>> = (0..COMMUNITY_COUNT).map(|_| None).collect();
    for item in items {
        let idx = community(&item).get();
        if slots[idx].replace(item).is_some() {
            return Err(LoadError::InvalidRecord(format!(
                "{} repeat community {}",
                what, idx
            )));
        }
    }

    // Exactly COMMUNITY_COUNT items without repeats fill every slot.
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AttributeStats, TaxonWeight};
    use explorer_common::CommunityWeights;

    fn location(id: &str, precipitation: f64, weights: Vec<f64>) -> LocationRecord {
        let mut full = weights;
        full.resize(COMMUNITY_COUNT, 0.0);
        LocationRecord {
            id: LocationId::new(id),
            city: "AMES".into(),
            state: "IA".into(),
            latitude: 42.0,
            longitude: -93.6,
            elevation: 312.0,
            precipitation,
            temperature: 10.0,
            weights: CommunityWeights::try_from(full).unwrap(),
        }
    }

    fn summaries() -> Vec<CommunitySummary> {
        CommunityIndex::all()
            .map(|c| {
                let m = c.get() as f64;
                CommunitySummary::new(c, [AttributeStats { mean: m, std: 1.0 }; 5])
            })
            .collect()
    }

    fn taxa() -> Vec<TaxaWeights> {
        CommunityIndex::all()
            .map(|c| TaxaWeights {
                community: c,
                entries: vec![
                    TaxonWeight {
                        label: format!("OTU{}a", c),
                        weight: 0.3,
                    },
                    TaxonWeight {
                        label: format!("OTU{}b", c),
                        weight: 0.1,
                    },
                ],
            })
            .collect()
    }

    #[test]
    fn test_lookup_by_id() {
        let store = DatasetStore::new(
            vec![location("X1", 86.0, vec![0.4]), location("X2", 40.0, vec![])],
            summaries(),
            taxa(),
        )
        .unwrap();

        assert_eq!(
            store.location_by_id(&"X2".into()).unwrap().precipitation,
            40.0
        );
        assert_eq!(
            store.location_by_id(&"nope".into()),
            Err(ExplorerError::NotFound("nope".into()))
        );
        let ids: Vec<_> = store
            .all_locations()
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, ["X1", "X2"]);
    }

    #[test]
    fn test_community_ranges() {
        let store = DatasetStore::new(vec![], summaries(), taxa()).unwrap();
        for i in 0..COMMUNITY_COUNT {
            assert_eq!(store.community_summary(i).unwrap().community.get(), i);
            assert_eq!(store.taxa_for_community(i).unwrap().community.get(), i);
        }
        assert_eq!(
            store.community_summary(20),
            Err(ExplorerError::OutOfRange(20))
        );
        assert_eq!(
            store.taxa_for_community(99),
            Err(ExplorerError::OutOfRange(99))
        );
    }

    #[test]
    fn test_summaries_reordered_by_index() {
        let mut shuffled = summaries();
        shuffled.reverse();
        let store = DatasetStore::new(vec![], shuffled, taxa()).unwrap();
        assert_eq!(
            store.summary(CommunityIndex::new(3).unwrap()).community.get(),
            3
        );
    }

    #[test]
    fn test_duplicate_location_rejected() {
        let err = DatasetStore::new(
            vec![location("X1", 1.0, vec![]), location("X1", 2.0, vec![])],
            summaries(),
            taxa(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateLocation(id) if id == "X1"));
    }

    #[test]
    fn test_missing_summary_rejected() {
        let mut partial = summaries();
        partial.pop();
        let err = DatasetStore::new(vec![], partial, taxa()).unwrap_err();
        assert!(matches!(err, LoadError::WrongCount { found: 19, .. }));
    }

    #[test]
    fn test_unsorted_taxa_rejected() {
        let mut bad = taxa();
        bad[5].entries.reverse();
        let err = DatasetStore::new(vec![], summaries(), bad).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsortedTaxa {
                community: 5,
                entry: 1
            }
        ));
    }

    #[test]
    fn test_attribute_max_skips_non_finite() {
        let store = DatasetStore::new(
            vec![
                location("A", 86.0, vec![]),
                location("B", f64::NAN, vec![]),
                location("C", 120.5, vec![]),
            ],
            summaries(),
            taxa(),
        )
        .unwrap();
        assert_eq!(
            store.attribute_max(ClimateAttribute::Precipitation),
            Some(120.5)
        );

        let empty = DatasetStore::new(vec![], summaries(), taxa()).unwrap();
        assert_eq!(empty.attribute_max(ClimateAttribute::Precipitation), None);
    }
}
