//! Common test fixtures for community explorer tests.
//!
//! `DatasetBuilder` assembles a valid in-memory store from a handful of
//! location specs, filling in summaries and taxa for every community so tests
//! only spell out what they check.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use community_store::{
    community_column, AttributeStats, CommunitySummary, DatasetPaths, DatasetStore, LocationRecord,
    TaxaWeights, TaxonWeight,
};
use explorer_common::{
    ClimateAttribute, CommunityIndex, CommunityWeights, LocationId, COMMUNITY_COUNT,
};

/// Well-known route paths.
pub mod routes {
    pub const INDEX: &str = "/";
    pub const ABOUT: &str = "/about";
    pub const TAXA: &str = "/taxa";
    pub const MODEL: &str = "/model";
    pub const UNKNOWN: &str = "/does-not-exist";
}

/// The reference location used across scenario tests.
pub mod ames {
    pub const ID: &str = "X1";
    pub const CITY: &str = "AMES";
    pub const STATE: &str = "IA";
    pub const PRECIPITATION: f64 = 86.0;
    pub const TEMPERATURE: f64 = 10.0;
    pub const ELEVATION: f64 = 312.0;
    pub const WEIGHTS: [f64; 2] = [0.4, 0.1];
}

/// Description of one location row. Unset fields get plausible defaults.
#[derive(Debug, Clone)]
pub struct LocationSpec {
    id: String,
    city: String,
    state: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    precipitation: f64,
    temperature: f64,
    weights: Vec<f64>,
}

impl LocationSpec {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            city: "TESTVILLE".to_string(),
            state: "TS".to_string(),
            latitude: 40.0,
            longitude: -95.0,
            elevation: 300.0,
            precipitation: 80.0,
            temperature: 10.0,
            weights: Vec::new(),
        }
    }

    /// Leading community weights; the rest are zero.
    pub fn weights(mut self, weights: &[f64]) -> Self {
        self.weights = weights.to_vec();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.state = state.to_string();
        self
    }

    pub fn lat_lon(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = precipitation;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    fn padded_weights(&self) -> Vec<f64> {
        let mut w = self.weights.clone();
        w.resize(COMMUNITY_COUNT, 0.0);
        w
    }

    pub fn to_record(&self) -> LocationRecord {
        LocationRecord {
            id: LocationId::new(&self.id),
            city: self.city.clone(),
            state: self.state.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            precipitation: self.precipitation,
            temperature: self.temperature,
            weights: CommunityWeights::try_from(self.padded_weights())
                .expect("test weights must be non-negative and finite"),
        }
    }
}

/// Builder for a complete, valid `DatasetStore`.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    locations: Vec<LocationSpec>,
    taxa: HashMap<usize, Vec<(String, f64)>>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, spec: LocationSpec) -> Self {
        self.locations.push(spec);
        self
    }

    pub fn locations(mut self, specs: impl IntoIterator<Item = LocationSpec>) -> Self {
        self.locations.extend(specs);
        self
    }

    /// Replace the default taxa list of one community.
    pub fn taxa(mut self, community: usize, entries: &[(&str, f64)]) -> Self {
        self.taxa.insert(
            community,
            entries.iter().map(|(l, w)| (l.to_string(), *w)).collect(),
        );
        self
    }

    /// Summary statistic used for every community:
    /// mean = `community * 10 + attribute ordinal`, std = 1.
    pub fn default_stats(community: CommunityIndex) -> [AttributeStats; 5] {
        ClimateAttribute::ALL.map(|attr| AttributeStats {
            mean: (community.get() * 10 + attr.ordinal()) as f64,
            std: 1.0,
        })
    }

    fn taxa_entries(&self, community: CommunityIndex) -> Vec<(String, f64)> {
        self.taxa.get(&community.get()).cloned().unwrap_or_else(|| {
            vec![
                (format!("Taxon {}a", community.number()), 0.5),
                (format!("Taxon {}b", community.number()), 0.25),
            ]
        })
    }

    pub fn build(self) -> DatasetStore {
        let locations = self.locations.iter().map(LocationSpec::to_record).collect();
        let summaries = CommunityIndex::all()
            .map(|c| CommunitySummary::new(c, Self::default_stats(c)))
            .collect();
        let taxa = CommunityIndex::all()
            .map(|c| TaxaWeights {
                community: c,
                entries: self
                    .taxa_entries(c)
                    .into_iter()
                    .map(|(label, weight)| TaxonWeight { label, weight })
                    .collect(),
            })
            .collect();

        DatasetStore::new(locations, summaries, taxa).expect("fixture dataset must be valid")
    }

    /// Write the dataset as the three source files under `dir`.
    pub fn write_files(&self, dir: &Path) -> io::Result<DatasetPaths> {
        let paths = DatasetPaths {
            locations: dir.join("locations.csv"),
            summaries: dir.join("summaries.csv"),
            taxa: dir.join("taxa.json"),
        };

        let mut header = vec![
            "ID".to_string(),
            "City".into(),
            "State".into(),
        ];
        header.extend(
            ClimateAttribute::ALL
                .iter()
                .map(|a| a.column_stem().to_string()),
        );
        header.extend(CommunityIndex::all().map(community_column));
        let mut lines = vec![header.join(",")];
        for spec in &self.locations {
            let values = [
                spec.longitude,
                spec.latitude,
                spec.elevation,
                spec.precipitation,
                spec.temperature,
            ];
            let mut cells = vec![spec.id.clone(), spec.city.clone(), spec.state.clone()];
            cells.extend(values.iter().map(|v| v.to_string()));
            cells.extend(spec.padded_weights().iter().map(|v| v.to_string()));
            lines.push(cells.join(","));
        }
        fs::write(&paths.locations, lines.join("\n"))?;

        let mut header = vec!["Community".to_string()];
        for attr in ClimateAttribute::ALL {
            header.push(format!("{}mean", attr.column_stem()));
            header.push(format!("{}std", attr.column_stem()));
        }
        let mut lines = vec![header.join(",")];
        for community in CommunityIndex::all() {
            let mut cells = vec![community.get().to_string()];
            for stats in Self::default_stats(community) {
                cells.push(stats.mean.to_string());
                cells.push(stats.std.to_string());
            }
            lines.push(cells.join(","));
        }
        fs::write(&paths.summaries, lines.join("\n"))?;

        let taxa: HashMap<String, Vec<(String, f64)>> = CommunityIndex::all()
            .map(|c| (c.get().to_string(), self.taxa_entries(c)))
            .collect();
        let json = serde_json::to_string(&taxa).map_err(io::Error::other)?;
        fs::write(&paths.taxa, json)?;

        Ok(paths)
    }
}

/// The reference location as a spec.
pub fn ames_location() -> LocationSpec {
    LocationSpec::new(ames::ID)
        .city(ames::CITY)
        .state(ames::STATE)
        .lat_lon(42.03, -93.62)
        .precipitation(ames::PRECIPITATION)
        .temperature(ames::TEMPERATURE)
        .elevation(ames::ELEVATION)
        .weights(&ames::WEIGHTS)
}

/// A store holding only the reference location.
pub fn ames_store() -> DatasetStore {
    DatasetBuilder::new().location(ames_location()).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pads_weights() {
        let store = DatasetBuilder::new()
            .location(LocationSpec::new("A").weights(&[0.3]))
            .build();
        let loc = store.location_by_id(&LocationId::new("A")).unwrap();
        assert_eq!(loc.weights.as_slice().len(), COMMUNITY_COUNT);
        assert_eq!(loc.weights.as_slice()[0], 0.3);
        assert_eq!(loc.weights.as_slice()[19], 0.0);
    }

    #[test]
    fn test_ames_store() {
        let store = ames_store();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.attribute_max(ClimateAttribute::Precipitation),
            Some(ames::PRECIPITATION)
        );
    }

    #[test]
    fn test_written_files_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let builder = DatasetBuilder::new()
            .location(ames_location())
            .location(
                LocationSpec::new("X2")
                    .city("DES MOINES")
                    .weights(&[0.0, 0.7]),
            )
            .taxa(4, &[("Nitrospira", 0.6), ("Bacillus", 0.2)]);
        let paths = builder.write_files(dir.path()).unwrap();

        let store = DatasetStore::load(&paths).unwrap();
        assert_eq!(store.len(), 2);
        let x2 = store.location_by_id(&LocationId::new("X2")).unwrap();
        assert_eq!(x2.weights.as_slice()[1], 0.7);
        assert_eq!(
            store.taxa_for_community(4).unwrap().entries[0].label,
            "Nitrospira"
        );
        assert_eq!(
            store.community_summary(3).unwrap().stats(ClimateAttribute::Elevation).mean,
            32.0
        );
    }
}
