//! Readers for the three dataset source files.
//!
//! - locations: CSV, one row per site, community weights in `Community 0`..`Community 19`
//! - summaries: CSV, one row per community, `<Attr>mean` / `<Attr>std` columns
//! - taxa: JSON object keyed by community index, lists of label/weight pairs

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use explorer_common::{
    ClimateAttribute, CommunityIndex, CommunityWeights, LocationId, COMMUNITY_COUNT,
};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::records::{AttributeStats, CommunitySummary, LocationRecord, TaxaWeights, TaxonWeight};
use crate::store::DatasetStore;

/// Location of the three source files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub locations: PathBuf,
    pub summaries: PathBuf,
    pub taxa: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            locations: PathBuf::from("data/com_20_all_all.csv"),
            summaries: PathBuf::from("data/com_20_all_all_para.csv"),
            taxa: PathBuf::from("data/com_20_top_taxa.json"),
        }
    }
}

impl DatasetStore {
    /// Read and validate all three source files.
    pub fn load(paths: &DatasetPaths) -> Result<Self, LoadError> {
        let locations = load_locations_csv(open(&paths.locations)?)?;
        let summaries = load_summaries_csv(open(&paths.summaries)?)?;
        let taxa = load_taxa_json(open(&paths.taxa)?)?;

        tracing::info!(
            locations = locations.len(),
            path = %paths.locations.display(),
            "Loaded dataset files"
        );

        DatasetStore::new(locations, summaries, taxa)
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Column name of a community weight.
pub fn community_column(index: CommunityIndex) -> String {
    format!("Community {}", index.get())
}

/// Header name to position lookup.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.to_string(), i))
                .collect(),
        )
    }

    fn require(&self, name: &str) -> Result<usize, LoadError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

fn cell<'r>(record: &'r StringRecord, col: usize) -> &'r str {
    record.get(col).unwrap_or("")
}

fn parse_f64(record: &StringRecord, col: usize, row: usize, name: &str) -> Result<f64, LoadError> {
    let raw = cell(record, col);
    raw.parse::<f64>().map_err(|_| LoadError::InvalidValue {
        row,
        column: name.to_string(),
        value: raw.to_string(),
    })
}

/// Like `parse_f64`, but `NaN` and infinities are rejected too.
fn parse_finite(
    record: &StringRecord,
    col: usize,
    row: usize,
    name: &str,
) -> Result<f64, LoadError> {
    let value = parse_f64(record, col, row, name)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LoadError::InvalidValue {
            row,
            column: name.to_string(),
            value: cell(record, col).to_string(),
        })
    }
}

/// Parse the per-location CSV.
pub fn load_locations_csv<R: Read>(reader: R) -> Result<Vec<LocationRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let columns = Columns::from_headers(rdr.headers()?);

    let id_col = columns.require("ID")?;
    let city_col = columns.require("City")?;
    let state_col = columns.require("State")?;
    let attr_cols = ClimateAttribute::ALL
        .iter()
        .map(|attr| columns.require(attr.column_stem()).map(|c| (*attr, c)))
        .collect::<Result<Vec<_>, _>>()?;
    let weight_cols = CommunityIndex::all()
        .map(|c| {
            let name = community_column(c);
            columns.require(&name).map(|col| (col, name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut locations = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;

        let mut values = [0.0; 5];
        for (attr, col) in &attr_cols {
            values[attr.ordinal()] = parse_finite(&record, *col, row, attr.column_stem())?;
        }

        let weights = weight_cols
            .iter()
            .map(|(col, name)| parse_f64(&record, *col, row, name))
            .collect::<Result<Vec<_>, _>>()?;
        let weights = CommunityWeights::try_from(weights)
            .map_err(|e| LoadError::InvalidRecord(format!("row {}: {}", row, e)))?;

        let value = |attr: ClimateAttribute| values[attr.ordinal()];
        locations.push(LocationRecord {
            id: LocationId::new(cell(&record, id_col)),
            city: cell(&record, city_col).to_string(),
            state: cell(&record, state_col).to_string(),
            latitude: value(ClimateAttribute::Latitude),
            longitude: value(ClimateAttribute::Longitude),
            elevation: value(ClimateAttribute::Elevation),
            precipitation: value(ClimateAttribute::Precipitation),
            temperature: value(ClimateAttribute::Temperature),
            weights,
        });
    }

    tracing::debug!(count = locations.len(), "Parsed location rows");
    Ok(locations)
}

/// Parse the per-community summary CSV.
///
/// Rows are matched to communities by an optional `Community` column, falling
/// back to row order.
pub fn load_summaries_csv<R: Read>(reader: R) -> Result<Vec<CommunitySummary>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let columns = Columns::from_headers(rdr.headers()?);

    let community_col = columns.optional("Community");
    let stat_cols = ClimateAttribute::ALL
        .iter()
        .map(|attr| -> Result<_, LoadError> {
            let mean = format!("{}mean", attr.column_stem());
            let std = format!("{}std", attr.column_stem());
            Ok((columns.require(&mean)?, mean, columns.require(&std)?, std))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    let mut summaries = Vec::with_capacity(COMMUNITY_COUNT);
    for (row, result) in rdr.records().enumerate() {
        let record = result?;

        let community = match community_col {
            Some(col) => {
                let raw = parse_f64(&record, col, row, "Community")?;
                if raw.fract() != 0.0 {
                    return Err(LoadError::InvalidValue {
                        row,
                        column: "Community".to_string(),
                        value: cell(&record, col).to_string(),
                    });
                }
                CommunityIndex::new(raw as i64)?
            }
            None => CommunityIndex::try_from(row)?,
        };

        let mut stats = [AttributeStats {
            mean: 0.0,
            std: 0.0,
        }; 5];
        for (slot, (mean_col, mean_name, std_col, std_name)) in stats.iter_mut().zip(&stat_cols) {
            *slot = AttributeStats {
                mean: parse_finite(&record, *mean_col, row, mean_name)?,
                std: parse_finite(&record, *std_col, row, std_name)?,
            };
        }

        summaries.push(CommunitySummary::new(community, stats));
    }

    Ok(summaries)
}

/// A taxon entry as written upstream: either a pair or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTaxon {
    Pair(String, f64),
    Object { label: String, weight: f64 },
}

impl From<RawTaxon> for TaxonWeight {
    fn from(raw: RawTaxon) -> Self {
        match raw {
            RawTaxon::Pair(label, weight) | RawTaxon::Object { label, weight } => {
                TaxonWeight { label, weight }
            }
        }
    }
}

/// Parse the community-to-taxa JSON mapping.
pub fn load_taxa_json<R: Read>(reader: R) -> Result<Vec<TaxaWeights>, LoadError> {
    let raw: HashMap<String, Vec<RawTaxon>> = serde_json::from_reader(reader)?;

    let mut taxa = raw
        .into_iter()
        .map(|(key, entries)| -> Result<_, LoadError> {
            let index: i64 = key.trim().parse().map_err(|_| {
                LoadError::InvalidRecord(format!("taxa key '{}' is not a community index", key))
            })?;
            Ok(TaxaWeights {
                community: CommunityIndex::new(index)?,
                entries: entries.into_iter().map(TaxonWeight::from).collect(),
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    taxa.sort_by_key(|t| t.community);
    Ok(taxa)
}
