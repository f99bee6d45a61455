//! Top-taxa table for the selected community.

use community_store::DatasetStore;
use explorer_common::{CommunityIndex, ExplorerResult};
use serde::Serialize;

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxaRow {
    /// 1-based position in the stored order.
    pub rank: usize,
    pub label: String,
    /// Rounded to two decimals.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxaTable {
    pub community: CommunityIndex,
    pub rows: Vec<TaxaRow>,
}

impl TaxaTable {
    pub fn columns() -> [&'static str; 3] {
        ["Rank", "Taxon", "Weight"]
    }
}

/// Build the table for a community, keeping the stored order.
pub fn taxa_table(store: &DatasetStore, community: CommunityIndex) -> TaxaTable {
    let rows = store
        .taxa(community)
        .entries
        .iter()
        .enumerate()
        .map(|(i, taxon)| TaxaRow {
            rank: i + 1,
            label: taxon.label.clone(),
            weight: round2(taxon.weight),
        })
        .collect();

    TaxaTable { community, rows }
}

/// Build the table from a raw community index.
pub fn taxa_table_for_index(store: &DatasetStore, index: usize) -> ExplorerResult<TaxaTable> {
    let community = CommunityIndex::try_from(index)?;
    Ok(taxa_table(store, community))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
