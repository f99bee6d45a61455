//! Dataset store for the community explorer.
//!
//! The store is built once at startup from three tabular sources and is
//! read-only afterwards. Every derivation receives it by shared reference.
//!
//! # Example
//!
//! ```ignore
//! use community_store::{DatasetPaths, DatasetStore};
//!
//! let store = DatasetStore::load(&DatasetPaths::default())?;
//! let summary = store.community_summary(3)?;
//! ```

pub mod error;
pub mod loader;
pub mod records;
pub mod store;

pub use error::LoadError;
pub use loader::{
    community_column, load_locations_csv, load_summaries_csv, load_taxa_json, DatasetPaths,
};
pub use records::{AttributeStats, CommunitySummary, LocationRecord, TaxaWeights, TaxonWeight};
pub use store::DatasetStore;
