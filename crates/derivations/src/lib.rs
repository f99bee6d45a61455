//! Panel derivations.
//!
//! Every function here is pure: it reads the dataset store and the current
//! selections and returns a value describing what to draw. None of them keep
//! state between calls, so identical inputs always produce identical output.

pub mod climate_summary;
pub mod config;
pub mod distribution;
pub mod gauges;
pub mod location_text;
pub mod map_overlay;
pub mod taxa_table;

pub use climate_summary::{climate_summary, ClimateSeries};
pub use config::{DerivationConfig, DistributionConfig, GaugeConfig, GaugeScaleConfig, MapSettings};
pub use distribution::{communities_distribution, DistributionChart};
pub use gauges::{gauge_scale, location_values, GaugeBand, GaugePanel, GaugeScale, GAUGE_ATTRIBUTES};
pub use location_text::{describe_location, LocationDescription};
pub use map_overlay::{map_overlay, map_overlay_for_index, MapMarker, MapOverlay};
pub use taxa_table::{taxa_table, taxa_table_for_index, TaxaRow, TaxaTable};
