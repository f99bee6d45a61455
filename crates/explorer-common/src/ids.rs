//! Identifiers of reactive inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::{ClimateAttribute, ExplorerError};

/// A user-controlled input the reactive graph listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputId {
    /// The discrete community selector.
    CommunitySlider,
    /// The location under the pointer on the map panel.
    MapHover,
    /// The navigation path.
    Url,
}

impl InputId {
    pub fn as_str(self) -> &'static str {
        match self {
            InputId::CommunitySlider => "community-slider",
            InputId::MapHover => "map-hover",
            InputId::Url => "url",
        }
    }
}

impl std::fmt::Display for InputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered artifact the reactive graph can recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    /// The layout of the current page.
    PageContent,
    Map,
    /// Gauge panel for the hovered location.
    LocationValues,
    /// Community distribution bar chart for the hovered location.
    CommunitiesDist,
    /// One-sentence description of the hovered location.
    TextContent,
    TaxaTable,
    /// Per-community mean/std scatter for one climate attribute.
    ClimatePlot(ClimateAttribute),
}

impl OutputId {
    /// Every output this system knows about.
    pub fn all() -> Vec<OutputId> {
        let mut ids = vec![
            OutputId::PageContent,
            OutputId::Map,
            OutputId::LocationValues,
            OutputId::CommunitiesDist,
            OutputId::TextContent,
            OutputId::TaxaTable,
        ];
        ids.extend(ClimateAttribute::ALL.into_iter().map(OutputId::ClimatePlot));
        ids
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputId::PageContent => "page-content",
            OutputId::Map => "map",
            OutputId::LocationValues => "location-values",
            OutputId::CommunitiesDist => "communities-dist",
            OutputId::TextContent => "text-content",
            OutputId::TaxaTable => "taxa-table",
            OutputId::ClimatePlot(ClimateAttribute::Longitude) => "longitude-plot",
            OutputId::ClimatePlot(ClimateAttribute::Latitude) => "latitude-plot",
            OutputId::ClimatePlot(ClimateAttribute::Elevation) => "elevation-plot",
            OutputId::ClimatePlot(ClimateAttribute::Precipitation) => "precipitation-plot",
            OutputId::ClimatePlot(ClimateAttribute::Temperature) => "temperature-plot",
        }
    }
}

impl std::fmt::Display for OutputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputId {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputId::all()
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ExplorerError::UnknownOutput(s.to_string()))
    }
}

impl Serialize for OutputId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutputId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
