//! Climate attributes recorded for every location.

use serde::{Deserialize, Serialize};

/// One of the five climate attributes summarized per community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateAttribute {
    Longitude,
    Latitude,
    Elevation,
    Precipitation,
    Temperature,
}

impl ClimateAttribute {
    /// All attributes, in the order the summary panels are stacked.
    pub const ALL: [ClimateAttribute; 5] = [
        ClimateAttribute::Longitude,
        ClimateAttribute::Latitude,
        ClimateAttribute::Elevation,
        ClimateAttribute::Precipitation,
        ClimateAttribute::Temperature,
    ];

    /// Position within `ALL`.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Column stem used by the tabular source files.
    ///
    /// The temperature stem really does contain a space.
    pub fn column_stem(self) -> &'static str {
        match self {
            ClimateAttribute::Longitude => "Longitude",
            ClimateAttribute::Latitude => "Latitude",
            ClimateAttribute::Elevation => "Elevation",
            ClimateAttribute::Precipitation => "MeanAnnualPrecipitation",
            ClimateAttribute::Temperature => "MeanAnnual Temperature",
        }
    }

    /// Lowercase identifier, used in output ids.
    pub fn slug(self) -> &'static str {
        match self {
            ClimateAttribute::Longitude => "longitude",
            ClimateAttribute::Latitude => "latitude",
            ClimateAttribute::Elevation => "elevation",
            ClimateAttribute::Precipitation => "precipitation",
            ClimateAttribute::Temperature => "temperature",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ClimateAttribute::Longitude => "Longitude",
            ClimateAttribute::Latitude => "Latitude",
            ClimateAttribute::Elevation => "Elevation",
            ClimateAttribute::Precipitation => "Precipitation",
            ClimateAttribute::Temperature => "Temperature",
        }
    }

    pub fn unit(self) -> Option<&'static str> {
        match self {
            ClimateAttribute::Elevation => Some("m"),
            ClimateAttribute::Precipitation => Some("cm"),
            ClimateAttribute::Temperature => Some("C"),
            _ => None,
        }
    }

    /// Y-axis title for the per-community summary plot.
    pub fn summary_axis_title(self) -> String {
        match self.unit() {
            Some(unit) => format!("Community {} ({})", self.label(), unit),
            None => format!("Community {}", self.label()),
        }
    }
}

impl std::fmt::Display for ClimateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
