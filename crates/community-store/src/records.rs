//! Immutable dataset records.

use explorer_common::{ClimateAttribute, CommunityIndex, CommunityWeights, LocationId};
use serde::Serialize;

/// One sampled site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in metres.
    pub elevation: f64,
    /// Mean annual precipitation in centimetres.
    pub precipitation: f64,
    /// Mean annual temperature in degrees Celsius.
    pub temperature: f64,
    pub weights: CommunityWeights,
}

impl LocationRecord {
    /// Value of a climate attribute at this location.
    pub fn value(&self, attr: ClimateAttribute) -> f64 {
        match attr {
            ClimateAttribute::Longitude => self.longitude,
            ClimateAttribute::Latitude => self.latitude,
            ClimateAttribute::Elevation => self.elevation,
            ClimateAttribute::Precipitation => self.precipitation,
            ClimateAttribute::Temperature => self.temperature,
        }
    }

    pub fn weight(&self, community: CommunityIndex) -> f64 {
        self.weights.get(community)
    }

    /// City name as displayed: trimmed and title-cased.
    ///
    /// Source city names are upper case with trailing padding (`"AMES  "`).
    pub fn display_city(&self) -> String {
        title_case(self.city.trim())
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Mean and standard deviation of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeStats {
    pub mean: f64,
    pub std: f64,
}

/// Presence-weighted climate statistics of one community.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunitySummary {
    pub community: CommunityIndex,
    /// Indexed by `ClimateAttribute::ordinal`.
    stats: [AttributeStats; 5],
}

impl CommunitySummary {
    /// `stats` must follow the order of `ClimateAttribute::ALL`.
    pub fn new(community: CommunityIndex, stats: [AttributeStats; 5]) -> Self {
        Self { community, stats }
    }

    pub fn stats(&self, attr: ClimateAttribute) -> AttributeStats {
        self.stats[attr.ordinal()]
    }
}

/// A taxon label and its weight within a community.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonWeight {
    pub label: String,
    pub weight: f64,
}

/// Top contributing taxa of one community, heaviest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxaWeights {
    pub community: CommunityIndex,
    pub entries: Vec<TaxonWeight>,
}

impl TaxaWeights {
    /// Index of the first entry heavier than its predecessor, if any.
    pub fn first_order_violation(&self) -> Option<usize> {
        self.entries
            .windows(2)
            .position(|w| w[1].weight > w[0].weight)
            .map(|i| i + 1)
    }
}
