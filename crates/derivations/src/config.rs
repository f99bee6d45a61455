//! Tunable constants of the derivations.

use explorer_common::ClimateAttribute;
use plot_spec::{MapCenter, MapboxLayout};
use serde::{Deserialize, Serialize};

/// All derivation parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivationConfig {
    #[serde(default)]
    pub map: MapSettings,

    #[serde(default)]
    pub gauges: GaugeConfig,

    #[serde(default)]
    pub distribution: DistributionConfig,
}

/// Map overlay parameters and tile service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Marker size for a community weight of 1.0.
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,

    #[serde(default = "default_marker_opacity")]
    pub marker_opacity: f64,

    #[serde(default = "default_marker_color")]
    pub marker_color: String,

    /// Tile service access token.
    #[serde(default)]
    pub access_token: String,

    /// Tile style identifier.
    #[serde(default = "default_style")]
    pub style: String,

    #[serde(default = "default_center")]
    pub center: MapCenter,

    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl MapSettings {
    /// Layout block handed to the tile service.
    pub fn mapbox_layout(&self) -> MapboxLayout {
        MapboxLayout {
            accesstoken: self.access_token.clone(),
            center: self.center,
            zoom: self.zoom,
            style: self.style.clone(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            base_scale: default_base_scale(),
            marker_opacity: default_marker_opacity(),
            marker_color: default_marker_color(),
            access_token: String::new(),
            style: default_style(),
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

fn default_base_scale() -> f64 {
    40.0
}
fn default_marker_opacity() -> f64 {
    0.6
}
fn default_marker_color() -> String {
    "white".to_string()
}
fn default_style() -> String {
    "mapbox://styles/mapbox/dark-v10".to_string()
}
fn default_center() -> MapCenter {
    // Geographic centre of the contiguous United States
    MapCenter {
        lat: 39.83,
        lon: -98.58,
    }
}
fn default_zoom() -> f64 {
    3.0
}

/// Scale rounding for one gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeScaleConfig {
    /// The dataset maximum is rounded up to a multiple of this.
    pub granularity: f64,
    /// Added after rounding.
    pub margin: f64,
}

impl GaugeScaleConfig {
    /// Margin of one granularity step.
    pub fn step(granularity: f64) -> Self {
        Self {
            granularity,
            margin: granularity,
        }
    }
}

/// Gauge panel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    #[serde(default = "default_precipitation_scale")]
    pub precipitation: GaugeScaleConfig,

    #[serde(default = "default_temperature_scale")]
    pub temperature: GaugeScaleConfig,

    #[serde(default = "default_elevation_scale")]
    pub elevation: GaugeScaleConfig,
}

impl GaugeConfig {
    /// Scale config of a gauge attribute. Non-gauge attributes get a unit step.
    pub fn scale(&self, attr: ClimateAttribute) -> GaugeScaleConfig {
        match attr {
            ClimateAttribute::Precipitation => self.precipitation,
            ClimateAttribute::Temperature => self.temperature,
            ClimateAttribute::Elevation => self.elevation,
            _ => GaugeScaleConfig::step(1.0),
        }
    }
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            precipitation: default_precipitation_scale(),
            temperature: default_temperature_scale(),
            elevation: default_elevation_scale(),
        }
    }
}

fn default_precipitation_scale() -> GaugeScaleConfig {
    GaugeScaleConfig::step(10.0)
}
fn default_temperature_scale() -> GaugeScaleConfig {
    GaugeScaleConfig::step(10.0)
}
fn default_elevation_scale() -> GaugeScaleConfig {
    GaugeScaleConfig::step(100.0)
}

/// Distribution chart parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Lower bound of the log axis as a power of ten.
    #[serde(default = "default_log_floor_exponent")]
    pub log_floor_exponent: f64,
}

impl DistributionConfig {
    /// Smallest weight that is drawn above the axis floor.
    pub fn floor(&self) -> f64 {
        10f64.powf(self.log_floor_exponent)
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            log_floor_exponent: default_log_floor_exponent(),
        }
    }
}

fn default_log_floor_exponent() -> f64 {
    -2.0
}
