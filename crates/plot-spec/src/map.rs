//! Tiled-map layout settings.

use serde::{Deserialize, Serialize};

/// Map viewport centre.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Settings for the external map tile service.
///
/// The token and style are passed through to the tile provider untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapboxLayout {
    pub accesstoken: String,
    pub center: MapCenter,
    pub zoom: f64,
    pub style: String,
}
