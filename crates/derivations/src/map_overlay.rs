//! Map overlay: one marker per location, sized by the selected community.

use community_store::DatasetStore;
use explorer_common::{CommunityIndex, ExplorerResult, LocationId};
use plot_spec::{Figure, Layout, MapTrace, Margin, Marker, MarkerSize, Trace};
use serde::Serialize;

use crate::config::MapSettings;

/// A single map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: LocationId,
    pub lat: f64,
    pub lon: f64,
    /// `base_scale * weight`, linear in the community weight.
    pub size: f64,
}

/// Markers for every location, in load order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    pub community: CommunityIndex,
    pub markers: Vec<MapMarker>,
    pub opacity: f64,
    pub color: String,
}

/// Build the overlay for a community.
pub fn map_overlay(
    store: &DatasetStore,
    community: CommunityIndex,
    settings: &MapSettings,
) -> MapOverlay {
    let markers = store
        .all_locations()
        .iter()
        .map(|loc| MapMarker {
            id: loc.id.clone(),
            lat: loc.latitude,
            lon: loc.longitude,
            size: settings.base_scale * loc.weight(community),
        })
        .collect();

    MapOverlay {
        community,
        markers,
        opacity: settings.marker_opacity,
        color: settings.marker_color.clone(),
    }
}

/// Build the overlay from a raw, unvalidated community index.
pub fn map_overlay_for_index(
    store: &DatasetStore,
    index: i64,
    settings: &MapSettings,
) -> ExplorerResult<MapOverlay> {
    let community = CommunityIndex::new(index)?;
    Ok(map_overlay(store, community, settings))
}

impl MapOverlay {
    /// Render as a tiled-map figure.
    pub fn to_figure(&self, settings: &MapSettings) -> Figure {
        let trace = MapTrace {
            lat: self.markers.iter().map(|m| m.lat).collect(),
            lon: self.markers.iter().map(|m| m.lon).collect(),
            marker: Marker::default()
                .with_color(self.color.clone())
                .with_size(MarkerSize::PerPoint(
                    self.markers.iter().map(|m| m.size).collect(),
                ))
                .with_opacity(self.opacity),
            customdata: self.markers.iter().map(|m| m.id.to_string()).collect(),
        };

        Figure::new(
            vec![Trace::Scattermapbox(trace)],
            Layout::default()
                .with_mapbox(settings.mapbox_layout())
                .closest_hover()
                .with_margin(Margin::zero()),
        )
    }
}
