//! Per-community climate summaries for the about page.

use community_store::DatasetStore;
use explorer_common::{ClimateAttribute, CommunityIndex};
use plot_spec::{Axis, ErrorBars, Figure, Layout, Margin, Marker, MarkerSize, ScatterTrace, Trace};
use serde::Serialize;

const MARKER_SIZE: f64 = 15.0;
const MARKER_OPACITY: f64 = 0.7;

/// Mean and spread of one attribute for every community.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateSeries {
    pub attribute: ClimateAttribute,
    /// 1-based community numbers.
    pub x: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Collect the summary series of `attribute`.
///
/// Depends on no input, so it is computed once per session.
pub fn climate_summary(store: &DatasetStore, attribute: ClimateAttribute) -> ClimateSeries {
    let (mut x, mut mean, mut std) = (Vec::new(), Vec::new(), Vec::new());
    for community in CommunityIndex::all() {
        let stats = store.summary(community).stats(attribute);
        x.push(community.number() as f64);
        mean.push(stats.mean);
        std.push(stats.std);
    }
    ClimateSeries {
        attribute,
        x,
        mean,
        std,
    }
}

impl ClimateSeries {
    pub fn to_figure(&self) -> Figure {
        let trace = ScatterTrace::markers(self.x.clone(), self.mean.clone())
            .with_error_y(ErrorBars::data(self.std.clone()))
            .with_opacity(MARKER_OPACITY)
            .with_marker(
                Marker::default()
                    .with_size(MarkerSize::Uniform(MARKER_SIZE))
                    .with_line(0.5, "white"),
            );

        Figure::new(
            vec![Trace::Scatter(trace)],
            Layout::default()
                .with_xaxis(Axis::titled("Community"))
                .with_yaxis(Axis::titled(self.attribute.summary_axis_title()))
                .with_margin(Margin::new(40, 50, 50, 50))
                .closest_hover(),
        )
    }
}
