//! Gauge panel ("location-values").
//!
//! Three horizontal scales stacked vertically show where the hovered location
//! sits for precipitation, temperature and elevation. Each scale runs from 0
//! to a dataset-derived maximum, so the axis does not move with the hover.
//!
//! ```text
//!  1   +------------------------------+
//!      | Elevation      0 ----*--- M  |   band 3: [2/3, 1]
//! 2/3  +------------------------------+
//!      | Temperature    0 --*----- M  |   band 2: [1/3, 2/3]
//! 1/3  +------------------------------+
//!      | Precipitation  0 ------*- M  |   band 1: [0, 1/3]
//!  0   +------------------------------+
//! ```

use community_store::DatasetStore;
use explorer_common::{ClimateAttribute, ExplorerResult, LocationId};
use plot_spec::{Axis, Figure, Layout, Margin, Marker, MarkerSize, ScatterTrace, Shape, Trace};
use serde::Serialize;

use crate::config::{GaugeConfig, GaugeScaleConfig};

/// Gauges from bottom to top.
pub const GAUGE_ATTRIBUTES: [ClimateAttribute; 3] = [
    ClimateAttribute::Precipitation,
    ClimateAttribute::Temperature,
    ClimateAttribute::Elevation,
];

const MARKER_COLOR: &str = "#29ABD6";
const MARKER_SIZE: f64 = 12.0;
const PANEL_HEIGHT: u32 = 200;

/// Fixed maximum of one gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeScale {
    pub attribute: ClimateAttribute,
    pub max: f64,
}

impl GaugeScale {
    /// Position of `value` on the normalized [0, 1] axis.
    pub fn normalize(&self, value: f64) -> f64 {
        value / self.max
    }
}

/// Compute the maximum of a gauge from the dataset.
///
/// `ceil(dataset_max / granularity) * granularity + margin`. A non-positive
/// result (every value at or below zero, or an empty dataset) falls back to one
/// granularity step so the scale never divides by zero.
pub fn gauge_scale(
    store: &DatasetStore,
    attribute: ClimateAttribute,
    config: &GaugeScaleConfig,
) -> GaugeScale {
    let granularity = if config.granularity > 0.0 {
        config.granularity
    } else {
        1.0
    };
    let rounded = store
        .attribute_max(attribute)
        .map(|max| (max / granularity).ceil() * granularity + config.margin)
        .unwrap_or(0.0);

    GaugeScale {
        attribute,
        max: if rounded > 0.0 { rounded } else { granularity },
    }
}

/// One of the three stacked scales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeBand {
    pub attribute: ClimateAttribute,
    /// Vertical fraction of the panel this band covers.
    pub domain: [f64; 2],
    pub scale: GaugeScale,
    /// Raw value at the hovered location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// `value / scale.max`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    pub tick_values: [f64; 2],
    pub tick_labels: [String; 2],
}

/// The full gauge panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugePanel {
    /// The hovered location, `None` for the placeholder panel.
    pub location: Option<LocationId>,
    pub bands: Vec<GaugeBand>,
}

/// Derive the gauge panel for the hovered location.
///
/// With nothing hovered the bands are returned without markers. An unknown
/// location id is `NotFound`.
pub fn location_values(
    store: &DatasetStore,
    hovered: Option<&LocationId>,
    config: &GaugeConfig,
) -> ExplorerResult<GaugePanel> {
    let location = hovered.map(|id| store.location_by_id(id)).transpose()?;
    let band_height = 1.0 / GAUGE_ATTRIBUTES.len() as f64;

    let bands = GAUGE_ATTRIBUTES
        .iter()
        .enumerate()
        .map(|(i, &attribute)| {
            let scale = gauge_scale(store, attribute, &config.scale(attribute));
            let value = location.map(|loc| loc.value(attribute));
            let upper = if i + 1 == GAUGE_ATTRIBUTES.len() {
                1.0
            } else {
                (i + 1) as f64 * band_height
            };
            GaugeBand {
                attribute,
                domain: [i as f64 * band_height, upper],
                scale,
                value,
                position: value.map(|v| scale.normalize(v)),
                tick_values: [0.0, 1.0],
                tick_labels: ["0".to_string(), format!("{}", scale.max as i64)],
            }
        })
        .collect();

    Ok(GaugePanel {
        location: location.map(|loc| loc.id.clone()),
        bands,
    })
}

impl GaugePanel {
    pub fn is_placeholder(&self) -> bool {
        self.location.is_none()
    }

    pub fn band(&self, attribute: ClimateAttribute) -> Option<&GaugeBand> {
        self.bands.iter().find(|b| b.attribute == attribute)
    }

    /// Render as stacked sub-plots, one numbered axis pair per band.
    pub fn to_figure(&self) -> Figure {
        let mut traces = Vec::with_capacity(self.bands.len() * 2);
        let mut layout = Layout::default()
            .autosized()
            .with_margin(Margin::new(50, 50, 50, 0))
            .with_height(PANEL_HEIGHT);

        for (i, band) in self.bands.iter().enumerate() {
            let n = i + 1;

            // Scale title, padded left of the axis
            traces.push(Trace::Scatter(
                ScatterTrace::text_label(-0.25, 0.0, format!("<b>{}</b>", band.attribute.label()))
                    .with_hoverinfo("none")
                    .hide_legend()
                    .on_axes(n),
            ));

            layout = layout
                .with_shape(Shape::hline(n, 0.0, 1.0, 0.0))
                .with_axis_pair(
                    n,
                    Axis::bare()
                        .anchored_to(format!("y{}", n))
                        .with_range(-0.5, 1.1)
                        .with_ticks(band.tick_values.to_vec(), band.tick_labels.to_vec(), 6),
                    Axis::bare()
                        .with_domain(band.domain[0], band.domain[1])
                        .with_range(-0.5, 1.0)
                        .hide_tick_labels(),
                );
        }

        for (i, band) in self.bands.iter().enumerate() {
            let (Some(position), Some(value)) = (band.position, band.value) else {
                continue;
            };
            traces.push(Trace::Scatter(
                ScatterTrace::markers(vec![position], vec![0.0])
                    .on_axes(i + 1)
                    .with_marker(
                        Marker::default()
                            .with_size(MarkerSize::Uniform(MARKER_SIZE))
                            .with_color(MARKER_COLOR),
                    )
                    .with_text(vec![format!("{}", value)])
                    .with_hoverinfo("text")
                    .hide_legend(),
            ));
        }

        Figure::new(traces, layout)
    }
}
