//! Figures and their layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, Shape};
use crate::map::MapboxLayout;
use crate::trace::Trace;

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self { data, layout }
    }
}

/// Figure layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,

    /// Numbered axes (`xaxis1`, `yaxis2`, ...) for stacked sub-plots.
    #[serde(flatten)]
    pub extra_axes: BTreeMap<String, Axis>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub shapes: Vec<Shape>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapbox: Option<MapboxLayout>,
}

impl Layout {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_xaxis(mut self, axis: Axis) -> Self {
        self.xaxis = Some(axis);
        self
    }

    pub fn with_yaxis(mut self, axis: Axis) -> Self {
        self.yaxis = Some(axis);
        self
    }

    /// Add the `n`-th numbered x/y axis pair.
    pub fn with_axis_pair(mut self, n: usize, x: Axis, y: Axis) -> Self {
        self.extra_axes.insert(format!("xaxis{}", n), x);
        self.extra_axes.insert(format!("yaxis{}", n), y);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn autosized(mut self) -> Self {
        self.autosize = Some(true);
        self
    }

    pub fn closest_hover(mut self) -> Self {
        self.hovermode = Some("closest".to_string());
        self
    }

    pub fn with_mapbox(mut self, mapbox: MapboxLayout) -> Self {
        self.mapbox = Some(mapbox);
        self
    }

    /// Look up a numbered axis, e.g. `axis("yaxis2")`.
    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.extra_axes.get(name)
    }
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

impl Margin {
    pub fn new(l: u32, r: u32, b: u32, t: u32) -> Self {
        Self { l, r, b, t }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
