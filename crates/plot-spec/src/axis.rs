//! Axes and layout shapes.

use serde::{Deserialize, Serialize};

/// Axis scale type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Log,
    Category,
}

/// A cartesian axis.
///
/// Ranges on a log axis are given in exponents: `[-2, 0]` spans 0.01 to 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<AxisType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,

    /// Fraction of the plotting area this axis occupies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticklen: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// An axis with grid, line, zero line and tick labels switched off.
    pub fn bare() -> Self {
        Self {
            showgrid: Some(false),
            showline: Some(false),
            zeroline: Some(false),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_: AxisType) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some([min, max]);
        self
    }

    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain = Some([start, end]);
        self
    }

    pub fn anchored_to(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn hide_tick_labels(mut self) -> Self {
        self.showticklabels = Some(false);
        self
    }

    /// Inside ticks at `values` labelled with `labels`.
    pub fn with_ticks(mut self, values: Vec<f64>, labels: Vec<String>, len: u32) -> Self {
        self.ticks = Some("inside".to_string());
        self.ticklen = Some(len);
        self.tickvals = Some(values);
        self.ticktext = Some(labels);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A line drawn in axis coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shape {
    #[serde(rename = "type")]
    pub type_: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub xref: String,
    pub yref: String,
}

impl Shape {
    /// A horizontal line at `y` from `x0` to `x1` on the `n`-th axis pair.
    pub fn hline(n: usize, x0: f64, x1: f64, y: f64) -> Self {
        Self {
            type_: "line".to_string(),
            x0,
            x1,
            y0: y,
            y1: y,
            xref: format!("x{}", n),
            yref: format!("y{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_axis_json() {
        let axis = Axis::titled("Weight of each community")
            .with_type(AxisType::Log)
            .with_range(-2.0, 0.0);
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json["type"], "log");
        assert_eq!(json["range"], serde_json::json!([-2.0, 0.0]));
        assert!(json.get("domain").is_none());
    }

    #[test]
    fn test_hline() {
        let shape = Shape::hline(2, 0.0, 1.0, 0.0);
        assert_eq!(shape.xref, "x2");
        assert_eq!(shape.y0, shape.y1);
    }
}
