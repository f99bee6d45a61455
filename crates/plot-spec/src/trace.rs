//! Trace types: the data series of a figure.

use serde::{Deserialize, Serialize};

/// One data series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Scattermapbox(MapTrace),
}

/// Points, text or markers on cartesian axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,

    /// Plotly draw mode, e.g. "markers" or "text".
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,

    /// Axis reference such as "x2"; `None` means the primary axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBars>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScatterTrace {
    /// A marker series.
    pub fn markers(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self::with_mode(x, y, "markers")
    }

    /// A single text label positioned at `(x, y)`.
    pub fn text_label(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::with_mode(vec![x], vec![y], "text").with_text(vec![text.into()])
    }

    fn with_mode(x: Vec<f64>, y: Vec<f64>, mode: &str) -> Self {
        Self {
            x,
            y,
            mode: mode.to_string(),
            text: None,
            hoverinfo: None,
            showlegend: None,
            xaxis: None,
            yaxis: None,
            marker: None,
            error_y: None,
            opacity: None,
            name: None,
        }
    }

    pub fn with_text(mut self, text: Vec<String>) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_hoverinfo(mut self, hoverinfo: impl Into<String>) -> Self {
        self.hoverinfo = Some(hoverinfo.into());
        self
    }

    pub fn hide_legend(mut self) -> Self {
        self.showlegend = Some(false);
        self
    }

    /// Bind to the `n`-th numbered axis pair (`x{n}`, `y{n}`).
    pub fn on_axes(mut self, n: usize) -> Self {
        self.xaxis = Some(format!("x{}", n));
        self.yaxis = Some(format!("y{}", n));
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_error_y(mut self, error_y: ErrorBars) -> Self {
        self.error_y = Some(error_y);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Categorical bars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl BarTrace {
    pub fn new(x: Vec<String>, y: Vec<f64>) -> Self {
        Self { x, y, marker: None }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Markers on a tiled map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapTrace {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub marker: Marker,
    /// Per-marker payload echoed back in hover events (location ids).
    pub customdata: Vec<String>,
}

/// Marker styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<MarkerSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

impl Marker {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: MarkerSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_line(mut self, width: f64, color: impl Into<String>) -> Self {
        self.line = Some(MarkerLine {
            width,
            color: color.into(),
        });
        self
    }
}

/// One size for every marker, or one per point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MarkerSize {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerLine {
    pub width: f64,
    pub color: String,
}

/// Symmetric error bars given as absolute lengths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBars {
    #[serde(rename = "type")]
    pub type_: String,
    pub array: Vec<f64>,
    pub visible: bool,
}

impl ErrorBars {
    pub fn data(array: Vec<f64>) -> Self {
        Self {
            type_: "data".to_string(),
            array,
            visible: true,
        }
    }
}
