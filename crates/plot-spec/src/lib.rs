//! Chart specifications for the dashboard shell.
//!
//! Every panel is delivered as a JSON figure the shell hands to its plotting
//! library unchanged. The types mirror that library's figure schema closely
//! enough to serialize directly: `{"data": [...traces], "layout": {...}}`.
//!
//! # Example
//!
//! ```rust
//! use plot_spec::{Axis, AxisType, BarTrace, Figure, Layout, Trace};
//!
//! let figure = Figure::new(
//!     vec![Trace::Bar(BarTrace::new(vec!["Com. 1".into()], vec![0.4]))],
//!     Layout::default().with_yaxis(Axis::titled("Weight").with_type(AxisType::Log)),
//! );
//! assert_eq!(figure.data.len(), 1);
//! ```

pub mod axis;
pub mod figure;
pub mod map;
pub mod trace;

pub use axis::{Axis, AxisType, Shape};
pub use figure::{Figure, Layout, Margin};
pub use map::{MapCenter, MapboxLayout};
pub use trace::{BarTrace, ErrorBars, MapTrace, Marker, MarkerLine, MarkerSize, ScatterTrace, Trace};
