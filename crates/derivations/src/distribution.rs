//! Community distribution bar chart ("communities-dist").

use community_store::DatasetStore;
use explorer_common::{CommunityIndex, ExplorerError, ExplorerResult, LocationId};
use plot_spec::{Axis, AxisType, BarTrace, Figure, Layout, Margin, Trace};
use serde::Serialize;

use crate::config::DistributionConfig;

const AXIS_COLOR: &str = "#7f7f7f";
const CHART_HEIGHT: u32 = 400;

/// Weights of all twenty communities at one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChart {
    pub location: LocationId,
    pub title: String,
    /// `Com. 1` .. `Com. 20`.
    pub labels: Vec<String>,
    /// Stored weights in community order.
    pub weights: Vec<f64>,
    /// Lower bound of the log axis.
    pub floor: f64,
    /// Bars whose weight falls under the floor and are drawn clipped.
    pub below_floor: usize,
    /// Axis range in powers of ten.
    pub log_range: [f64; 2],
}

/// Build the distribution chart for the hovered location.
pub fn communities_distribution(
    store: &DatasetStore,
    hovered: Option<&LocationId>,
    config: &DistributionConfig,
) -> ExplorerResult<DistributionChart> {
    let id = hovered.ok_or(ExplorerError::MissingSelection)?;
    let location = store.location_by_id(id)?;

    let floor = config.floor();
    let weights: Vec<f64> = location.weights.as_slice().to_vec();
    let below_floor = weights.iter().filter(|&&w| w < floor).count();
    if below_floor > 0 {
        tracing::trace!(location = %id, below_floor, "Weights clipped at log floor");
    }

    Ok(DistributionChart {
        location: id.clone(),
        title: format!(
            "The distribution of communities in {}, {}",
            location.display_city(),
            location.state.trim()
        ),
        labels: CommunityIndex::all().map(|c| format!("Com. {}", c.number())).collect(),
        weights,
        floor,
        below_floor,
        log_range: [config.log_floor_exponent, 0.0],
    })
}

impl DistributionChart {
    pub fn to_figure(&self) -> Figure {
        let bars = BarTrace::new(self.labels.clone(), self.weights.clone());
        Figure::new(
            vec![Trace::Bar(bars)],
            Layout::default()
                .with_title(self.title.clone())
                .with_xaxis(Axis::titled("Bacterial Community"))
                .with_yaxis(
                    Axis::titled("Weight of each community")
                        .with_type(AxisType::Log)
                        .with_range(self.log_range[0], self.log_range[1])
                        .with_color(AXIS_COLOR),
                )
                .with_height(CHART_HEIGHT)
                .with_margin(Margin::new(70, 50, 100, 50)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{DatasetBuilder, LocationSpec};

    fn store() -> DatasetStore {
        DatasetBuilder::new()
            .location(
                LocationSpec::new("X1")
                    .city("AMES  ")
                    .state("IA")
                    .weights(&[0.4, 0.1, 0.0, 0.005]),
            )
            .build()
    }

    #[test]
    fn test_twenty_bars_unpermuted() {
        let chart = communities_distribution(
            &store(),
            Some(&LocationId::new("X1")),
            &DistributionConfig::default(),
        )
        .unwrap();

        assert_eq!(chart.labels.len(), 20);
        assert_eq!(chart.labels[0], "Com. 1");
        assert_eq!(chart.labels[19], "Com. 20");
        assert_eq!(chart.weights.len(), 20);
        assert_eq!(chart.weights[0], 0.4);
        assert_eq!(chart.weights[1], 0.1);
    }

    #[test]
    fn test_title_uses_display_city() {
        let chart = communities_distribution(
            &store(),
            Some(&LocationId::new("X1")),
            &DistributionConfig::default(),
        )
        .unwrap();
        assert_eq!(chart.title, "The distribution of communities in Ames, IA");
    }

    #[test]
    fn test_small_weights_counted_not_rejected() {
        let chart = communities_distribution(
            &store(),
            Some(&LocationId::new("X1")),
            &DistributionConfig::default(),
        )
        .unwrap();
        // Everything but the first two communities is under 0.01
        assert_eq!(chart.below_floor, 18);
        assert_eq!(chart.log_range, [-2.0, 0.0]);
    }

    #[test]
    fn test_missing_and_unknown_selection() {
        let store = store();
        let config = DistributionConfig::default();
        assert_eq!(
            communities_distribution(&store, None, &config),
            Err(ExplorerError::MissingSelection)
        );
        assert_eq!(
            communities_distribution(&store, Some(&LocationId::new("nope")), &config),
            Err(ExplorerError::NotFound("nope".into()))
        );
    }

    #[test]
    fn test_figure_log_axis() {
        let chart = communities_distribution(
            &store(),
            Some(&LocationId::new("X1")),
            &DistributionConfig::default(),
        )
        .unwrap();
        let figure = chart.to_figure();
        let yaxis = figure.layout.yaxis.as_ref().unwrap();
        assert_eq!(yaxis.type_, Some(AxisType::Log));
        assert_eq!(yaxis.range, Some([-2.0, 0.0]));
        assert_eq!(figure.layout.height, Some(400));

        let Trace::Bar(bars) = &figure.data[0] else {
            panic!("expected bars");
        };
        assert_eq!(bars.x.len(), 20);
    }
}
