//! The dashboard's dependency graph: every panel and the inputs it reads.

use std::num::NonZeroUsize;
use std::sync::Arc;

use community_store::DatasetStore;
use derivations::{
    climate_summary, communities_distribution, describe_location, location_values, map_overlay,
    taxa_table, DerivationConfig,
};
use explorer_common::{ClimateAttribute, ExplorerResult, InputId, OutputId, PageRouter};

use crate::artifact::Artifact;
use crate::registry::Registry;

/// Read-only state shared by every derivation.
#[derive(Debug, Clone)]
pub struct ExplorerContext {
    pub store: Arc<DatasetStore>,
    pub config: DerivationConfig,
    pub router: PageRouter,
}

impl ExplorerContext {
    pub fn new(store: Arc<DatasetStore>, config: DerivationConfig, router: PageRouter) -> Self {
        Self {
            store,
            config,
            router,
        }
    }
}

pub type ExplorerRegistry = Registry<ExplorerContext, Artifact>;

/// Build the registry with every panel wired to its inputs.
///
/// A `memo_capacity` of zero disables memoization.
pub fn explorer_registry(memo_capacity: usize) -> ExplorerResult<ExplorerRegistry> {
    let mut registry: ExplorerRegistry = match NonZeroUsize::new(memo_capacity) {
        Some(capacity) => Registry::new().with_memo(capacity),
        None => Registry::new(),
    };

    registry.register(OutputId::PageContent, [InputId::Url], |ctx, s| {
        Ok(Artifact::Page(ctx.router.resolve(s.path()?).layout()))
    })?;

    registry.register(OutputId::Map, [InputId::CommunitySlider], |ctx, s| {
        let overlay = map_overlay(&ctx.store, s.community()?, &ctx.config.map);
        Ok(Artifact::Figure(overlay.to_figure(&ctx.config.map)))
    })?;

    registry.register(OutputId::LocationValues, [InputId::MapHover], |ctx, s| {
        let panel = location_values(&ctx.store, s.hovered()?, &ctx.config.gauges)?;
        Ok(Artifact::Figure(panel.to_figure()))
    })?;

    registry.register(OutputId::CommunitiesDist, [InputId::MapHover], |ctx, s| {
        let chart = communities_distribution(&ctx.store, s.hovered()?, &ctx.config.distribution)?;
        Ok(Artifact::Figure(chart.to_figure()))
    })?;

    registry.register(OutputId::TextContent, [InputId::MapHover], |ctx, s| {
        Ok(Artifact::Text(describe_location(&ctx.store, s.hovered()?)?))
    })?;

    registry.register(OutputId::TaxaTable, [InputId::CommunitySlider], |ctx, s| {
        Ok(Artifact::Table(taxa_table(&ctx.store, s.community()?)))
    })?;

    for attribute in ClimateAttribute::ALL {
        registry.register(
            OutputId::ClimatePlot(attribute),
            Vec::<InputId>::new(),
            move |ctx, _| {
                let series = climate_summary(&ctx.store, attribute);
                Ok(Artifact::Figure(series.to_figure()))
            },
        )?;
    }

    Ok(registry)
}
