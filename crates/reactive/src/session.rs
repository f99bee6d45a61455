//! Per-session dashboard state.
//!
//! A session owns the current inputs, the mounted page and what each mounted
//! panel currently shows. Events are applied one at a time; every affected
//! panel is recomputed before `apply` returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use explorer_common::{
    CommunityIndex, ExplorerError, ExplorerResult, InputEvent, InputId, InputState, OutputId,
    PageLayout,
};
use serde::Serialize;

use crate::artifact::Artifact;
use crate::registry::Recomputed;
use crate::wiring::{ExplorerContext, ExplorerRegistry};

/// Why a panel is showing its neutral state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelFailure {
    pub kind: &'static str,
    pub message: String,
    /// False when the failure points at a wiring or internal defect rather
    /// than at the current selection.
    pub local: bool,
}

impl From<&ExplorerError> for PanelFailure {
    fn from(err: &ExplorerError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            local: err.is_panel_local(),
        }
    }
}

/// What one mounted panel shows. Both fields empty before the first render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelState {
    pub displayed: Option<Artifact>,
    pub failure: Option<PanelFailure>,
}

impl PanelState {
    fn from_result(result: &ExplorerResult<Artifact>) -> Self {
        match result {
            Ok(artifact) => Self {
                displayed: Some(artifact.clone()),
                failure: None,
            },
            Err(err) => Self {
                displayed: None,
                failure: Some(err.into()),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// A panel recomputed by one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelUpdate {
    pub output: OutputId,
    #[serde(flatten)]
    pub state: PanelState,
}

/// Serializable view of a whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub inputs: &'a InputState,
    pub page: &'a PageLayout,
    pub panels: &'a BTreeMap<OutputId, PanelState>,
}

pub struct DashboardSession {
    registry: Arc<ExplorerRegistry>,
    context: Arc<ExplorerContext>,
    inputs: InputState,
    page: PageLayout,
    panels: BTreeMap<OutputId, PanelState>,
}

impl DashboardSession {
    /// Start a session on `path` and render its page.
    pub fn open(
        registry: Arc<ExplorerRegistry>,
        context: Arc<ExplorerContext>,
        path: &str,
    ) -> (Self, Vec<PanelUpdate>) {
        let page = context.router.resolve(path).layout();
        let mut session = Self {
            registry,
            context,
            inputs: InputState::default(),
            page,
            panels: BTreeMap::new(),
        };
        let updates = session.navigate(path.to_string());
        (session, updates)
    }

    /// Apply one input event and return the panels it recomputed.
    ///
    /// An invalid community index is rejected and leaves the session unchanged.
    pub fn apply(&mut self, event: InputEvent) -> ExplorerResult<Vec<PanelUpdate>> {
        let input = event.input_id();
        metrics::counter!("explorer_events_total", "input" => input.as_str()).increment(1);
        tracing::debug!(input = %input, event = ?event, "Applying input event");

        match event {
            InputEvent::CommunitySelected { index } => {
                let community = CommunityIndex::new(index)?;
                self.inputs.selection.selected_community = community;
                Ok(self.propagate(input))
            }
            InputEvent::LocationHovered { id } => {
                self.inputs.selection.hovered_location = id;
                Ok(self.propagate(input))
            }
            InputEvent::NavigationChanged { path } => Ok(self.navigate(path)),
        }
    }

    /// Page content is always mounted alongside the page's panels.
    pub fn mounted(&self) -> Vec<OutputId> {
        let mut mounted = vec![OutputId::PageContent];
        mounted.extend(self.page.panels.iter().copied());
        mounted
    }

    pub fn inputs(&self) -> &InputState {
        &self.inputs
    }

    pub fn page(&self) -> &PageLayout {
        &self.page
    }

    pub fn panel(&self, output: OutputId) -> Option<&PanelState> {
        self.panels.get(&output)
    }

    pub fn panels(&self) -> &BTreeMap<OutputId, PanelState> {
        &self.panels
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            inputs: &self.inputs,
            page: &self.page,
            panels: &self.panels,
        }
    }

    fn propagate(&mut self, input: InputId) -> Vec<PanelUpdate> {
        let results =
            self.registry
                .propagate(input, &self.context, &self.inputs, &self.mounted());
        self.record(results)
    }

    /// Resolve the new page, remount its panels and render all of them.
    fn navigate(&mut self, path: String) -> Vec<PanelUpdate> {
        self.inputs.pathname = path;

        let page_result = self
            .registry
            .evaluate(OutputId::PageContent, &self.context, &self.inputs);
        if let Ok(Artifact::Page(layout)) = &page_result {
            self.page = layout.clone();
        }
        tracing::debug!(
            path = %self.inputs.pathname,
            variant = ?self.page.variant,
            "Mounted page"
        );

        self.panels.clear();
        let mut results = vec![Recomputed {
            output: OutputId::PageContent,
            result: page_result,
        }];
        results.extend(
            self.registry
                .evaluate_all(&self.page.panels, &self.context, &self.inputs),
        );
        self.record(results)
    }

    fn record(&mut self, results: Vec<Recomputed<Artifact>>) -> Vec<PanelUpdate> {
        results
            .into_iter()
            .map(|Recomputed { output, result }| {
                metrics::counter!(
                    "explorer_panel_recomputations_total",
                    "output" => output.as_str()
                )
                .increment(1);
                if let Err(err) = &result {
                    if err.is_panel_local() {
                        tracing::warn!(
                            output = %output,
                            kind = err.kind(),
                            error = %err,
                            "Panel derivation failed"
                        );
                    } else {
                        tracing::error!(
                            output = %output,
                            kind = err.kind(),
                            error = %err,
                            "Panel wiring defect"
                        );
                    }
                    metrics::counter!(
                        "explorer_panel_failures_total",
                        "output" => output.as_str(),
                        "kind" => err.kind()
                    )
                    .increment(1);
                }
                let state = PanelState::from_result(&result);
                self.panels.insert(output, state.clone());
                PanelUpdate { output, state }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiring::explorer_registry;
    use derivations::DerivationConfig;
    use explorer_common::{LocationId, PageRouter, PageVariant};
    use test_utils::{ames, ames_store, routes};

    fn open(path: &str) -> (DashboardSession, Vec<PanelUpdate>) {
        let context = ExplorerContext::new(
            Arc::new(ames_store()),
            DerivationConfig::default(),
            PageRouter::standard(),
        );
        DashboardSession::open(
            Arc::new(explorer_registry(0).unwrap()),
            Arc::new(context),
            path,
        )
    }

    fn outputs(updates: &[PanelUpdate]) -> Vec<OutputId> {
        updates.iter().map(|u| u.output).collect()
    }

    #[test]
    fn test_initial_render_of_index() {
        let (session, updates) = open(routes::INDEX);
        assert_eq!(session.page().variant, PageVariant::Index);
        assert_eq!(
            outputs(&updates),
            vec![
                OutputId::PageContent,
                OutputId::Map,
                OutputId::LocationValues,
                OutputId::CommunitiesDist,
                OutputId::TextContent
            ]
        );
        // Nothing hovered yet
        let dist = session.panel(OutputId::CommunitiesDist).unwrap();
        assert_eq!(dist.displayed, None);
        assert_eq!(dist.failure.as_ref().unwrap().kind, "missing_selection");
        let gauges = session.panel(OutputId::LocationValues).unwrap();
        assert!(!gauges.is_failed());
    }

    #[test]
    fn test_hover_recomputes_hover_panels_only() {
        let (mut session, _) = open(routes::INDEX);
        let updates = session
            .apply(InputEvent::LocationHovered {
                id: Some(LocationId::new(ames::ID)),
            })
            .unwrap();
        assert_eq!(
            outputs(&updates),
            vec![
                OutputId::LocationValues,
                OutputId::CommunitiesDist,
                OutputId::TextContent
            ]
        );
        assert!(updates.iter().all(|u| !u.state.is_failed()));
    }

    #[test]
    fn test_invalid_community_leaves_state() {
        let (mut session, _) = open(routes::INDEX);
        session
            .apply(InputEvent::CommunitySelected { index: 3 })
            .unwrap();
        let before = session.inputs().clone();

        let result = session.apply(InputEvent::CommunitySelected { index: 20 });
        assert_eq!(result, Err(ExplorerError::OutOfRange(20)));
        assert_eq!(session.inputs(), &before);
    }

    #[test]
    fn test_unknown_hover_fails_locally() {
        let (mut session, _) = open(routes::INDEX);
        let map_before = session.panel(OutputId::Map).cloned();

        let updates = session
            .apply(InputEvent::LocationHovered {
                id: Some(LocationId::new("missing")),
            })
            .unwrap();
        assert!(updates.iter().all(|u| u.state.is_failed()));
        let failure = updates[0].state.failure.as_ref().unwrap();
        assert_eq!(failure.kind, "not_found");
        assert!(failure.local);
        assert_eq!(session.panel(OutputId::Map).cloned(), map_before);
    }

    #[test]
    fn test_miswired_panel_is_not_local() {
        let mut registry: ExplorerRegistry = crate::registry::Registry::new();
        registry
            .register(OutputId::PageContent, [InputId::Url], |ctx, s| {
                Ok(Artifact::Page(ctx.router.resolve(s.path()?).layout()))
            })
            .unwrap();
        // Reads the slider without declaring it
        registry
            .register(OutputId::Map, Vec::<InputId>::new(), |_, s| {
                s.community()?;
                Ok(Artifact::Text(derivations::LocationDescription {
                    id: LocationId::new("unused"),
                    text: String::new(),
                }))
            })
            .unwrap();
        let context = ExplorerContext::new(
            Arc::new(ames_store()),
            DerivationConfig::default(),
            PageRouter::standard(),
        );

        let (session, _) =
            DashboardSession::open(Arc::new(registry), Arc::new(context), routes::TAXA);
        let map = session.panel(OutputId::Map).unwrap();
        let failure = map.failure.as_ref().unwrap();
        assert_eq!(failure.kind, "internal");
        assert!(!failure.local);
        // Unregistered outputs on the page fail the same way
        let table = session.panel(OutputId::TaxaTable).unwrap();
        assert_eq!(table.failure.as_ref().unwrap().kind, "unknown_output");
        assert!(!table.failure.as_ref().unwrap().local);
    }

    #[test]
    fn test_slider_ignored_by_unmounted_panels() {
        let (mut session, _) = open(routes::INDEX);
        let updates = session
            .apply(InputEvent::CommunitySelected { index: 1 })
            .unwrap();
        // The taxa table is not on the index page
        assert_eq!(outputs(&updates), vec![OutputId::Map]);
    }

    #[test]
    fn test_navigation_remounts() {
        let (mut session, _) = open(routes::INDEX);
        let updates = session
            .apply(InputEvent::NavigationChanged {
                path: routes::TAXA.to_string(),
            })
            .unwrap();
        assert_eq!(session.page().variant, PageVariant::Taxa);
        assert_eq!(
            outputs(&updates),
            vec![OutputId::PageContent, OutputId::Map, OutputId::TaxaTable]
        );
        assert!(session.panel(OutputId::CommunitiesDist).is_none());

        let updates = session
            .apply(InputEvent::CommunitySelected { index: 5 })
            .unwrap();
        assert_eq!(outputs(&updates), vec![OutputId::Map, OutputId::TaxaTable]);
        let table = session.panel(OutputId::TaxaTable).unwrap();
        assert_eq!(
            table.displayed.as_ref().unwrap().as_table().unwrap().community.get(),
            5
        );
    }

    #[test]
    fn test_unknown_path_falls_back() {
        let (session, updates) = open(routes::UNKNOWN);
        assert_eq!(session.page().variant, PageVariant::Index);
        assert_eq!(session.inputs().pathname, routes::UNKNOWN);
        assert!(updates[0].state.displayed.is_some());
    }

    #[test]
    fn test_model_page_has_no_panels() {
        let (session, updates) = open(routes::MODEL);
        assert_eq!(outputs(&updates), vec![OutputId::PageContent]);
        assert!(session.page().description.is_some());
    }

    #[test]
    fn test_snapshot_serializes() {
        let (session, _) = open(routes::ABOUT);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["inputs"]["pathname"], "/about");
        assert!(json["panels"]["elevation-plot"]["displayed"].is_object());
    }
}
