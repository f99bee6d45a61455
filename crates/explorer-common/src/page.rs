//! Page variants and navigation routing.
//!
//! Every page is composed from the same set of panels; a variant only decides
//! which panels are mounted and which inputs are shown. Routing is a total
//! function: unknown paths resolve to the default variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ClimateAttribute, InputId, OutputId};

/// A page the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    Index,
    About,
    Taxa,
    Model,
}

impl PageVariant {
    pub const ALL: [PageVariant; 4] = [
        PageVariant::Index,
        PageVariant::About,
        PageVariant::Taxa,
        PageVariant::Model,
    ];

    /// Navigation title.
    pub fn title(self) -> &'static str {
        match self {
            PageVariant::Index => "Location Explorer",
            PageVariant::About => "Community Properties",
            PageVariant::Taxa => "Top Taxa",
            PageVariant::Model => "Model",
        }
    }

    /// Panels mounted on this page, top to bottom.
    pub fn panels(self) -> Vec<OutputId> {
        match self {
            PageVariant::Index => vec![
                OutputId::Map,
                OutputId::LocationValues,
                OutputId::CommunitiesDist,
                OutputId::TextContent,
            ],
            PageVariant::About => {
                let mut panels = vec![OutputId::Map];
                panels.extend(ClimateAttribute::ALL.into_iter().map(OutputId::ClimatePlot));
                panels
            }
            PageVariant::Taxa => vec![OutputId::Map, OutputId::TaxaTable],
            PageVariant::Model => Vec::new(),
        }
    }

    /// Inputs the page exposes to the user.
    pub fn controls(self) -> Vec<InputId> {
        match self {
            PageVariant::Index => vec![InputId::CommunitySlider, InputId::MapHover],
            PageVariant::About | PageVariant::Taxa => vec![InputId::CommunitySlider],
            PageVariant::Model => Vec::new(),
        }
    }

    pub fn layout(self) -> PageLayout {
        PageLayout {
            variant: self,
            title: self.title().to_string(),
            panels: self.panels(),
            controls: self.controls(),
            description: match self {
                PageVariant::Model => Some(
                    "Community weights come from a clustering model fitted upstream \
                     over taxon abundances at every sampled site."
                        .to_string(),
                ),
                _ => None,
            },
        }
    }
}

/// What the shell needs to compose a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub variant: PageVariant,
    pub title: String,
    pub panels: Vec<OutputId>,
    pub controls: Vec<InputId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Maps navigation paths to page variants.
#[derive(Debug, Clone)]
pub struct PageRouter {
    routes: BTreeMap<String, PageVariant>,
    default: PageVariant,
}

impl PageRouter {
    /// An empty router that sends everything to `default`.
    pub fn new(default: PageVariant) -> Self {
        Self {
            routes: BTreeMap::new(),
            default,
        }
    }

    /// The standard routes: `/`, `/about`, `/taxa`, `/model`.
    pub fn standard() -> Self {
        Self::new(PageVariant::Index)
            .with_route("/", PageVariant::Index)
            .with_route("/about", PageVariant::About)
            .with_route("/taxa", PageVariant::Taxa)
            .with_route("/model", PageVariant::Model)
    }

    /// Add or replace a route (builder pattern).
    pub fn with_route(mut self, path: &str, variant: PageVariant) -> Self {
        self.routes.insert(normalize_path(path), variant);
        self
    }

    pub fn default_variant(&self) -> PageVariant {
        self.default
    }

    /// Resolve a navigation path. Never fails.
    pub fn resolve(&self, path: &str) -> PageVariant {
        self.routes
            .get(&normalize_path(path))
            .copied()
            .unwrap_or(self.default)
    }

    pub fn routes(&self) -> impl Iterator<Item = (&str, PageVariant)> {
        self.routes.iter().map(|(p, v)| (p.as_str(), *v))
    }
}

impl Default for PageRouter {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strip query, fragment and trailing slashes so `/about/?x=1` matches `/about`.
fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_routes() {
        let router = PageRouter::standard();
        assert_eq!(router.resolve("/"), PageVariant::Index);
        assert_eq!(router.resolve("/about"), PageVariant::About);
        assert_eq!(router.resolve("/taxa"), PageVariant::Taxa);
        assert_eq!(router.resolve("/model"), PageVariant::Model);
    }

    #[test]
    fn test_unknown_path_falls_back_to_root_variant() {
        let router = PageRouter::standard();
        assert_eq!(router.resolve("/nonexistent"), router.resolve("/"));
        assert_eq!(router.resolve(""), PageVariant::Index);
    }

    #[test]
    fn test_path_normalization() {
        let router = PageRouter::standard();
        assert_eq!(router.resolve("/about/"), PageVariant::About);
        assert_eq!(router.resolve("/about?tab=1"), PageVariant::About);
        assert_eq!(router.resolve("about"), PageVariant::About);
        assert_eq!(router.resolve("/About"), PageVariant::Index);
    }

    #[test]
    fn test_extra_routes() {
        let router = PageRouter::standard().with_route("/communities", PageVariant::About);
        assert_eq!(router.resolve("/communities"), PageVariant::About);
        assert_eq!(router.routes().count(), 5);
    }

    #[test]
    fn test_custom_default() {
        let router = PageRouter::new(PageVariant::Model).with_route("/", PageVariant::Index);
        assert_eq!(router.resolve("/elsewhere"), PageVariant::Model);
    }

    #[test]
    fn test_layout_panels() {
        assert_eq!(PageVariant::About.layout().panels.len(), 6);
        assert!(PageVariant::Model.layout().panels.is_empty());
        assert!(PageVariant::Model.layout().description.is_some());
        assert!(PageVariant::Index
            .layout()
            .panels
            .contains(&OutputId::CommunitiesDist));
    }
}
