//! Renderable results handed to the shell.

use derivations::{LocationDescription, TaxaTable};
use explorer_common::PageLayout;
use plot_spec::Figure;
use serde::Serialize;

/// What one output renders to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Artifact {
    Figure(Figure),
    Table(TaxaTable),
    Text(LocationDescription),
    Page(PageLayout),
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Figure(_) => "figure",
            Artifact::Table(_) => "table",
            Artifact::Text(_) => "text",
            Artifact::Page(_) => "page",
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            Artifact::Figure(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TaxaTable> {
        match self {
            Artifact::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&LocationDescription> {
        match self {
            Artifact::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_page(&self) -> Option<&PageLayout> {
        match self {
            Artifact::Page(p) => Some(p),
            _ => None,
        }
    }
}
