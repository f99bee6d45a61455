//! Navigation and page composition tests.

use explorer_common::{
    ClimateAttribute, InputEvent, InputId, OutputId, PageRouter, PageVariant,
};

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_about_path_yields_about_variant() {
    let router = PageRouter::standard();
    let event = InputEvent::NavigationChanged {
        path: "/about".to_string(),
    };
    let InputEvent::NavigationChanged { path } = event else {
        unreachable!()
    };
    assert_eq!(router.resolve(&path), PageVariant::About);
}

#[test]
fn test_every_unknown_path_matches_root() {
    let router = PageRouter::standard();
    let root = router.resolve("/");
    for path in ["/nonexistent", "/index.html", "/a/b/c", "///", "/taxa/extra"] {
        assert_eq!(router.resolve(path), root, "path {path}");
    }
}

#[test]
fn test_every_variant_is_routable() {
    let router = PageRouter::standard();
    for variant in PageVariant::ALL {
        assert!(
            router.routes().any(|(_, v)| v == variant),
            "{variant:?} has no route"
        );
    }
}

// ============================================================================
// Layouts
// ============================================================================

#[test]
fn test_index_layout_mounts_hover_panels() {
    let layout = PageVariant::Index.layout();
    assert_eq!(layout.title, "Location Explorer");
    assert!(layout.controls.contains(&InputId::MapHover));
    assert!(layout.panels.contains(&OutputId::LocationValues));
    assert!(layout.panels.contains(&OutputId::CommunitiesDist));
}

#[test]
fn test_about_layout_mounts_every_climate_plot() {
    let layout = PageVariant::About.layout();
    for attr in ClimateAttribute::ALL {
        assert!(layout.panels.contains(&OutputId::ClimatePlot(attr)));
    }
    assert!(!layout.controls.contains(&InputId::MapHover));
}

#[test]
fn test_layout_serializes_panel_names() {
    let json = serde_json::to_value(PageVariant::Taxa.layout()).unwrap();
    assert_eq!(json["variant"], "taxa");
    assert_eq!(json["panels"][1], "taxa-table");
    assert!(json.get("description").is_none());
}
