//! One-sentence description of the hovered location ("text-content").

use community_store::DatasetStore;
use explorer_common::{ExplorerError, ExplorerResult, LocationId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDescription {
    pub id: LocationId,
    pub text: String,
}

pub fn describe_location(
    store: &DatasetStore,
    hovered: Option<&LocationId>,
) -> ExplorerResult<LocationDescription> {
    let id = hovered.ok_or(ExplorerError::MissingSelection)?;
    let loc = store.location_by_id(id)?;

    let text = format!(
        "In {}, {}, the mean precipitation is {} cm, the mean temperature is {} C and the elevation is {} m",
        loc.display_city(),
        loc.state.trim(),
        loc.precipitation,
        loc.temperature,
        loc.elevation,
    );

    Ok(LocationDescription {
        id: id.clone(),
        text,
    })
}
