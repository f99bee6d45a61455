//! Input-change events delivered by the shell.

use serde::{Deserialize, Serialize};

use crate::{InputId, LocationId};

/// One user interaction.
///
/// The community index is kept raw so that out-of-range values surface as
/// `OutOfRange` rather than as a decoding failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    CommunitySelected { index: i64 },
    LocationHovered { id: Option<LocationId> },
    NavigationChanged { path: String },
}

impl InputEvent {
    /// The input this event changes.
    pub fn input_id(&self) -> InputId {
        match self {
            InputEvent::CommunitySelected { .. } => InputId::CommunitySlider,
            InputEvent::LocationHovered { .. } => InputId::MapHover,
            InputEvent::NavigationChanged { .. } => InputId::Url,
        }
    }
}
