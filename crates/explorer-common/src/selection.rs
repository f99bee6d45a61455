//! Mutable user selections, owned by a session.

use serde::{Deserialize, Serialize};

use crate::{CommunityIndex, LocationId};

/// The two dashboard selections.
///
/// Starts with community 0 and nothing hovered. Only input events change it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_community: CommunityIndex,
    pub hovered_location: Option<LocationId>,
}

/// Every input a session holds: the selections plus the navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputState {
    pub selection: SelectionState,
    pub pathname: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            selection: SelectionState::default(),
            pathname: "/".to_string(),
        }
    }
}
