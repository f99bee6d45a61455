//! Input values and the snapshots handed to derivations.

use std::collections::{BTreeMap, BTreeSet};

use explorer_common::{
    CommunityIndex, ExplorerError, ExplorerResult, InputId, InputState, LocationId,
};
use serde::Serialize;

/// The current value of one input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum InputValue {
    Community(CommunityIndex),
    Hover(Option<LocationId>),
    Path(String),
}

/// Read the value of `id` from the session inputs.
pub fn read_input(state: &InputState, id: InputId) -> InputValue {
    match id {
        InputId::CommunitySlider => InputValue::Community(state.selection.selected_community),
        InputId::MapHover => InputValue::Hover(state.selection.hovered_location.clone()),
        InputId::Url => InputValue::Path(state.pathname.clone()),
    }
}

/// Values of exactly the inputs an output declared.
///
/// Two snapshots compare equal when every declared input has the same value,
/// which makes `(OutputId, InputSnapshot)` a sound memo key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct InputSnapshot(BTreeMap<InputId, InputValue>);

impl InputSnapshot {
    pub fn capture(state: &InputState, deps: &BTreeSet<InputId>) -> Self {
        Self(deps.iter().map(|&id| (id, read_input(state, id))).collect())
    }

    pub fn get(&self, id: InputId) -> Option<&InputValue> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The selected community. Fails if the output did not declare the slider.
    pub fn community(&self) -> ExplorerResult<CommunityIndex> {
        match self.get(InputId::CommunitySlider) {
            Some(InputValue::Community(c)) => Ok(*c),
            _ => Err(undeclared(InputId::CommunitySlider)),
        }
    }

    /// The hovered location, if any. Fails if the output did not declare map hover.
    pub fn hovered(&self) -> ExplorerResult<Option<&LocationId>> {
        match self.get(InputId::MapHover) {
            Some(InputValue::Hover(h)) => Ok(h.as_ref()),
            _ => Err(undeclared(InputId::MapHover)),
        }
    }

    pub fn path(&self) -> ExplorerResult<&str> {
        match self.get(InputId::Url) {
            Some(InputValue::Path(p)) => Ok(p),
            _ => Err(undeclared(InputId::Url)),
        }
    }
}

fn undeclared(id: InputId) -> ExplorerError {
    ExplorerError::InternalError(format!("input '{}' is not a declared dependency", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InputState {
        let mut state = InputState::default();
        state.selection.selected_community = CommunityIndex::new(4).unwrap();
        state.selection.hovered_location = Some(LocationId::new("X1"));
        state
    }

    #[test]
    fn test_capture_only_declared() {
        let deps = BTreeSet::from([InputId::MapHover]);
        let snap = InputSnapshot::capture(&state(), &deps);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.hovered().unwrap(), Some(&LocationId::new("X1")));
        assert!(matches!(snap.community(), Err(ExplorerError::InternalError(_))));
    }

    #[test]
    fn test_snapshot_ignores_undeclared_changes() {
        let deps = BTreeSet::from([InputId::CommunitySlider]);
        let a = InputSnapshot::capture(&state(), &deps);

        let mut other = state();
        other.selection.hovered_location = None;
        other.pathname = "/about".into();
        let b = InputSnapshot::capture(&other, &deps);
        assert_eq!(a, b);

        other.selection.selected_community = CommunityIndex::new(5).unwrap();
        let c = InputSnapshot::capture(&other, &deps);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = InputSnapshot::capture(&state(), &BTreeSet::new());
        assert!(snap.is_empty());
        assert_eq!(snap, InputSnapshot::default());
    }
}
