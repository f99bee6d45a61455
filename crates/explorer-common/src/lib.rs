//! Common types and utilities shared across all community-explorer crates.

pub mod attribute;
pub mod community;
pub mod error;
pub mod event;
pub mod ids;
pub mod location;
pub mod page;
pub mod selection;

pub use attribute::ClimateAttribute;
pub use community::{CommunityIndex, CommunityWeights, COMMUNITY_COUNT};
pub use error::{ExplorerError, ExplorerResult};
pub use event::InputEvent;
pub use ids::{InputId, OutputId};
pub use location::LocationId;
pub use page::{PageLayout, PageRouter, PageVariant};
pub use selection::{InputState, SelectionState};
