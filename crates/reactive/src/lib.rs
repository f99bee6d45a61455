//! Reactive layer of the community explorer.
//!
//! Inputs change, the registry finds the outputs that declared them, and each
//! affected output is derived again from a snapshot of its inputs:
//!
//! ```text
//!  InputEvent ──► DashboardSession ──► Registry::propagate ──► derivations
//!                      │                       │
//!                      ◄──── PanelUpdate ◄──────┘
//! ```

pub mod artifact;
pub mod inputs;
pub mod memo;
pub mod registry;
pub mod session;
pub mod wiring;

pub use artifact::Artifact;
pub use inputs::{read_input, InputSnapshot, InputValue};
pub use memo::{MemoCache, MemoStats, MemoStatsSnapshot};
pub use registry::{Derivation, Recomputed, Registry};
pub use session::{DashboardSession, PanelFailure, PanelState, PanelUpdate, SessionSnapshot};
pub use wiring::{explorer_registry, ExplorerContext, ExplorerRegistry};
