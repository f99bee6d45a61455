//! Application state for the explorer API.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use community_store::DatasetStore;
use reactive::{explorer_registry, ExplorerContext, ExplorerRegistry};

use crate::config::DashboardConfig;
use crate::sessions::SessionStore;

/// Shared application state.
pub struct AppState {
    /// Dataset, derivation parameters and router, shared by every session.
    pub context: Arc<ExplorerContext>,

    /// Panel wiring, shared by every session.
    pub registry: Arc<ExplorerRegistry>,

    pub sessions: SessionStore,

    pub config: DashboardConfig,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the dataset named in `config` and build the shared state.
    ///
    /// Fails if any dataset file is missing or invalid.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let store = DatasetStore::load(&config.data).with_context(|| {
            format!(
                "Failed to load dataset ({}, {}, {})",
                config.data.locations.display(),
                config.data.summaries.display(),
                config.data.taxa.display()
            )
        })?;
        Self::with_store(store, config)
    }

    /// Build the shared state around an already loaded store.
    pub fn with_store(store: DatasetStore, config: DashboardConfig) -> Result<Self> {
        let registry = explorer_registry(config.sessions.memo_capacity)
            .context("Failed to wire dashboard panels")?;
        let context = ExplorerContext::new(
            Arc::new(store),
            config.derivations.clone(),
            config.router(),
        );

        tracing::info!(
            locations = context.store.len(),
            outputs = registry.outputs().count(),
            "Application state ready"
        );

        Ok(Self {
            context: Arc::new(context),
            registry: Arc::new(registry),
            sessions: SessionStore::new(config.sessions.capacity),
            config,
            started_at: Utc::now(),
        })
    }
}
