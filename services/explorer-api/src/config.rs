//! Service configuration loading and types.

use std::path::Path;

use anyhow::{Context, Result};
use community_store::DatasetPaths;
use derivations::DerivationConfig;
use explorer_common::{PageRouter, PageVariant};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the map tile token.
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Dashboard configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dataset source files.
    #[serde(default)]
    pub data: DatasetPaths,

    /// Derivation parameters (map, gauges, distribution).
    #[serde(default)]
    pub derivations: DerivationConfig,

    #[serde(default)]
    pub sessions: SessionConfig,

    /// Routes added to the standard ones.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Session table and memo sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum live sessions; the least recently used is dropped beyond this.
    #[serde(default = "default_session_capacity")]
    pub capacity: usize,

    /// Memoized derivation results shared by all sessions. 0 disables.
    #[serde(default = "default_memo_capacity")]
    pub memo_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: default_session_capacity(),
            memo_capacity: default_memo_capacity(),
        }
    }
}

fn default_session_capacity() -> usize {
    1024
}

fn default_memo_capacity() -> usize {
    4096
}

/// An extra navigation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub page: PageVariant,
}

impl DashboardConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults. The tile token is taken from the
    /// environment when set.
    pub fn load(path: &str) -> Result<Self> {
        let file = Path::new(path);

        let mut config = if file.exists() {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read: {:?}", file))?;
            let config: DashboardConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", file))?;
            tracing::info!(
                path = %file.display(),
                extra_routes = config.routes.len(),
                "Loaded dashboard config"
            );
            config
        } else {
            tracing::warn!(
                "Dashboard config {} does not exist, using defaults",
                path
            );
            DashboardConfig::default()
        };

        config.validate()?;

        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.is_empty() {
                config.derivations.map.access_token = token;
            }
        }

        Ok(config)
    }

    /// Reject parameters that would produce unusable figures.
    pub fn validate(&self) -> Result<()> {
        let exponent = self.derivations.distribution.log_floor_exponent;
        anyhow::ensure!(
            exponent.is_finite() && exponent < 0.0,
            "derivations.distribution.log_floor_exponent must be negative, got {}",
            exponent
        );
        Ok(())
    }

    /// The standard routes plus the configured extras.
    pub fn router(&self) -> PageRouter {
        self.routes
            .iter()
            .fold(PageRouter::standard(), |router, route| {
                router.with_route(&route.path, route.page)
            })
    }
}
