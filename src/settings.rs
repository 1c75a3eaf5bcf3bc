//! Application settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SPOTLIGHT_*` environment variables (nested keys joined with `__`, e.g.
//! `SPOTLIGHT_META__ACCESS_TOKEN`).

use std::collections::HashMap;
use std::env;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::budget::{BudgetEstimator, CostModel, CostModelError, UnknownGoalPolicy};
use crate::interests::{
    GraphInterestClient, InterestError, DEFAULT_GRAPH_BASE_URL, DEFAULT_SEARCH_LIMIT,
};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SPOTLIGHT";

/// Legacy variable holding the Meta access token.
pub const META_TOKEN_ENV_VAR: &str = "META_API_KEY";

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid cost model: {0}")]
    CostModel(#[from] CostModelError),

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Meta Graph API access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaSettings {
    /// Access token; interest lookup is skipped without one
    pub access_token: Option<String>,
    pub base_url: String,
    /// Interests requested per keyword
    pub search_limit: u32,
    pub timeout_secs: u64,
}

impl Default for MetaSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            timeout_secs: 30,
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub unknown_goal: UnknownGoalPolicy,
    pub cost_model: CostModel,
    pub meta: MetaSettings,
}

impl Settings {
    /// Load defaults, the optional file, and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = Self::load_with_env(path, None)?;
        if settings.meta.access_token.is_none() {
            settings.meta.access_token = env::var(META_TOKEN_ENV_VAR)
                .ok()
                .filter(|token| !token.trim().is_empty());
        }
        Ok(settings)
    }

    /// Load with an explicit environment map instead of the process
    /// environment when `vars` is given.
    pub fn load_with_env(
        path: Option<&Path>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(vars),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(path = ?path, "settings loaded");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.cost_model.validate()?;
        if self.meta.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "meta.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Estimator configured from these settings.
    pub fn estimator(&self) -> BudgetEstimator {
        BudgetEstimator::new(self.cost_model.clone()).with_unknown_goal_policy(self.unknown_goal)
    }

    /// Graph client, or `None` when no access token is configured.
    pub fn interest_client(&self) -> Result<Option<GraphInterestClient>, InterestError> {
        let Some(token) = self.meta.access_token.as_deref() else {
            tracing::warn!("Meta access token not configured, skipping interest lookup");
            return Ok(None);
        };
        let client =
            GraphInterestClient::with_base_url(token, self.meta.timeout_secs, &self.meta.base_url)?
                .with_limit(self.meta.search_limit);
        Ok(Some(client))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
