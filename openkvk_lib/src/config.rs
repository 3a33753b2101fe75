//! Engine settings read from the environment.

use openkvk_api::types::ResponseFormat;

use crate::error::OpenKvkError;
use crate::validation::parse_bool;

pub const BASE_URL_VAR: &str = "OPENKVK_BASE_URL";
pub const FORMAT_VAR: &str = "OPENKVK_FORMAT";
pub const ACTIVE_ONLY_VAR: &str = "OPENKVK_ACTIVE_ONLY";

/// Starting configuration for a [`crate::QueryEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `None` uses the production endpoint.
    pub base_url: Option<String>,
    pub format: ResponseFormat,
    pub active_only: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            format: ResponseFormat::Structured,
            active_only: true,
        }
    }
}

impl EngineConfig {
    /// Reads `OPENKVK_BASE_URL`, `OPENKVK_FORMAT` and `OPENKVK_ACTIVE_ONLY`.
    /// Unset or empty variables keep their defaults; set but unreadable
    /// values are errors.
    pub fn from_env() -> Result<Self, OpenKvkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, OpenKvkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();
        if let Some(url) = var(BASE_URL_VAR) {
            cfg.base_url = Some(url.trim().to_string());
        }
        if let Some(format) = var(FORMAT_VAR) {
            cfg.format = format
                .parse()
                .map_err(|_| OpenKvkError::UnsupportedFormat(format.clone()))?;
        }
        if let Some(active) = var(ACTIVE_ONLY_VAR) {
            cfg.active_only = parse_bool(&active)?;
        }
        Ok(cfg)
    }
}
