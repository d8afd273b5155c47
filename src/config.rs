//! Process-wide defaults for the adapter.
//!
//! Installed at most once; afterwards the value is read-only. If nothing is
//! installed, the first read takes it from the environment.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FrameResult;
use crate::types::{Backend, ConcatMode};

pub const BACKEND_ENV: &str = "SPORTY_FRAMES_BACKEND";
pub const CONCAT_ENV: &str = "SPORTY_FRAMES_CONCAT";

static GLOBAL: OnceCell<AdapterConfig> = OnceCell::new();

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Used by `create_empty_default`.
    pub default_backend: Backend,
    /// Used by `concat_default`.
    pub default_concat: ConcatMode,
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values are logged and the
    /// default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(BACKEND_ENV) {
            match raw.trim().parse::<Backend>() {
                Ok(backend) => cfg.default_backend = backend,
                Err(err) => warn!(key = BACKEND_ENV, value = %raw, %err, "ignoring config value"),
            }
        }
        if let Some(raw) = lookup(CONCAT_ENV) {
            match raw.trim().parse::<ConcatMode>() {
                Ok(mode) => cfg.default_concat = mode,
                Err(err) => warn!(key = CONCAT_ENV, value = %raw, %err, "ignoring config value"),
            }
        }
        cfg
    }

    /// `{"default_backend": "rows", "default_concat": "diagonal"}`; missing
    /// keys keep their defaults.
    pub fn from_json(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Set the process-wide config. Fails (handing the value back) if one is
/// already in place, including one loaded lazily by [`global`].
pub fn install(cfg: AdapterConfig) -> Result<(), AdapterConfig> {
    GLOBAL.set(cfg)
}

pub fn global() -> &'static AdapterConfig {
    GLOBAL.get_or_init(AdapterConfig::from_env)
}
