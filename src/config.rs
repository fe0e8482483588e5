use std::{path::{Path, PathBuf}, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Runtime settings, from the environment or a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory of the store (one subdirectory per model).
    pub store_path: PathBuf,
    /// Directory the engine input files are written to.
    pub work_path: PathBuf,
    /// How long to wait for a store session.
    pub checkout_timeout_ms: u64,
    /// How long one request may keep issuing queries.
    pub request_timeout_ms: u64,
    /// Also assemble the subsidies and supply tables.
    pub extended_tables: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: "store".into(),
            work_path: "work".into(),
            checkout_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            extended_tables: false,
        }
    }
}

impl Config {
    /// Read settings from `MULAND_*` environment variables, defaulting
    /// whatever is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = var("MULAND_STORE_PATH") { config.store_path = path.into() }
        if let Some(path) = var("MULAND_WORK_PATH") { config.work_path = path.into() }
        if let Some(ms) = parse_var(&var, "MULAND_CHECKOUT_TIMEOUT_MS")? { config.checkout_timeout_ms = ms }
        if let Some(ms) = parse_var(&var, "MULAND_REQUEST_TIMEOUT_MS")? { config.request_timeout_ms = ms }
        if let Some(flag) = parse_var(&var, "MULAND_EXTENDED_TABLES")? { config.extended_tables = flag }
        Ok(config)
    }

    /// Read settings from a JSON file; missing keys take their defaults.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    #[inline] pub fn checkout_timeout(&self) -> Duration { Duration::from_millis(self.checkout_timeout_ms) }

    #[inline] pub fn request_timeout(&self) -> Duration { Duration::from_millis(self.request_timeout_ms) }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|value| value.trim().parse::<T>()
            .with_context(|| format!("[config] Invalid value for {key}: {value:?}")))
        .transpose()
}
