pub mod assemble;
pub mod locate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use muland_data::{Config, Location, MemStore};

/// Read a locations JSON array.
pub fn read_locations(path: &Path) -> Result<Vec<Location>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read locations from {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse locations from {}", path.display()))
}

/// The `--store` argument, or the configured store path.
pub fn store_path(arg: Option<&Path>, config: &Config) -> PathBuf {
    arg.map_or_else(|| config.store_path.clone(), Path::to_path_buf)
}

/// Load a store directory with the configured timeouts.
pub fn open_store(arg: Option<&Path>, config: &Config) -> Result<MemStore> {
    let path = store_path(arg, config);
    tracing::info!("loading store from {}", path.display());
    Ok(MemStore::read_from_dir(&path)?
        .with_timeouts(config.checkout_timeout(), config.request_timeout()))
}
