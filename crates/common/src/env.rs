//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data file has somewhere to live at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `data_file` exists, creating it if needed.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    let dir = match data_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    warn!(dir = %dir.display(), "data directory missing; creating it");
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "data directory created");
    Ok(())
}
