//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare storage
//! without depending on `common` for it directly.

use std::path::Path;

/// Ensure the data file's directory exists.
pub async fn ensure_storage(data_file: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_file).await
}
