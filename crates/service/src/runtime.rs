//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep the bot crate importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data directory exists before the stores open their files.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await
}
