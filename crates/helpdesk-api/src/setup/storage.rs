//! Attachment storage setup

use std::sync::Arc;

use anyhow::{Context, Result};

use helpdesk_core::Config;
use helpdesk_storage::{LocalStorage, Storage};

/// Setup the attachment storage backend.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.local_storage_path.clone())
        .await
        .context("Failed to initialize local storage")?;

    tracing::info!(path = %config.local_storage_path, "Local storage initialized");

    Ok(Arc::new(storage))
}
