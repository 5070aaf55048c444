//! Application setup and initialization
//!
//! All startup logic lives here rather than in main.rs so initialization can
//! be exercised piecewise.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::services::IntakeService;
use crate::state::AppState;
use helpdesk_core::Config;
use helpdesk_db::{IntakeRepository, TicketRepository};
use helpdesk_extract::ExtractorChain;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let storage = storage::setup_storage(&config).await?;

    let repository: Arc<dyn IntakeRepository> = Arc::new(TicketRepository::new(pool.clone()));

    let extractor = Arc::new(ExtractorChain::from_config(&config)?);

    let intake = IntakeService::from_config(&config, repository.clone(), storage.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        pool,
        repository,
        storage,
        extractor,
        intake,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
