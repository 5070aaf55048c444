//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::IntakeService;
use helpdesk_core::Config;
use helpdesk_db::IntakeRepository;
use helpdesk_extract::ExtractorChain;
use helpdesk_storage::Storage;

/// Main application state, injected into handlers as `Arc<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub repository: Arc<dyn IntakeRepository>,
    pub storage: Arc<dyn Storage>,
    pub extractor: Arc<ExtractorChain>,
    pub intake: IntakeService,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
