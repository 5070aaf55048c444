//! Helpdesk API Library
//!
//! HTTP handlers, the intake orchestrator, and application setup.

mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
