//! Helpdesk Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! ticket intake pipeline (field normalization, validation, attachment policy)
//! shared across all helpdesk components.

pub mod config;
pub mod error;
pub mod intake;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use intake::{
    check_attachments, validate_fields, AttachmentCandidate, AttachmentPolicy, ErrorSet,
    IntakeField, TicketFields, VALID_DEPARTMENTS,
};
