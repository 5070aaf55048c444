//! Attachment file storage.
//!
//! Defines the [`Storage`] trait that storage backends implement and a local
//! filesystem backend. Keys are ticket-scoped:
//! `attachments/ticket_<id>/<filename>`, or `attachments/temp/<filename>`
//! before a ticket id exists.

mod keys;
mod local;
mod traits;

pub use keys::attachment_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
