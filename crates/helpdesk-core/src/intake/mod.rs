//! Ticket intake pipeline primitives.
//!
//! Shared by every intake channel (form, API, email webhook): field
//! normalization, the ordered validation rule chain, the attachment policy
//! check, and the per-field error report type.

mod attachments;
mod fields;
mod report;
mod validate;

pub use attachments::{check_attachments, AttachmentCandidate, AttachmentPolicy};
pub use fields::TicketFields;
pub use report::{ErrorSet, IntakeField};
pub use validate::{validate_fields, VALID_DEPARTMENTS};
