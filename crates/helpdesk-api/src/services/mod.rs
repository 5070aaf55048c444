//! Business services.

pub mod intake;

pub use intake::{AttachmentUpload, IntakeOutcome, IntakeService};
