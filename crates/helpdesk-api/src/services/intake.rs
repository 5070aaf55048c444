//! Ticket intake orchestrator.
//!
//! Runs the full intake pipeline for a submission, whether it arrived from
//! the form endpoint, the JSON API, or the email webhook: normalize the
//! fields, validate them all at once, apply the duplicate policy, check the
//! attachment batch, then persist the ticket and its attachments.
//!
//! Persistence is not transactional. If an attachment fails to store or
//! record midway, everything already written (stored files and the ticket
//! row) is cleaned up best-effort before the failure is reported.

use std::sync::Arc;

use helpdesk_core::{
    check_attachments, validate_fields, AppError, AttachmentCandidate, AttachmentPolicy, Config,
    ErrorSet, IntakeField, TicketFields,
};
use helpdesk_db::IntakeRepository;
use helpdesk_storage::{attachment_key, Storage};

const DUPLICATE_K_NUMBER_MESSAGE: &str = "A ticket with this K-Number already exists";

/// A file received with a submission, held in memory until the ticket row
/// exists and a ticket-scoped storage key can be built.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl AttachmentUpload {
    fn candidate(&self) -> AttachmentCandidate {
        AttachmentCandidate {
            filename: self.filename.clone(),
            size: self.data.len() as u64,
            content_type: self.content_type.clone(),
        }
    }
}

/// Result of running the intake pipeline.
#[derive(Debug)]
pub enum IntakeOutcome {
    /// Ticket and all attachments persisted.
    Accepted {
        ticket_id: i64,
        attachments_count: usize,
    },
    /// The submission itself was invalid; nothing was persisted.
    Rejected(ErrorSet),
    /// An infrastructure failure; anything partially written was cleaned up.
    Failed(ErrorSet),
}

#[derive(Clone)]
pub struct IntakeService {
    repository: Arc<dyn IntakeRepository>,
    storage: Arc<dyn Storage>,
    policy: AttachmentPolicy,
    reject_duplicate_k_number: bool,
}

impl IntakeService {
    pub fn new(
        repository: Arc<dyn IntakeRepository>,
        storage: Arc<dyn Storage>,
        policy: AttachmentPolicy,
        reject_duplicate_k_number: bool,
    ) -> Self {
        Self {
            repository,
            storage,
            policy,
            reject_duplicate_k_number,
        }
    }

    pub fn from_config(
        config: &Config,
        repository: Arc<dyn IntakeRepository>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self::new(
            repository,
            storage,
            AttachmentPolicy::new(
                config.max_attachment_size_bytes as u64,
                config.attachment_allowed_extensions.clone(),
            ),
            config.reject_duplicate_k_number,
        )
    }

    /// Run the full pipeline for one submission.
    pub async fn submit(
        &self,
        fields: TicketFields,
        attachments: Vec<AttachmentUpload>,
    ) -> IntakeOutcome {
        let fields = fields.trimmed();
        let mut errors = validate_fields(&fields);

        // The duplicate check only runs against a k_number that passed its
        // field rules; a malformed value already has its own message.
        if self.reject_duplicate_k_number && !errors.contains(IntakeField::KNumber) {
            match self.repository.exists_by_k_number(&fields.k_number).await {
                Ok(true) => {
                    errors.insert(IntakeField::KNumber, DUPLICATE_K_NUMBER_MESSAGE);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Duplicate check failed");
                    return IntakeOutcome::Failed(general_error(&e));
                }
            }
        }

        let candidates: Vec<AttachmentCandidate> =
            attachments.iter().map(|a| a.candidate()).collect();
        if let Err(message) = check_attachments(&self.policy, &candidates) {
            errors.insert(IntakeField::Attachments, message);
        }

        if !errors.is_empty() {
            return IntakeOutcome::Rejected(errors);
        }

        let ticket = match self.repository.create_ticket(&fields).await {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create ticket");
                return IntakeOutcome::Failed(general_error(&e));
            }
        };

        match self.persist_attachments(ticket.id, &attachments).await {
            Ok(()) => IntakeOutcome::Accepted {
                ticket_id: ticket.id,
                attachments_count: attachments.len(),
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    ticket_id = ticket.id,
                    "Failed to persist attachments, rolling back ticket"
                );
                IntakeOutcome::Failed(general_error(&e))
            }
        }
    }

    /// Store and record each attachment. On any failure, delete what was
    /// already stored and the ticket row, then surface the failure.
    async fn persist_attachments(
        &self,
        ticket_id: i64,
        attachments: &[AttachmentUpload],
    ) -> Result<(), AppError> {
        let mut stored_keys: Vec<String> = Vec::with_capacity(attachments.len());

        for upload in attachments {
            let key = attachment_key(Some(ticket_id), &upload.filename);

            if let Err(e) = self
                .storage
                .upload(&key, &upload.content_type, upload.data.clone())
                .await
            {
                self.cleanup(ticket_id, &stored_keys).await;
                return Err(AppError::Storage(format!(
                    "Failed to store {}: {}",
                    upload.filename, e
                )));
            }
            stored_keys.push(key.clone());

            if let Err(e) = self
                .repository
                .create_attachment(
                    ticket_id,
                    &key,
                    &upload.filename,
                    &upload.content_type,
                    upload.data.len() as i64,
                )
                .await
            {
                self.cleanup(ticket_id, &stored_keys).await;
                return Err(AppError::Internal(format!(
                    "Failed to record {}: {}",
                    upload.filename, e
                )));
            }
        }

        Ok(())
    }

    async fn cleanup(&self, ticket_id: i64, stored_keys: &[String]) {
        for key in stored_keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(storage_key = %key, error = %e, "Cleanup of stored file failed");
            }
        }
        if let Err(e) = self.repository.delete_ticket(ticket_id).await {
            tracing::warn!(ticket_id, error = %e, "Cleanup of ticket row failed");
        }
    }
}

fn general_error(detail: &dyn std::fmt::Display) -> ErrorSet {
    ErrorSet::single(IntakeField::General, format!("An error occurred: {}", detail))
}
