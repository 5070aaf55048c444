//! In-memory fakes for exercising the intake pipeline without Postgres or a
//! real filesystem backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use helpdesk_core::models::{Attachment, Ticket, TicketStatus};
use helpdesk_core::{AppError, TicketFields};
use helpdesk_db::IntakeRepository;
use helpdesk_storage::{Storage, StorageError, StorageResult};

#[derive(Default)]
struct RepoState {
    tickets: Vec<Ticket>,
    attachments: Vec<Attachment>,
    next_ticket_id: i64,
    next_attachment_id: i64,
}

pub struct MemoryRepository {
    state: Mutex<RepoState>,
    fail_attachment_writes: bool,
    fail_all: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RepoState {
                next_ticket_id: 1,
                next_attachment_id: 1,
                ..Default::default()
            }),
            fail_attachment_writes: false,
            fail_all: false,
        }
    }

    /// Every `create_attachment` call fails, to exercise cleanup.
    pub fn failing_attachment_writes() -> Self {
        Self {
            fail_attachment_writes: true,
            ..Self::new()
        }
    }

    /// Every repository call fails, to exercise infrastructure error paths.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    /// Pre-populate a ticket with the given k_number for duplicate tests.
    pub fn seed_k_number(&self, k_number: &str) {
        let mut fields = TicketFields::default();
        fields.name = "Seed".to_string();
        fields.surname = "User".to_string();
        fields.k_number = k_number.to_string();
        fields.k_email = format!("K{}@kcl.ac.uk", k_number);
        fields.department = "Informatics".to_string();
        fields.type_of_issue = "Seed".to_string();
        fields.additional_details = "Seed".to_string();
        let mut state = self.state.lock().unwrap();
        let id = state.next_ticket_id;
        state.next_ticket_id += 1;
        state.tickets.push(make_ticket(id, &fields));
    }

    pub fn ticket_count(&self) -> usize {
        self.state.lock().unwrap().tickets.len()
    }

    pub fn attachment_count(&self) -> usize {
        self.state.lock().unwrap().attachments.len()
    }
}

fn make_ticket(id: i64, fields: &TicketFields) -> Ticket {
    let now = Utc::now();
    Ticket {
        id,
        name: fields.name.clone(),
        surname: fields.surname.clone(),
        k_number: fields.k_number.clone(),
        k_email: fields.k_email.clone(),
        department: fields.department.clone(),
        type_of_issue: fields.type_of_issue.clone(),
        additional_details: fields.additional_details.clone(),
        status: TicketStatus::Pending,
        priority: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl IntakeRepository for MemoryRepository {
    async fn exists_by_k_number(&self, k_number: &str) -> Result<bool, AppError> {
        if self.fail_all {
            return Err(AppError::Internal("simulated repository failure".into()));
        }
        let state = self.state.lock().unwrap();
        Ok(state.tickets.iter().any(|t| t.k_number == k_number))
    }

    async fn create_ticket(&self, fields: &TicketFields) -> Result<Ticket, AppError> {
        if self.fail_all {
            return Err(AppError::Internal("simulated repository failure".into()));
        }
        let mut state = self.state.lock().unwrap();
        let id = state.next_ticket_id;
        state.next_ticket_id += 1;
        let ticket = make_ticket(id, fields);
        state.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn create_attachment(
        &self,
        ticket_id: i64,
        storage_key: &str,
        original_filename: &str,
        content_type: &str,
        file_size: i64,
    ) -> Result<Attachment, AppError> {
        if self.fail_all || self.fail_attachment_writes {
            return Err(AppError::Internal("simulated attachment failure".into()));
        }
        let mut state = self.state.lock().unwrap();
        let id = state.next_attachment_id;
        state.next_attachment_id += 1;
        let attachment = Attachment {
            id,
            ticket_id,
            storage_key: storage_key.to_string(),
            original_filename: original_filename.to_string(),
            content_type: content_type.to_string(),
            file_size,
            uploaded_at: Utc::now(),
        };
        state.attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, AppError> {
        if self.fail_all {
            return Err(AppError::Internal("simulated repository failure".into()));
        }
        let state = self.state.lock().unwrap();
        Ok(state.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn list_attachments(&self, ticket_id: i64) -> Result<Vec<Attachment>, AppError> {
        if self.fail_all {
            return Err(AppError::Internal("simulated repository failure".into()));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .attachments
            .iter()
            .filter(|a| a.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    async fn delete_ticket(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.tickets.retain(|t| t.id != id);
        state.attachments.retain(|a| a.ticket_id != id);
        Ok(())
    }
}

pub struct MemoryStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_upload_containing: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_upload_containing: None,
        }
    }

    /// Fail any upload whose key contains `marker`, to exercise cleanup.
    pub fn failing_uploads_containing(marker: &str) -> Self {
        Self {
            fail_upload_containing: Some(marker.to_string()),
            ..Self::new()
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn contains(&self, storage_key: &str) -> bool {
        self.files.lock().unwrap().contains_key(storage_key)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        if let Some(marker) = &self.fail_upload_containing {
            if storage_key.contains(marker.as_str()) {
                return Err(StorageError::UploadFailed("simulated upload failure".into()));
            }
        }
        self.files
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(storage_key.to_string())
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.files.lock().unwrap().remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(storage_key))
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
