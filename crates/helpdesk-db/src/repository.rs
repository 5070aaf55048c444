use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use helpdesk_core::models::{Attachment, Ticket};
use helpdesk_core::{AppError, TicketFields};

/// Storage contract consumed by the intake orchestrator.
///
/// The duplicate check and the create calls are separate operations with no
/// transaction around them; two concurrent submissions with the same k_number
/// can both pass the existence check. The schema intentionally carries no
/// unique constraint on k_number, so this is an accepted race.
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    async fn exists_by_k_number(&self, k_number: &str) -> Result<bool, AppError>;

    async fn create_ticket(&self, fields: &TicketFields) -> Result<Ticket, AppError>;

    async fn create_attachment(
        &self,
        ticket_id: i64,
        storage_key: &str,
        original_filename: &str,
        content_type: &str,
        file_size: i64,
    ) -> Result<Attachment, AppError>;

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, AppError>;

    async fn list_attachments(&self, ticket_id: i64) -> Result<Vec<Attachment>, AppError>;

    /// Remove a ticket and (via FK cascade) its attachment records. Used for
    /// best-effort cleanup when attachment persistence fails midway.
    async fn delete_ticket(&self, id: i64) -> Result<(), AppError>;
}

/// Postgres-backed ticket repository.
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl IntakeRepository for TicketRepository {
    async fn exists_by_k_number(&self, k_number: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tickets WHERE k_number = $1)")
                .bind(k_number)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }

    async fn create_ticket(&self, fields: &TicketFields) -> Result<Ticket, AppError> {
        let ticket: Ticket = sqlx::query_as::<Postgres, Ticket>(
            r#"
            INSERT INTO tickets (
                name, surname, k_number, k_email,
                department, type_of_issue, additional_details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.surname)
        .bind(&fields.k_number)
        .bind(&fields.k_email)
        .bind(&fields.department)
        .bind(&fields.type_of_issue)
        .bind(&fields.additional_details)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(ticket_id = ticket.id, k_number = %ticket.k_number, "Created ticket");

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
        let attachment: Attachment = sqlx::query_as::<Postgres, Attachment>(
            r#"
            INSERT INTO attachments (
                ticket_id, storage_key, original_filename, content_type, file_size
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ticket_id)
        .bind(storage_key)
        .bind(original_filename)
        .bind(content_type)
        .bind(file_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(attachment)
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, AppError> {
        let ticket: Option<Ticket> =
            sqlx::query_as::<Postgres, Ticket>("SELECT * FROM tickets WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(ticket)
    }

    async fn list_attachments(&self, ticket_id: i64) -> Result<Vec<Attachment>, AppError> {
        let attachments: Vec<Attachment> = sqlx::query_as::<Postgres, Attachment>(
            "SELECT * FROM attachments WHERE ticket_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(attachments)
    }

    async fn delete_ticket(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
