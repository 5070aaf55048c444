//! Inbound email webhook.
//!
//! Receives parsed emails in the inbound-parse convention (`from`, `subject`,
//! `text` fields, multipart or urlencoded, with optional file parts), runs
//! the extraction chain over the assembled content, then hands the derived
//! fields to the same intake pipeline as direct submissions.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::SubmitSuccess;
use crate::services::AttachmentUpload;
use crate::state::AppState;
use helpdesk_core::AppError;
use helpdesk_extract::assemble_email_content;

#[derive(Debug, Default, Deserialize)]
pub struct EmailPayload {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
}

#[utoipa::path(
    post,
    path = "/api/v0/email/webhook",
    tag = "tickets",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Ticket created from email", body = SubmitSuccess),
        (status = 400, description = "Extracted fields failed validation", body = Object),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn email_webhook(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, HttpAppError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (payload, attachments) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        read_email_multipart(multipart).await?
    } else {
        let Form(payload) = Form::<EmailPayload>::from_request(req, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)))?;
        (payload, Vec::new())
    };

    tracing::info!(
        sender = %payload.from,
        subject = %payload.subject,
        attachments = attachments.len(),
        "Received inbound email"
    );

    let email_content = assemble_email_content(&payload.subject, &payload.from, &payload.text);
    let fields = state.extractor.extract(&email_content, &payload.from).await;

    let outcome = state.intake.submit(fields, attachments).await;
    Ok(outcome.into_response())
}

/// Collect the email fields and any file-bearing parts. Inbound-parse
/// services name file parts inconsistently, so any part with a filename is
/// treated as an attachment.
async fn read_email_multipart(
    mut multipart: Multipart,
) -> Result<(EmailPayload, Vec<AttachmentUpload>), AppError> {
    let mut payload = EmailPayload::default();
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(filename) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", filename, e)))?;
            attachments.push(AttachmentUpload {
                filename,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
        match name.as_str() {
            "from" => payload.from = value,
            "subject" => payload.subject = value,
            "text" => payload.text = value,
            _ => {}
        }
    }

    Ok((payload, attachments))
}
