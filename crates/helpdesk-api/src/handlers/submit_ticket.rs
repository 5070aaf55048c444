//! Ticket submission endpoint.
//!
//! Accepts either a JSON body with the seven ticket fields or a multipart
//! form with the same field names plus repeatable `attachments` file parts.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::SubmitSuccess;
use crate::services::AttachmentUpload;
use crate::state::AppState;
use helpdesk_core::{AppError, TicketFields};

const TICKET_FIELD_NAMES: [&str; 7] = [
    "name",
    "surname",
    "k_number",
    "k_email",
    "department",
    "type_of_issue",
    "additional_details",
];

#[utoipa::path(
    post,
    path = "/api/v0/tickets",
    tag = "tickets",
    request_body(content = TicketFields, content_type = "application/json"),
    responses(
        (status = 201, description = "Ticket submitted successfully", body = SubmitSuccess),
        (status = 400, description = "Validation errors keyed by field", body = Object),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_ticket(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, HttpAppError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (fields, attachments) = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        read_ticket_multipart(multipart).await?
    } else {
        let Json(fields) = Json::<TicketFields>::from_request(req, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        (fields, Vec::new())
    };

    let outcome = state.intake.submit(fields, attachments).await;
    Ok(outcome.into_response())
}

/// Collect ticket fields and `attachments` file parts from a multipart form.
/// Unknown parts are ignored so browser form quirks do not fail a submission.
async fn read_ticket_multipart(
    mut multipart: Multipart,
) -> Result<(TicketFields, Vec<AttachmentUpload>), AppError> {
    let mut fields = TicketFields::default();
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "attachments" {
            let filename = field.file_name().unwrap_or("unnamed").to_string();
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
        } else if TICKET_FIELD_NAMES.contains(&name.as_str()) {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
            set_field(&mut fields, &name, value);
        }
    }

    Ok((fields, attachments))
}

fn set_field(fields: &mut TicketFields, name: &str, value: String) {
    match name {
        "name" => fields.name = value,
        "surname" => fields.surname = value,
        "k_number" => fields.k_number = value,
        "k_email" => fields.k_email = value,
        "department" => fields.department = value,
        "type_of_issue" => fields.type_of_issue = value,
        "additional_details" => fields.additional_details = value,
        _ => {}
    }
}
