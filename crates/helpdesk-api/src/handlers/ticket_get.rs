//! Ticket read endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use helpdesk_core::models::{AttachmentResponse, TicketResponse};
use helpdesk_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub attachments: Vec<AttachmentResponse>,
}

#[utoipa::path(
    get,
    path = "/api/v0/tickets/{id}",
    tag = "tickets",
    params(
        ("id" = i64, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "Ticket found", body = TicketDetailResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TicketDetailResponse>, HttpAppError> {
    let ticket = state
        .repository
        .get_ticket(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

    let attachments = state.repository.list_attachments(id).await?;

    Ok(Json(TicketDetailResponse {
        ticket: ticket.into(),
        attachments: attachments.into_iter().map(Into::into).collect(),
    }))
}
