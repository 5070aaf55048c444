//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use helpdesk_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Helpdesk API",
        version = "0.1.0",
        description = "University IT support ticketing API (v0). Tickets arrive via the submission endpoint or the inbound email webhook; both run the same validation pipeline. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::submit_ticket::submit_ticket,
        handlers::email_webhook::email_webhook,
        handlers::ticket_get::get_ticket,
    ),
    components(schemas(
        helpdesk_core::TicketFields,
        models::TicketResponse,
        models::TicketStatus,
        models::AttachmentResponse,
        handlers::SubmitSuccess,
        handlers::ticket_get::TicketDetailResponse,
        error::ErrorResponse,
    ))
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
